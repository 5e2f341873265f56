//! Render-ready stall markers for the 2D and 3D map views.

use serde::Serialize;

use crate::core::{GridPosition, Product};
use crate::mapping::{to_scene, to_screen, MapConfig, PixelPoint, SceneConfig, ScenePoint};
use crate::pricing;

/// One stall to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StallMarker {
    pub product_id: String,
    pub label: String,
    /// "?" when the stall has no number yet
    pub stall_number: String,
    pub cell: GridPosition,
    pub pixel: PixelPoint,
    pub scene: ScenePoint,
    /// Lowest price among the drawn stalls
    pub cheapest: bool,
    pub selected: bool,
}

/// Markers for every product that has a stall; products without a
/// location are left off the map.
pub fn stall_markers(
    products: &[Product],
    selected_id: Option<&str>,
    map: &MapConfig,
    scene: &SceneConfig,
) -> Vec<StallMarker> {
    let located: Vec<Product> = products.iter().filter(|p| p.location.is_some()).cloned().collect();

    located
        .iter()
        .filter_map(|product| {
            let cell = product.location?;
            Some(StallMarker {
                product_id: product.id.clone(),
                label: product.name.clone(),
                stall_number: product.stall_number.clone().unwrap_or_else(|| "?".to_string()),
                cell,
                pixel: to_screen(cell, map),
                scene: to_scene(cell, scene),
                cheapest: pricing::is_cheapest(product, &located),
                selected: selected_id == Some(product.id.as_str()),
            })
        })
        .collect()
}

/// Markers on one floor of a multi-floor market
pub fn floor_markers(markers: &[StallMarker], floor: i32) -> Vec<&StallMarker> {
    markers.iter().filter(|m| m.cell.z == floor).collect()
}
