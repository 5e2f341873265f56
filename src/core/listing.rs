use serde::{Deserialize, Serialize};

use crate::core::{GridPosition, Product, StallPrice};
use crate::mapping::{from_pointer, MapConfig, Mapped, PixelPoint};

/// One product offered at one stall of a market (`marketProducts` record)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketListing {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub market_id: String,
    pub product_id: String,
    pub price: f64,
    pub stall_number: String,
    #[serde(default)]
    pub vendor_name: String,
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub z: i32,
}

impl MarketListing {
    pub fn location(&self) -> GridPosition {
        GridPosition::new(self.x, self.y, self.z)
    }

    pub fn stall_price(&self) -> StallPrice {
        StallPrice {
            price: self.price,
            stall_number: self.stall_number.clone(),
            vendor_name: self.vendor_name.clone(),
        }
    }
}

/// Body of `GET /products/{id}/prices`, cheapest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPrices {
    pub product: Product,
    #[serde(default)]
    pub prices: Vec<MarketListing>,
    #[serde(default)]
    pub cheapest: Option<MarketListing>,
    #[serde(default)]
    pub most_expensive: Option<MarketListing>,
}

impl ProductPrices {
    /// The product with its stall prices filled in, located at the cheapest stall
    pub fn priced_product(&self) -> Product {
        let mut product = self.product.clone();
        product.all_prices = self.prices.iter().map(MarketListing::stall_price).collect();
        if let Some(cheapest) = &self.cheapest {
            product.min_price = Some(cheapest.price);
            product.stall_number = Some(cheapest.stall_number.clone());
            product.vendor_name = Some(cheapest.vendor_name.clone());
            product.location = Some(cheapest.location());
        }
        product
    }
}

/// Walking directions to a stall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub stall_number: String,
    pub location: GridPosition,
    #[serde(default)]
    pub directions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
}

/// Body of `GET /products/{id}/cheapest`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheapestOption {
    pub product: Product,
    pub cheapest_option: MarketListing,
    pub route: Route,
}

/// A stall drawn on the 2D floor plan. Coordinates are canvas pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapStall {
    pub id: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: i32,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl MapStall {
    pub fn pixel(&self) -> PixelPoint {
        PixelPoint::new(self.x, self.y)
    }

    /// Grid cell under the stall, on the stall's floor
    pub fn cell(&self, config: &MapConfig) -> Mapped {
        match from_pointer(self.pixel(), config) {
            Mapped::Cell(cell) => Mapped::Cell(GridPosition { z: self.z, ..cell }),
            Mapped::Unmapped(cell) => Mapped::Unmapped(GridPosition { z: self.z, ..cell }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Map2D {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub stalls: Vec<MapStall>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Map3D {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_floor_count")]
    pub floor_count: i32,
    #[serde(default)]
    pub current_floor: i32,
}

fn default_floor_count() -> i32 {
    1
}

/// Body of `GET /markets/{id}/map`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketMap {
    #[serde(rename = "marketId")]
    pub market_id: String,
    #[serde(rename = "marketName", default)]
    pub market_name: String,
    #[serde(rename = "map2D", default)]
    pub map_2d: Option<Map2D>,
    #[serde(rename = "map3D", default)]
    pub map_3d: Option<Map3D>,
}

impl MarketMap {
    /// Canvas settings for this market; falls back to `base` without a 2D plan
    pub fn map_config(&self, base: &MapConfig) -> MapConfig {
        match &self.map_2d {
            Some(plan) => MapConfig {
                map_width: plan.width,
                map_height: plan.height,
                ..*base
            },
            None => *base,
        }
    }

    pub fn floor_count(&self) -> i32 {
        self.map_3d.as_ref().map_or(1, |m| m.floor_count.max(1))
    }

    /// Cells taken by drawn stalls, for seller placement checks
    pub fn stall_cells(&self, config: &MapConfig) -> Vec<GridPosition> {
        self.map_2d
            .iter()
            .flat_map(|plan| plan.stalls.iter())
            .filter_map(|stall| stall.cell(config).cell())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRICES: &str = r#"{
        "product": {"id": "p1", "name": "Salkım Domates", "category": "Sebze", "unit": "kg"},
        "prices": [
            {"id": "mp1", "marketId": "market_1", "productId": "p1", "price": 25.0,
             "stallNumber": "A-12", "vendorName": "Ahmet", "x": 5, "y": 5, "z": 0},
            {"id": "mp2", "marketId": "market_1", "productId": "p1", "price": 30.0,
             "stallNumber": "B-05", "vendorName": "Ayşe", "x": 9, "y": 3, "z": 1}
        ],
        "cheapest": {"id": "mp1", "marketId": "market_1", "productId": "p1", "price": 25.0,
                     "stallNumber": "A-12", "vendorName": "Ahmet", "x": 5, "y": 5, "z": 0},
        "mostExpensive": null
    }"#;

    #[test]
    fn test_priced_product() {
        let prices: ProductPrices = serde_json::from_str(PRICES).unwrap();
        let product = prices.priced_product();

        assert_eq!(product.min_price, Some(25.0));
        assert_eq!(product.stall_number.as_deref(), Some("A-12"));
        assert_eq!(product.location, Some(GridPosition::flat(5, 5)));
        assert_eq!(product.all_prices.len(), 2);
        assert_eq!(product.all_prices[1].vendor_name, "Ayşe");
    }

    #[test]
    fn test_cheapest_option() {
        let json = r#"{
            "product": {"id": "p1", "name": "Salkım Domates"},
            "cheapestOption": {"productId": "p1", "price": 25.0, "stallNumber": "A-12", "x": 5, "y": 5, "z": 0},
            "route": {"stallNumber": "A-12", "location": {"x": 5, "y": 5, "z": 0},
                      "directions": "Pazar girişinden A-12 numaralı tezgaha yürüyün"}
        }"#;

        let cheapest: CheapestOption = serde_json::from_str(json).unwrap();
        assert_eq!(cheapest.route.location, cheapest.cheapest_option.location());
        assert!(cheapest.route.estimated_time.is_none());
    }

    #[test]
    fn test_market_map_feeds_mapper() {
        let json = r#"{
            "marketId": "market_1",
            "marketName": "Kadıköy Salı Pazarı",
            "map2D": {"width": 400, "height": 300, "stalls": [
                {"id": "A-12", "x": 120, "y": 80, "z": 0, "type": "Sebze"},
                {"id": "B-05", "x": 250, "y": 150, "z": 0},
                {"id": "Z-99", "x": 900, "y": 80}
            ]},
            "map3D": {"enabled": true, "floorCount": 2, "currentFloor": 0}
        }"#;

        let map: MarketMap = serde_json::from_str(json).unwrap();
        let config = map.map_config(&MapConfig::default());
        assert_eq!(config.columns(), 10);
        assert_eq!(map.floor_count(), 2);

        // The stall outside the 400px canvas is left out
        let cells = map.stall_cells(&config);
        assert_eq!(cells, vec![GridPosition::flat(3, 2), GridPosition::flat(6, 3)]);
    }

    #[test]
    fn test_market_map_without_plan() {
        let map: MarketMap = serde_json::from_str(r#"{"marketId": "market_2"}"#).unwrap();
        assert_eq!(map.map_config(&MapConfig::default()), MapConfig::default());
        assert_eq!(map.floor_count(), 1);
        assert!(map.stall_cells(&MapConfig::default()).is_empty());
    }
}
