use serde::Serialize;

use crate::core::GridPosition;
use crate::mapping::{from_pointer, to_screen, MapConfig, Mapped, PixelPoint};

/// Outcome of a seller clicking the map to open a stall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "cell", rename_all = "lowercase")]
pub enum Placement {
    /// Free cell, ready for a new stall
    Free(GridPosition),
    /// A stall already sits there
    Occupied(GridPosition),
    /// Click landed outside the grid
    OutOfMap,
}

/// Whether a stall already sits on `candidate`'s cell on the same floor.
///
/// Takes raw `Unmapped` cells too, so far-off coordinates must not overflow.
pub fn is_occupied(candidate: GridPosition, stalls: &[GridPosition]) -> bool {
    stalls.iter().any(|s| {
        s.z == candidate.z && s.x.abs_diff(candidate.x) < 1 && s.y.abs_diff(candidate.y) < 1
    })
}

/// Pixel-space occupancy: anything closer than one cell on both axes counts,
/// which absorbs rounding from the pixel/grid round trip.
pub fn is_pixel_occupied(candidate: PixelPoint, stalls: &[PixelPoint], config: &MapConfig) -> bool {
    let tolerance = config.cell_size;
    stalls.iter().any(|s| {
        (s.x - candidate.x).abs() < tolerance && (s.y - candidate.y).abs() < tolerance
    })
}

/// Snap a map click to its cell and check it against existing stalls
pub fn place_stall(pointer: PixelPoint, floor: i32, stalls: &[GridPosition], config: &MapConfig) -> Placement {
    let cell = match from_pointer(pointer, config) {
        Mapped::Cell(cell) => GridPosition { z: floor, ..cell },
        Mapped::Unmapped(_) => return Placement::OutOfMap,
    };

    let centre = to_screen(cell, config);
    let occupied_on_floor: Vec<PixelPoint> = stalls
        .iter()
        .filter(|s| s.z == floor)
        .map(|s| to_screen(*s, config))
        .collect();

    if is_pixel_occupied(centre, &occupied_on_floor, config) {
        tracing::debug!("cell ({}, {}) on floor {} is taken", cell.x, cell.y, floor);
        Placement::Occupied(cell)
    } else {
        Placement::Free(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occupied_same_cell() {
        let stalls = vec![GridPosition::flat(5, 5), GridPosition::flat(6, 5)];
        assert!(is_occupied(GridPosition::flat(5, 5), &stalls));
        assert!(!is_occupied(GridPosition::flat(7, 5), &stalls));
    }

    #[test]
    fn test_other_floor_is_free() {
        let stalls = vec![GridPosition::new(5, 5, 0)];
        assert!(!is_occupied(GridPosition::new(5, 5, 1), &stalls));
    }

    #[test]
    fn test_far_scene_point_is_never_occupied() {
        use crate::mapping::{from_scene_point, SceneConfig, ScenePoint};

        let far = from_scene_point(ScenePoint::new(-1.0e12, 0.0, 0.0), &SceneConfig::default());
        assert!(!far.is_mapped());
        assert_eq!(far.raw().x, i32::MIN);

        let stalls = vec![GridPosition::flat(5, 5), GridPosition::flat(i32::MAX, 0)];
        assert!(!is_occupied(far.raw(), &stalls));
        assert!(is_occupied(GridPosition::flat(i32::MIN, 50), &[far.raw()]));
    }

    #[test]
    fn test_pixel_tolerance() {
        let config = MapConfig::default();
        let stalls = vec![PixelPoint::new(220.0, 220.0)];

        assert!(is_pixel_occupied(PixelPoint::new(220.4, 219.7), &stalls, &config));
        // Neighbouring cell centre is exactly one cell away
        assert!(!is_pixel_occupied(PixelPoint::new(260.0, 220.0), &stalls, &config));
    }

    #[test]
    fn test_place_then_check() {
        let config = MapConfig::default();
        let mut stalls = Vec::new();

        let first = place_stall(PixelPoint::new(225.0, 230.0), 0, &stalls, &config);
        assert_eq!(first, Placement::Free(GridPosition::flat(5, 5)));

        if let Placement::Free(cell) = first {
            stalls.push(cell);
        }

        let again = place_stall(PixelPoint::new(205.0, 239.0), 0, &stalls, &config);
        assert_eq!(again, Placement::Occupied(GridPosition::flat(5, 5)));
        assert!(is_occupied(GridPosition::flat(5, 5), &stalls));

        let upstairs = place_stall(PixelPoint::new(225.0, 230.0), 1, &stalls, &config);
        assert_eq!(upstairs, Placement::Free(GridPosition::new(5, 5, 1)));
    }

    #[test]
    fn test_click_outside_map() {
        let config = MapConfig::default();
        assert_eq!(place_stall(PixelPoint::new(700.0, 10.0), 0, &[], &config), Placement::OutOfMap);
    }
}
