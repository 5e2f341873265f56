use serde::{Deserialize, Serialize};

use crate::core::GridPosition;
use crate::mapping::Mapped;

/// 3D scene layout: the grid square `0..=grid_extent` is stretched over
/// `[-half_extent, half_extent]` on the X/Z plane, floors stack on Y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Grid coordinate mapped to the far scene edge
    pub grid_extent: i32,

    /// Half the side of the scene square
    pub half_extent: f64,

    /// Scene units between two floors
    pub floor_height: f64,

    /// Number of floors (ground floor is 0)
    pub floors: i32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            grid_extent: 100,
            half_extent: 5.0,
            floor_height: 3.0,
            floors: 2,
        }
    }
}

impl SceneConfig {
    /// Scene units per grid cell
    pub fn scale(&self) -> f64 {
        2.0 * self.half_extent / self.grid_extent as f64
    }

    pub fn contains(&self, pos: GridPosition) -> bool {
        (0..=self.grid_extent).contains(&pos.x)
            && (0..=self.grid_extent).contains(&pos.y)
            && (0..self.floors).contains(&pos.z)
    }

    pub fn max_cell(&self) -> GridPosition {
        GridPosition::new(self.grid_extent, self.grid_extent, self.floors - 1)
    }
}

/// Point in scene space; `y` is vertical
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenePoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl ScenePoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Grid Y becomes scene Z; the floor index becomes height
pub fn to_scene(pos: GridPosition, config: &SceneConfig) -> ScenePoint {
    let scale = config.scale();
    ScenePoint {
        x: pos.x as f64 * scale - config.half_extent,
        y: pos.z as f64 * config.floor_height,
        z: pos.y as f64 * scale - config.half_extent,
    }
}

/// Nearest grid cell and floor for a scene point
pub fn from_scene_point(point: ScenePoint, config: &SceneConfig) -> Mapped {
    let scale = config.scale();
    let cell = GridPosition {
        x: ((point.x + config.half_extent) / scale).round() as i32,
        y: ((point.z + config.half_extent) / scale).round() as i32,
        z: if config.floor_height > 0.0 {
            (point.y / config.floor_height).round() as i32
        } else {
            0
        },
    };

    if config.contains(cell) {
        Mapped::Cell(cell)
    } else {
        Mapped::Unmapped(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_forward_mapping() {
        let config = SceneConfig::default();

        let origin = to_scene(GridPosition::flat(0, 0), &config);
        assert!(approx(origin.x, -5.0) && approx(origin.y, 0.0) && approx(origin.z, -5.0));

        let point = to_scene(GridPosition::new(50, 100, 1), &config);
        assert!(approx(point.x, 0.0));
        assert!(approx(point.y, 3.0));
        assert!(approx(point.z, 5.0));
    }

    #[test]
    fn test_round_trip() {
        let config = SceneConfig::default();
        for cell in [
            GridPosition::flat(5, 5),
            GridPosition::new(0, 100, 1),
            GridPosition::new(37, 64, 0),
        ] {
            assert_eq!(from_scene_point(to_scene(cell, &config), &config), Mapped::Cell(cell));
        }
    }

    #[test]
    fn test_rounds_to_nearest_cell() {
        let config = SceneConfig::default();
        // 0.04 scene units past cell 5 is still cell 5; 0.06 is cell 6
        let near = from_scene_point(ScenePoint::new(-4.46, 0.2, -4.5), &config);
        assert_eq!(near, Mapped::Cell(GridPosition::flat(5, 5)));

        let next = from_scene_point(ScenePoint::new(-4.44, 0.0, -4.5), &config);
        assert_eq!(next.cell(), Some(GridPosition::flat(6, 5)));
    }

    #[test]
    fn test_outside_scene_unmapped() {
        let config = SceneConfig::default();

        let beyond = from_scene_point(ScenePoint::new(7.0, 0.0, 0.0), &config);
        assert_eq!(beyond, Mapped::Unmapped(GridPosition::flat(120, 50)));

        let high = from_scene_point(ScenePoint::new(0.0, 9.0, 0.0), &config);
        assert_eq!(high.raw().z, 3);
        assert!(!high.is_mapped());
        assert_eq!(high.clamp_to(config.max_cell()), GridPosition::new(50, 50, 1));
    }
}
