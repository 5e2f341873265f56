use serde::{Deserialize, Serialize};

use crate::core::GridPosition;
use crate::mapping::Mapped;

/// 2D canvas layout of a market floor plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Side of one grid cell in pixels
    pub cell_size: f64,

    /// Pixel position of the grid's top-left corner
    pub origin_offset: (f64, f64),

    /// Canvas width in pixels
    pub map_width: f64,

    /// Canvas height in pixels
    pub map_height: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            cell_size: 40.0,
            origin_offset: (0.0, 0.0),
            map_width: 600.0,
            map_height: 450.0,
        }
    }
}

impl MapConfig {
    /// Whole cells that fit across the canvas
    pub fn columns(&self) -> i32 {
        (self.map_width / self.cell_size).floor() as i32
    }

    /// Whole cells that fit down the canvas
    pub fn rows(&self) -> i32 {
        (self.map_height / self.cell_size).floor() as i32
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        (0..self.columns()).contains(&x) && (0..self.rows()).contains(&y)
    }

    /// Last valid cell, for [`Mapped::clamp_to`]
    pub fn max_cell(&self) -> GridPosition {
        GridPosition::flat(self.columns() - 1, self.rows() - 1)
    }
}

/// Canvas position in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Centre of the cell in pixel space, so stall icons sit on grid cells
pub fn to_screen(pos: GridPosition, config: &MapConfig) -> PixelPoint {
    let half = config.cell_size / 2.0;
    PixelPoint {
        x: pos.x as f64 * config.cell_size + half + config.origin_offset.0,
        y: pos.y as f64 * config.cell_size + half + config.origin_offset.1,
    }
}

/// Cell under a pointer position. The floor is always 0 on the 2D map.
pub fn from_pointer(pixel: PixelPoint, config: &MapConfig) -> Mapped {
    let x = ((pixel.x - config.origin_offset.0) / config.cell_size).floor() as i32;
    let y = ((pixel.y - config.origin_offset.1) / config.cell_size).floor() as i32;
    let cell = GridPosition::flat(x, y);

    if config.contains(x, y) {
        Mapped::Cell(cell)
    } else {
        Mapped::Unmapped(cell)
    }
}

/// Snap a pointer position to the centre of the cell beneath it
pub fn snap_to_cell_center(pixel: PixelPoint, config: &MapConfig) -> PixelPoint {
    to_screen(from_pointer(pixel, config).raw(), config)
}
