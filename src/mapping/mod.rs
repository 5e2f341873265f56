//! Stall coordinates: grid cells to 2D canvas pixels and 3D scene points,
//! and back.
//!
//! Nothing here fails on finite input. Inverse mappings that land outside
//! the configured map come back as [`Mapped::Unmapped`] with the raw cell,
//! so the caller can ignore, clamp or reject it.

pub mod placement;
pub mod scene;
pub mod screen;

use serde::{Deserialize, Serialize};

use crate::core::GridPosition;

pub use placement::{is_occupied, is_pixel_occupied, place_stall, Placement};
pub use scene::{from_scene_point, to_scene, SceneConfig, ScenePoint};
pub use screen::{from_pointer, snap_to_cell_center, to_screen, MapConfig, PixelPoint};

/// Result of an inverse mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "cell", rename_all = "lowercase")]
pub enum Mapped {
    /// Cell inside the configured bounds
    Cell(GridPosition),
    /// Cell outside the bounds, as computed
    Unmapped(GridPosition),
}

impl Mapped {
    /// The cell, if it lies inside the map
    pub fn cell(self) -> Option<GridPosition> {
        match self {
            Mapped::Cell(pos) => Some(pos),
            Mapped::Unmapped(_) => None,
        }
    }

    /// The computed cell regardless of bounds
    pub fn raw(self) -> GridPosition {
        match self {
            Mapped::Cell(pos) | Mapped::Unmapped(pos) => pos,
        }
    }

    pub fn is_mapped(self) -> bool {
        matches!(self, Mapped::Cell(_))
    }

    /// Pull an out-of-bounds cell onto the nearest edge cell.
    ///
    /// `max` is inclusive on every axis.
    pub fn clamp_to(self, max: GridPosition) -> GridPosition {
        let pos = self.raw();
        GridPosition {
            x: pos.x.clamp(0, max.x.max(0)),
            y: pos.y.clamp(0, max.y.max(0)),
            z: pos.z.clamp(0, max.z.max(0)),
        }
    }
}
