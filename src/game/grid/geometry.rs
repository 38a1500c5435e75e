//! Mapping between grid indices and world-space positions.

use serde::{Deserialize, Serialize};

use crate::config::grid::{GRID_UNIT_SCALE, GRID_UNIT_SIZE};
use crate::game::types::GridIndex;

/// A point on the battlefield plane, in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    pub unit_size: f32,
    pub unit_scale: f32,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            unit_size: GRID_UNIT_SIZE,
            unit_scale: GRID_UNIT_SCALE,
        }
    }
}

impl GridGeometry {
    /// World-space edge length of one cell.
    pub fn cell_extent(&self) -> f32 {
        self.unit_size * self.unit_scale
    }

    /// Centre of the cell at `index`.
    pub fn index_to_world(&self, index: GridIndex) -> Point2 {
        let extent = self.cell_extent();
        Point2 {
            x: (index.col as f32 + 0.5) * extent,
            y: (index.row as f32 + 0.5) * extent,
        }
    }

    /// Cell under `point`. Points left of or below the origin have none.
    pub fn world_to_index(&self, point: Point2) -> Option<GridIndex> {
        let extent = self.cell_extent();
        if extent <= 0.0 || point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        Some(GridIndex::new(
            (point.x / extent).floor() as i32,
            (point.y / extent).floor() as i32,
        ))
    }
}
