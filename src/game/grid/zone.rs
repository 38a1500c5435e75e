//! Deployment zone: the rectangle a player may deploy units into.

use serde::{Deserialize, Serialize};

use crate::config::grid::{DEPLOYMENT_ZONE_BOTTOM_LEFT, DEPLOYMENT_ZONE_TOP_RIGHT};
use crate::game::grid::geometry::{GridGeometry, Point2};
use crate::game::types::GridIndex;

/// Answers "can a unit be deployed here".
pub trait DeploymentBounds {
    fn contains_index(&self, index: GridIndex, geometry: &GridGeometry) -> bool;

    /// Every cell a unit could be deployed into.
    fn candidate_indices(&self, geometry: &GridGeometry) -> Vec<GridIndex>;
}

/// Axis-aligned bounds given by two corners, inclusive on every edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeploymentZone {
    pub bottom_left: Point2,
    pub top_right: Point2,
}

impl Default for DeploymentZone {
    fn default() -> Self {
        Self::new(DEPLOYMENT_ZONE_BOTTOM_LEFT.into(), DEPLOYMENT_ZONE_TOP_RIGHT.into())
    }
}

impl DeploymentZone {
    /// Corners may be given in any order.
    pub fn new(a: Point2, b: Point2) -> Self {
        Self {
            bottom_left: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            top_right: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn contains_point(&self, point: Point2) -> bool {
        point.x >= self.bottom_left.x
            && point.x <= self.top_right.x
            && point.y >= self.bottom_left.y
            && point.y <= self.top_right.y
    }
}

impl DeploymentBounds for DeploymentZone {
    fn contains_index(&self, index: GridIndex, geometry: &GridGeometry) -> bool {
        index.is_valid() && self.contains_point(geometry.index_to_world(index))
    }

    fn candidate_indices(&self, geometry: &GridGeometry) -> Vec<GridIndex> {
        let extent = geometry.cell_extent();
        if extent <= 0.0 || self.top_right.x < 0.0 || self.top_right.y < 0.0 {
            return Vec::new();
        }
        let first_col = (self.bottom_left.x / extent).floor().max(0.0) as i32;
        let first_row = (self.bottom_left.y / extent).floor().max(0.0) as i32;
        let last_col = (self.top_right.x / extent).floor() as i32;
        let last_row = (self.top_right.y / extent).floor() as i32;

        (first_row..=last_row)
            .flat_map(|row| (first_col..=last_col).map(move |col| GridIndex::new(col, row)))
            .filter(|index| self.contains_index(*index, geometry))
            .collect()
    }
}
