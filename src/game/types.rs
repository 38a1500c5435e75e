use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::entities::UnitId;

/// Grid coordinate of a cell, used as the key of the cell map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridIndex {
    pub col: i32,
    pub row: i32,
}

impl GridIndex {
    /// Sentinel for "no index" (unset hover/active cell, reset notifications).
    pub const INVALID: GridIndex = GridIndex { col: -1, row: -1 };

    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }
}

impl Default for GridIndex {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for GridIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// What a cell represents for rendering and selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellKind {
    #[default]
    None,
    Deployable,
    Occupied,
    Obstacle,
}

/// Transient selection status of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActivityType {
    #[default]
    None,
    Hover,
    Active,
}

/// Logical and visual state of a single cell.
///
/// A cell missing from the store behaves like `CellState::default()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellState {
    pub kind: CellKind,
    pub activity: ActivityType,
    /// Non-owning handle into the unit registry.
    pub occupant: Option<UnitId>,
}

impl CellState {
    pub fn new(kind: CellKind, activity: ActivityType) -> Self {
        Self {
            kind,
            activity,
            occupant: None,
        }
    }

    /// True if the cell needs a visible representation.
    pub fn is_rendered(&self) -> bool {
        self.kind != CellKind::None
    }

    /// Compares only what the renderer draws; the occupant is ignored.
    pub fn is_visually_same_with(&self, other: &CellState) -> bool {
        self.kind == other.kind && self.activity == other.activity
    }
}

/// How a notification relates to the cell map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateOp {
    Created,
    Updated,
    Removed,
    Reset,
}

/// Payload delivered on both notification channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridUpdate {
    pub state: CellState,
    pub index: GridIndex,
    pub op: UpdateOp,
}

impl GridUpdate {
    /// Reset payload: default state and the sentinel index.
    pub fn reset() -> Self {
        Self {
            state: CellState::default(),
            index: GridIndex::INVALID,
            op: UpdateOp::Reset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occupant_does_not_affect_visual_equality() {
        let a = CellState::new(CellKind::Deployable, ActivityType::Hover);
        let mut b = a;
        b.occupant = Some(UnitId::new());
        assert!(a.is_visually_same_with(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_activity_change_is_visual() {
        let a = CellState::new(CellKind::Deployable, ActivityType::None);
        let b = CellState::new(CellKind::Deployable, ActivityType::Active);
        assert!(!a.is_visually_same_with(&b));
    }

    #[test]
    fn test_only_none_kind_is_not_rendered() {
        assert!(!CellState::default().is_rendered());
        assert!(!CellState::new(CellKind::None, ActivityType::Active).is_rendered());
        assert!(CellState::new(CellKind::Obstacle, ActivityType::None).is_rendered());
    }

    #[test]
    fn test_sentinel_index() {
        assert!(!GridIndex::INVALID.is_valid());
        assert!(!GridIndex::default().is_valid());
        assert!(GridIndex::new(0, 0).is_valid());
        assert_eq!(GridIndex::new(2, 3).to_string(), "(2, 3)");
    }
}
