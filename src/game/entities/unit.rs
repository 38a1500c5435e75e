//! Unit handles and the spawn collaborator.
//!
//! The grid never owns units. Cells only keep a `UnitId` pointing into the
//! external unit registry.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::types::GridIndex;

/// Non-owning handle to a unit in the external registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub Uuid);

impl UnitId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UnitId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Blueprint the spawn collaborator instantiates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitTemplate {
    pub name: String,
}

/// A unit that can instigate grid actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub template: UnitTemplate,
}

impl Unit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: UnitId::new(),
            template: UnitTemplate { name: name.into() },
        }
    }
}

/// Instantiates a unit into the world at a cell.
///
/// Fire-and-forget: failures are the spawner's own business.
pub trait UnitSpawner {
    fn spawn_unit(&mut self, unit: UnitId, template: &UnitTemplate, target: GridIndex);
}
