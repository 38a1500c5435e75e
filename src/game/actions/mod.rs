//! Player-initiated grid actions.
//!
//! A grid action is created for one attempt, driven through its lifecycle
//! against the grid state store, and dropped once executed or cancelled.
//!
//! ```text
//! Uninitialized -> Initialized -> (Selecting) -> Executed | Cancelled
//! ```

pub mod deploy;

pub use deploy::DeployAction;

use serde::{Deserialize, Serialize};

use crate::game::entities::{Unit, UnitSpawner};
use crate::game::error::ActionError;
use crate::game::state::GridState;
use crate::game::types::GridIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActionState {
    #[default]
    Uninitialized,
    Initialized,
    Selecting,
    Executed,
    Cancelled,
}

impl ActionState {
    /// True while the action still accepts input.
    pub fn is_pending(&self) -> bool {
        matches!(self, ActionState::Initialized | ActionState::Selecting)
    }
}

/// Lifecycle shared by every concrete action.
///
/// Predicates (`check_*`, `is_index_hoverable`) never mutate anything.
pub trait GridAction {
    fn state(&self) -> ActionState;

    /// Target recorded by `handle_grid_select`, or the sentinel.
    fn selected_index(&self) -> GridIndex;

    fn check_valid_to_initialize(&self, grid: &GridState, instigator: &Unit, origin: GridIndex) -> bool;

    /// Moves to `Initialized` if the validity check passes. Returns false and
    /// changes nothing otherwise.
    fn initialize(&mut self, grid: &mut GridState, instigator: Unit, origin: GridIndex) -> bool;

    fn is_index_hoverable(&self, grid: &GridState, index: GridIndex) -> bool;

    /// Returns true if the selection was accepted.
    fn handle_grid_select(&mut self, grid: &mut GridState, index: GridIndex) -> bool;

    fn check_valid_to_execute(&self, grid: &GridState, target: GridIndex) -> bool;

    /// Commits the action. Can succeed at most once.
    fn execute(&mut self, grid: &mut GridState, spawner: &mut dyn UnitSpawner) -> Result<(), ActionError>;

    /// Reverts transient markers; committed cell state is left alone.
    fn cancel(&mut self, grid: &mut GridState) -> Result<(), ActionError>;
}
