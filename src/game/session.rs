//! Grid session.
//!
//! Owns the grid state store for one play session and routes input (hover,
//! select, confirm, cancel) to the grid action in progress.

use log::{debug, info, warn};

use crate::game::actions::{ActionState, DeployAction, GridAction};
use crate::game::entities::{Unit, UnitSpawner};
use crate::game::error::ActionError;
use crate::game::grid::{DeploymentZone, GridGeometry};
use crate::game::state::GridState;
use crate::game::types::{ActivityType, GridIndex};

pub struct GridSession<S: UnitSpawner> {
    grid: GridState,
    geometry: GridGeometry,
    zone: DeploymentZone,
    spawner: S,
    action: Option<Box<dyn GridAction>>,
}

impl<S: UnitSpawner> GridSession<S> {
    /// Session with the configured default geometry and deployment zone.
    pub fn new(grid: GridState, spawner: S) -> Self {
        Self::with_layout(grid, spawner, GridGeometry::default(), DeploymentZone::default())
    }

    pub fn with_layout(grid: GridState, spawner: S, geometry: GridGeometry, zone: DeploymentZone) -> Self {
        Self {
            grid,
            geometry,
            zone,
            spawner,
            action: None,
        }
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut GridState {
        &mut self.grid
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn zone(&self) -> &DeploymentZone {
        &self.zone
    }

    /// State of the action in progress, if any.
    pub fn action_state(&self) -> Option<ActionState> {
        self.action.as_ref().map(|action| action.state())
    }

    /// Starts deploying `unit`. Fails if another action is pending or the
    /// deploy is not valid from `origin`.
    pub fn begin_deploy(&mut self, unit: Unit, origin: GridIndex) -> bool {
        if self.action.is_some() {
            warn!("[GridSession] An action is already in progress");
            return false;
        }

        let mut action = DeployAction::new(self.zone, self.geometry);
        if !action.check_valid_to_initialize(&self.grid, &unit, origin) {
            debug!("[GridSession] Deploy of {} not valid from {}", unit.template.name, origin);
            return false;
        }
        if !action.initialize(&mut self.grid, unit, origin) {
            return false;
        }
        self.action = Some(Box::new(action));
        true
    }

    /// Highlights `index` if the current action accepts it, otherwise drops
    /// the hover.
    pub fn handle_hover(&mut self, index: GridIndex) {
        let hoverable = self
            .action
            .as_ref()
            .is_some_and(|action| action.is_index_hoverable(&self.grid, index));

        match self.grid.get_cell_state(index) {
            Some(cell) if hoverable => {
                self.grid.update_cell_activity(index, cell.kind, ActivityType::Hover);
            }
            _ => self.grid.clear_hover_cell(),
        }
    }

    pub fn handle_select(&mut self, index: GridIndex) -> bool {
        match self.action.as_mut() {
            Some(action) => action.handle_grid_select(&mut self.grid, index),
            None => {
                debug!("[GridSession] Selection at {} with no action", index);
                false
            }
        }
    }

    /// Executes the pending action. On failure the action stays pending.
    pub fn confirm_action(&mut self) -> Result<(), ActionError> {
        let action = self.action.as_mut().ok_or(ActionError::NoActiveAction)?;
        action.execute(&mut self.grid, &mut self.spawner)?;
        self.action = None;
        Ok(())
    }

    pub fn cancel_action(&mut self) -> Result<(), ActionError> {
        let mut action = self.action.take().ok_or(ActionError::NoActiveAction)?;
        action.cancel(&mut self.grid)
    }

    /// Drops any pending action and clears the whole grid.
    pub fn end_turn(&mut self) {
        if let Some(mut action) = self.action.take() {
            if let Err(err) = action.cancel(&mut self.grid) {
                warn!("[GridSession] Could not cancel action at turn end: {}", err);
            }
        }
        info!("[GridSession] Turn ended, grid reset");
        self.grid.reset_all();
    }
}
