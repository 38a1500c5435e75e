//! Deploy action: place a unit into a free cell of the deployment zone.

use log::{debug, info, warn};

use crate::game::actions::{ActionState, GridAction};
use crate::game::entities::{Unit, UnitSpawner};
use crate::game::error::ActionError;
use crate::game::grid::{DeploymentBounds, DeploymentZone, GridGeometry};
use crate::game::state::GridState;
use crate::game::types::{ActivityType, CellKind, GridIndex};

#[derive(Debug, Clone)]
pub struct DeployAction<Z = DeploymentZone> {
    zone: Z,
    geometry: GridGeometry,
    state: ActionState,
    instigator: Option<Unit>,
    origin: GridIndex,
    selected_index: GridIndex,
    // Cells this action turned `Deployable`; reverted on cancel/execute.
    marked: Vec<GridIndex>,
    // Subset of `marked` that did not exist in the store before.
    created: Vec<GridIndex>,
}

impl<Z: DeploymentBounds> DeployAction<Z> {
    pub fn new(zone: Z, geometry: GridGeometry) -> Self {
        Self {
            zone,
            geometry,
            state: ActionState::Uninitialized,
            instigator: None,
            origin: GridIndex::INVALID,
            selected_index: GridIndex::INVALID,
            marked: Vec::new(),
            created: Vec::new(),
        }
    }

    pub fn instigator(&self) -> Option<&Unit> {
        self.instigator.as_ref()
    }

    pub fn origin(&self) -> GridIndex {
        self.origin
    }

    /// In the zone, not blocked and not occupied.
    fn is_free_deploy_cell(&self, grid: &GridState, index: GridIndex) -> bool {
        if !self.zone.contains_index(index, &self.geometry) {
            return false;
        }
        match grid.get_cell_state(index) {
            Some(cell) => {
                cell.occupant.is_none() && !matches!(cell.kind, CellKind::Obstacle | CellKind::Occupied)
            }
            None => true,
        }
    }

    /// Cells the action created are removed again; pre-existing ones get
    /// their kind back.
    fn unmark_candidates(&mut self, grid: &mut GridState, keep: GridIndex) {
        let created = std::mem::take(&mut self.created);
        for index in self.marked.drain(..) {
            if index == keep {
                continue;
            }
            let Some(mut cell) = grid.get_cell_state(index) else {
                continue;
            };
            if cell.kind != CellKind::Deployable || cell.occupant.is_some() {
                continue;
            }
            if created.contains(&index) {
                grid.remove_cell(index);
            } else {
                cell.kind = CellKind::None;
                grid.set_cell_state(index, cell);
            }
        }
    }
}

impl<Z: DeploymentBounds> GridAction for DeployAction<Z> {
    fn state(&self) -> ActionState {
        self.state
    }

    fn selected_index(&self) -> GridIndex {
        self.selected_index
    }

    fn check_valid_to_initialize(&self, grid: &GridState, instigator: &Unit, origin: GridIndex) -> bool {
        self.state == ActionState::Uninitialized
            && self.zone.contains_index(origin, &self.geometry)
            && grid.find_occupant(instigator.id).is_none()
    }

    fn initialize(&mut self, grid: &mut GridState, instigator: Unit, origin: GridIndex) -> bool {
        if !self.check_valid_to_initialize(grid, &instigator, origin) {
            warn!(
                "[DeployAction] Refusing to deploy {} from {}",
                instigator.template.name, origin
            );
            return false;
        }

        for index in self.zone.candidate_indices(&self.geometry) {
            let existing = grid.get_cell_state(index);
            let mut cell = existing.unwrap_or_default();
            if cell.kind == CellKind::None && cell.occupant.is_none() {
                cell.kind = CellKind::Deployable;
                grid.set_cell_state(index, cell);
                self.marked.push(index);
                if existing.is_none() {
                    self.created.push(index);
                }
            }
        }

        debug!(
            "[DeployAction] {} ready to deploy, {} candidate cells",
            instigator.template.name,
            self.marked.len()
        );
        self.instigator = Some(instigator);
        self.origin = origin;
        self.state = ActionState::Initialized;
        true
    }

    fn is_index_hoverable(&self, grid: &GridState, index: GridIndex) -> bool {
        self.state.is_pending() && self.is_free_deploy_cell(grid, index)
    }

    fn handle_grid_select(&mut self, grid: &mut GridState, index: GridIndex) -> bool {
        if !self.state.is_pending() {
            warn!("[DeployAction] Selection at {} while {:?}", index, self.state);
            return false;
        }
        if !self.is_index_hoverable(grid, index) {
            debug!("[DeployAction] {} is not a deploy target", index);
            return false;
        }

        let kind = grid
            .get_cell_state(index)
            .map(|cell| cell.kind)
            .filter(|kind| *kind != CellKind::None)
            .unwrap_or(CellKind::Deployable);
        grid.update_cell_activity(index, kind, ActivityType::Hover);

        self.selected_index = index;
        self.state = ActionState::Selecting;
        true
    }

    fn check_valid_to_execute(&self, grid: &GridState, target: GridIndex) -> bool {
        self.state.is_pending()
            && self.instigator.is_some()
            && self.selected_index.is_valid()
            && target == self.selected_index
            && self.is_free_deploy_cell(grid, target)
    }

    fn execute(&mut self, grid: &mut GridState, spawner: &mut dyn UnitSpawner) -> Result<(), ActionError> {
        if !self.state.is_pending() {
            return Err(ActionError::InvalidState {
                operation: "execute",
                state: self.state,
            });
        }
        let target = self.selected_index;
        if !self.check_valid_to_execute(grid, target) {
            return Err(ActionError::NoValidTarget);
        }
        let Some(unit) = self.instigator.clone() else {
            return Err(ActionError::NoValidTarget);
        };

        if grid.is_hovering_set() && grid.hovering_index() != target {
            grid.clear_hover_cell();
        }
        self.unmark_candidates(grid, target);

        grid.assign_occupant(target, Some(unit.id));
        grid.update_cell_activity(target, CellKind::Occupied, ActivityType::Active);
        spawner.spawn_unit(unit.id, &unit.template, target);

        info!("[DeployAction] Deployed {} at {}", unit.template.name, target);
        self.state = ActionState::Executed;
        Ok(())
    }

    fn cancel(&mut self, grid: &mut GridState) -> Result<(), ActionError> {
        if !self.state.is_pending() {
            return Err(ActionError::InvalidState {
                operation: "cancel",
                state: self.state,
            });
        }

        let hovering = grid.hovering_index();
        if grid.is_hovering_set() && (hovering == self.selected_index || self.marked.contains(&hovering)) {
            grid.clear_hover_cell();
        }
        self.unmark_candidates(grid, GridIndex::INVALID);

        debug!("[DeployAction] Cancelled");
        self.selected_index = GridIndex::INVALID;
        self.state = ActionState::Cancelled;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::{UnitId, UnitTemplate};
    use crate::game::grid::Point2;
    use crate::game::types::CellState;

    #[derive(Default)]
    struct RecordingSpawner {
        spawned: Vec<(UnitId, String, GridIndex)>,
    }

    impl UnitSpawner for RecordingSpawner {
        fn spawn_unit(&mut self, unit: UnitId, template: &UnitTemplate, target: GridIndex) {
            self.spawned.push((unit, template.name.clone(), target));
        }
    }

    fn geometry() -> GridGeometry {
        GridGeometry {
            unit_size: 100.0,
            unit_scale: 1.0,
        }
    }

    // Columns 0..=1, rows 0..=1.
    fn action() -> DeployAction {
        DeployAction::new(
            DeploymentZone::new(Point2::new(0.0, 0.0), Point2::new(200.0, 200.0)),
            geometry(),
        )
    }

    #[test]
    fn test_initialize_marks_candidates() {
        let mut grid = GridState::new();
        let mut deploy = action();
        assert!(deploy.initialize(&mut grid, Unit::new("Knight"), GridIndex::new(0, 0)));

        assert_eq!(deploy.state(), ActionState::Initialized);
        assert_eq!(grid.rendered_indices().len(), 4);
        assert_eq!(
            grid.get_cell_state(GridIndex::new(1, 1)).unwrap().kind,
            CellKind::Deployable
        );
    }

    #[test]
    fn test_initialize_rejects_origin_outside_zone() {
        let mut grid = GridState::new();
        let mut deploy = action();
        let unit = Unit::new("Knight");
        assert!(!deploy.check_valid_to_initialize(&grid, &unit, GridIndex::new(5, 0)));
        assert!(!deploy.initialize(&mut grid, unit, GridIndex::new(5, 0)));
        assert_eq!(deploy.state(), ActionState::Uninitialized);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_initialize_rejects_already_deployed_unit() {
        let mut grid = GridState::new();
        let unit = Unit::new("Knight");
        grid.assign_occupant(GridIndex::new(3, 3), Some(unit.id));

        let deploy = action();
        assert!(!deploy.check_valid_to_initialize(&grid, &unit, GridIndex::new(0, 0)));
    }

    #[test]
    fn test_occupied_and_blocked_cells_are_not_hoverable() {
        let mut grid = GridState::new();
        grid.set_cell_state(GridIndex::new(0, 1), CellState::new(CellKind::Obstacle, ActivityType::None));
        grid.assign_occupant(GridIndex::new(1, 1), Some(UnitId::new()));

        let mut deploy = action();
        assert!(!deploy.is_index_hoverable(&grid, GridIndex::new(0, 0)));
        deploy.initialize(&mut grid, Unit::new("Archer"), GridIndex::new(0, 0));

        assert!(deploy.is_index_hoverable(&grid, GridIndex::new(0, 0)));
        assert!(!deploy.is_index_hoverable(&grid, GridIndex::new(0, 1)));
        assert!(!deploy.is_index_hoverable(&grid, GridIndex::new(1, 1)));
        assert!(!deploy.is_index_hoverable(&grid, GridIndex::new(4, 0)));
    }

    #[test]
    fn test_select_records_target_and_hovers_it() {
        let mut grid = GridState::new();
        let mut deploy = action();
        deploy.initialize(&mut grid, Unit::new("Knight"), GridIndex::new(0, 0));

        assert!(!deploy.handle_grid_select(&mut grid, GridIndex::new(6, 0)));
        assert_eq!(deploy.state(), ActionState::Initialized);

        assert!(deploy.handle_grid_select(&mut grid, GridIndex::new(1, 0)));
        assert_eq!(deploy.state(), ActionState::Selecting);
        assert_eq!(deploy.selected_index(), GridIndex::new(1, 0));
        assert_eq!(grid.hovering_index(), GridIndex::new(1, 0));
        assert!(deploy.check_valid_to_execute(&grid, GridIndex::new(1, 0)));
        assert!(!deploy.check_valid_to_execute(&grid, GridIndex::new(0, 0)));
    }

    #[test]
    fn test_execute_deploys_unit() {
        let mut grid = GridState::new();
        let mut spawner = RecordingSpawner::default();
        let unit = Unit::new("Knight");
        let unit_id = unit.id;
        let target = GridIndex::new(1, 1);

        let mut deploy = action();
        deploy.initialize(&mut grid, unit, GridIndex::new(0, 0));
        deploy.handle_grid_select(&mut grid, target);
        deploy.execute(&mut grid, &mut spawner).unwrap();

        let cell = grid.get_cell_state(target).unwrap();
        assert_eq!(cell.kind, CellKind::Occupied);
        assert_eq!(cell.activity, ActivityType::Active);
        assert_eq!(cell.occupant, Some(unit_id));
        assert_eq!(grid.active_index(), target);
        assert!(!grid.is_hovering_set());
        assert_eq!(spawner.spawned, vec![(unit_id, "Knight".to_string(), target)]);
        assert_eq!(deploy.state(), ActionState::Executed);
        // Other deploy markers are gone.
        assert_eq!(grid.rendered_indices().len(), 1);
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_execute_only_once() {
        let mut grid = GridState::new();
        let mut spawner = RecordingSpawner::default();
        let mut deploy = action();
        deploy.initialize(&mut grid, Unit::new("Knight"), GridIndex::new(0, 0));
        deploy.handle_grid_select(&mut grid, GridIndex::new(0, 1));
        deploy.execute(&mut grid, &mut spawner).unwrap();

        let second = deploy.execute(&mut grid, &mut spawner);
        assert_eq!(
            second,
            Err(ActionError::InvalidState {
                operation: "execute",
                state: ActionState::Executed
            })
        );
        assert_eq!(spawner.spawned.len(), 1);
    }

    #[test]
    fn test_execute_rejects_target_taken_after_selection() {
        let mut grid = GridState::new();
        let mut spawner = RecordingSpawner::default();
        let mut deploy = action();
        deploy.initialize(&mut grid, Unit::new("Knight"), GridIndex::new(0, 0));
        deploy.handle_grid_select(&mut grid, GridIndex::new(0, 1));
        grid.assign_occupant(GridIndex::new(0, 1), Some(UnitId::new()));

        assert_eq!(deploy.execute(&mut grid, &mut spawner), Err(ActionError::NoValidTarget));
        assert_eq!(deploy.state(), ActionState::Selecting);
        assert!(spawner.spawned.is_empty());
    }

    #[test]
    fn test_cancel_reverts_markers() {
        let mut grid = GridState::new();
        let mut deploy = action();
        deploy.initialize(&mut grid, Unit::new("Knight"), GridIndex::new(0, 0));
        deploy.handle_grid_select(&mut grid, GridIndex::new(1, 0));

        deploy.cancel(&mut grid).unwrap();

        assert_eq!(deploy.state(), ActionState::Cancelled);
        assert_eq!(deploy.selected_index(), GridIndex::INVALID);
        assert!(!grid.is_hovering_set());
        assert!(grid.rendered_indices().is_empty());
        assert!(deploy.cancel(&mut grid).is_err());
    }

    #[test]
    fn test_cancel_leaves_no_placeholder_cells() {
        let mut grid = GridState::new();
        let existing = GridIndex::new(1, 1);
        grid.set_cell_state(existing, CellState::default());

        let mut deploy = action();
        deploy.initialize(&mut grid, Unit::new("Knight"), GridIndex::new(0, 0));
        deploy.cancel(&mut grid).unwrap();

        assert_eq!(grid.len(), 1);
        assert_eq!(grid.get_cell_state(existing), Some(CellState::default()));
        assert_eq!(grid.get_cell_state(GridIndex::new(0, 0)), None);

        // Untouched cells still behave as missing.
        grid.update_cell_activity(GridIndex::new(0, 0), CellKind::None, ActivityType::Hover);
        assert_eq!(grid.len(), 1);
        assert!(!grid.is_hovering_set());
    }

    #[test]
    fn test_cancel_keeps_committed_cells() {
        let mut grid = GridState::new();
        let blocker = GridIndex::new(0, 1);
        grid.set_cell_state(blocker, CellState::new(CellKind::Obstacle, ActivityType::None));

        let mut deploy = action();
        deploy.initialize(&mut grid, Unit::new("Knight"), GridIndex::new(0, 0));
        deploy.cancel(&mut grid).unwrap();

        assert_eq!(grid.get_cell_state(blocker).unwrap().kind, CellKind::Obstacle);
        assert_eq!(grid.rendered_indices().len(), 1);
    }

    #[test]
    fn test_cancel_before_initialize_is_rejected() {
        let mut grid = GridState::new();
        let mut deploy = action();
        assert!(matches!(
            deploy.cancel(&mut grid),
            Err(ActionError::InvalidState { operation: "cancel", .. })
        ));
    }
}
