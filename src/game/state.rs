//! Grid state store.
//!
//! Owns the sparse cell map, the rendered-index set and the active/hover
//! singletons. Every mutation goes through `set_cell_state`, which keeps the
//! rendered set in sync and publishes on both notification channels.

use std::collections::{HashMap, HashSet};

use log::debug;
use serde::Serialize;

use crate::game::entities::UnitId;
use crate::game::error::GridError;
use crate::game::events::{SubscriptionId, UpdateChannel};
use crate::game::style::{StyleRow, StyleTable, VisualStyle};
use crate::game::types::{ActivityType, CellKind, CellState, GridIndex, GridUpdate, UpdateOp};

#[derive(Debug, Default)]
pub struct GridState {
    cells: HashMap<GridIndex, CellState>,
    rendered: HashSet<GridIndex>,
    active_index: GridIndex,
    hovering_index: GridIndex,
    styles: StyleTable,
    visual_updates: UpdateChannel,
    updates: UpdateChannel,
}

/// One stored cell, as it appears in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellEntry {
    pub index: GridIndex,
    pub state: CellState,
}

/// Serializable view of the store, cells sorted by index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridSnapshot {
    pub cells: Vec<CellEntry>,
    pub active_index: GridIndex,
    pub hovering_index: GridIndex,
}

impl GridState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with its style table loaded from `rows`.
    pub fn with_styles(rows: Vec<StyleRow>) -> Result<Self, GridError> {
        let mut state = Self::new();
        state.load_style_table(rows)?;
        Ok(state)
    }

    // ---------------------------------------------------------------------
    // Subscriptions

    /// Listener for visually relevant changes and visual resets.
    pub fn on_visual_update<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&GridUpdate) + 'static,
    {
        self.visual_updates.subscribe(listener)
    }

    /// Listener for every semantic change and full resets.
    pub fn on_update<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&GridUpdate) + 'static,
    {
        self.updates.subscribe(listener)
    }

    pub fn unsubscribe_visual(&mut self, id: SubscriptionId) -> bool {
        self.visual_updates.unsubscribe(id)
    }

    pub fn unsubscribe_update(&mut self, id: SubscriptionId) -> bool {
        self.updates.unsubscribe(id)
    }

    // ---------------------------------------------------------------------
    // Cell map

    pub fn get_cell_state(&self, index: GridIndex) -> Option<CellState> {
        self.cells.get(&index).copied()
    }

    /// Inserts or replaces the state of `index`.
    ///
    /// Emits a visual update only when the cell's look changed; always emits
    /// a full update.
    pub fn set_cell_state(&mut self, index: GridIndex, new_state: CellState) {
        let (op, visual_change) = match self.cells.get_mut(&index) {
            Some(current) => {
                let visual_change = if current.is_rendered() != new_state.is_rendered() {
                    true
                } else {
                    !current.is_visually_same_with(&new_state)
                };
                *current = new_state;
                (UpdateOp::Updated, visual_change)
            }
            None => {
                self.cells.insert(index, new_state);
                let visual_change = !CellState::default().is_visually_same_with(&new_state);
                (UpdateOp::Created, visual_change)
            }
        };

        if new_state.is_rendered() {
            self.rendered.insert(index);
        } else {
            self.rendered.remove(&index);
        }

        let update = GridUpdate {
            state: new_state,
            index,
            op,
        };
        if visual_change {
            self.visual_updates.broadcast(&update);
        }
        self.updates.broadcast(&update);
    }

    /// Hides every rendered cell, keeping activity and occupant.
    ///
    /// One full update per hidden cell, then a single visual reset.
    pub fn hide_all_rendered(&mut self) {
        let mut hidden: Vec<GridIndex> = self.rendered.drain().collect();
        hidden.sort();

        for index in hidden {
            let Some(state) = self.cells.get_mut(&index) else {
                continue;
            };
            if !state.is_rendered() {
                continue;
            }
            state.kind = CellKind::None;
            let update = GridUpdate {
                state: *state,
                index,
                op: UpdateOp::Updated,
            };
            self.updates.broadcast(&update);
        }

        debug!("[GridState] All rendered cells hidden");
        self.visual_updates.broadcast(&GridUpdate::reset());
    }

    /// Drops one cell from the map, as if it had never been set.
    ///
    /// Releases any singleton held by `index`. The full update carries the
    /// default state; a visual update is emitted only if the cell was visible
    /// in some way. Returns the removed state.
    pub fn remove_cell(&mut self, index: GridIndex) -> Option<CellState> {
        let removed = self.cells.remove(&index)?;
        self.rendered.remove(&index);
        if self.active_index == index {
            self.active_index = GridIndex::INVALID;
        }
        if self.hovering_index == index {
            self.hovering_index = GridIndex::INVALID;
        }

        let update = GridUpdate {
            state: CellState::default(),
            index,
            op: UpdateOp::Removed,
        };
        if !removed.is_visually_same_with(&CellState::default()) {
            self.visual_updates.broadcast(&update);
        }
        self.updates.broadcast(&update);
        Some(removed)
    }

    /// Drops every cell and both singletons. Used between levels and turns.
    pub fn reset_all(&mut self) {
        self.cells.clear();
        self.rendered.clear();
        self.active_index = GridIndex::INVALID;
        self.hovering_index = GridIndex::INVALID;

        debug!("[GridState] Grid state reset");
        let update = GridUpdate::reset();
        self.visual_updates.broadcast(&update);
        self.updates.broadcast(&update);
    }

    // ---------------------------------------------------------------------
    // Hover / active singletons

    pub fn set_hovering_index(&mut self, index: GridIndex) {
        self.hovering_index = index;
    }

    pub fn hovering_index(&self) -> GridIndex {
        self.hovering_index
    }

    pub fn is_hovering_set(&self) -> bool {
        self.hovering_index.is_valid()
    }

    pub fn active_index(&self) -> GridIndex {
        self.active_index
    }

    pub fn is_active_set(&self) -> bool {
        self.active_index.is_valid()
    }

    pub fn clear_active_cell(&mut self) {
        if !self.is_active_set() {
            return;
        }
        let index = self.active_index;
        if let Some(mut state) = self.get_cell_state(index) {
            state.activity = ActivityType::None;
            self.set_cell_state(index, state);
        }
        self.active_index = GridIndex::INVALID;
    }

    pub fn clear_hover_cell(&mut self) {
        if !self.is_hovering_set() {
            return;
        }
        let index = self.hovering_index;
        if let Some(state) = self.get_cell_state(index) {
            self.update_cell_activity(index, state.kind, ActivityType::None);
        }
        self.hovering_index = GridIndex::INVALID;
    }

    /// Writes `kind`/`activity` to `index` and keeps the singletons unique.
    ///
    /// A missing cell is only created when `kind` is not `None`; activity
    /// alone never brings a cell into existence. Previous holders of the
    /// singleton are evicted before the new state is written, so listeners
    /// never see two active or two hovering cells.
    pub fn update_cell_activity(&mut self, index: GridIndex, kind: CellKind, activity: ActivityType) {
        let mut state = match self.get_cell_state(index) {
            Some(state) => state,
            None if kind != CellKind::None => CellState::default(),
            None => {
                debug!("[GridState] Ignoring activity change on missing cell {}", index);
                return;
            }
        };
        state.kind = kind;
        state.activity = activity;

        match activity {
            ActivityType::Active => {
                if self.hovering_index == index {
                    self.hovering_index = GridIndex::INVALID;
                }
                if self.is_active_set() && self.active_index != index {
                    self.clear_active_cell();
                }
                self.set_cell_state(index, state);
                self.active_index = index;
            }
            ActivityType::Hover => {
                if self.is_hovering_set() && self.hovering_index != index {
                    self.clear_hover_cell();
                }
                if self.active_index == index {
                    self.active_index = GridIndex::INVALID;
                }
                self.set_cell_state(index, state);
                self.hovering_index = index;
            }
            ActivityType::None => {
                self.set_cell_state(index, state);
            }
        }
    }

    /// Makes `index` the single active cell.
    ///
    /// Clears the hover first if it sits on `index`, and always round-trips
    /// the current active cell (even `index` itself) through the clear path.
    /// A missing cell is created with the default kind.
    pub fn mark_cell_active(&mut self, index: GridIndex) {
        if self.hovering_index == index {
            self.clear_hover_cell();
        }
        self.clear_active_cell();

        let mut state = self.get_cell_state(index).unwrap_or_default();
        state.activity = ActivityType::Active;
        self.set_cell_state(index, state);
        self.active_index = index;
    }

    /// Resets the activity of `index` and releases any singleton it held.
    pub fn set_cell_default(&mut self, index: GridIndex) {
        let Some(state) = self.get_cell_state(index) else {
            debug!("[GridState] Cannot reset missing cell {}", index);
            return;
        };
        if self.active_index == index {
            self.active_index = GridIndex::INVALID;
        }
        if self.hovering_index == index {
            self.hovering_index = GridIndex::INVALID;
        }
        self.update_cell_activity(index, state.kind, ActivityType::None);
    }

    /// Records (or clears, with `None`) the unit standing on `index`.
    pub fn assign_occupant(&mut self, index: GridIndex, occupant: Option<UnitId>) {
        let mut state = self.get_cell_state(index).unwrap_or_default();
        state.occupant = occupant;
        self.set_cell_state(index, state);
    }

    /// Index currently holding `unit`, if any.
    pub fn find_occupant(&self, unit: UnitId) -> Option<GridIndex> {
        self.cells
            .iter()
            .find(|(_, state)| state.occupant == Some(unit))
            .map(|(index, _)| *index)
    }

    // ---------------------------------------------------------------------
    // Styles

    pub fn load_style_table(&mut self, rows: Vec<StyleRow>) -> Result<(), GridError> {
        self.styles = StyleTable::from_rows(rows)?;
        Ok(())
    }

    pub fn lookup_style(&self, kind: CellKind, activity: ActivityType) -> Option<&VisualStyle> {
        self.styles.lookup(kind, activity)
    }

    // ---------------------------------------------------------------------
    // Inspection

    pub fn rendered_indices(&self) -> &HashSet<GridIndex> {
        &self.rendered
    }

    pub fn cells(&self) -> impl Iterator<Item = (&GridIndex, &CellState)> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn snapshot(&self) -> GridSnapshot {
        let mut cells: Vec<CellEntry> = self
            .cells
            .iter()
            .map(|(index, state)| CellEntry {
                index: *index,
                state: *state,
            })
            .collect();
        cells.sort_by_key(|entry| entry.index);
        GridSnapshot {
            cells,
            active_index: self.active_index,
            hovering_index: self.hovering_index,
        }
    }
}
