//! Demo entry point.
//!
//! Loads the style table, sets up a grid session and plays one deployment
//! turn with scripted input, printing the grid after every visual change.

use std::cell::Cell;
use std::process;
use std::rc::Rc;

use log::{error, info, warn};
use rand::seq::IteratorRandom;

use tactics_grid::config::grid::{GRID_COLS, GRID_ROWS};
use tactics_grid::config::style::{read_style_rows, style_source_path};
use tactics_grid::game::entities::{Unit, UnitId, UnitSpawner, UnitTemplate};
use tactics_grid::game::error::GridError;
use tactics_grid::game::grid::DeploymentBounds;
use tactics_grid::game::session::GridSession;
use tactics_grid::game::state::GridState;
use tactics_grid::game::systems::print_grid;
use tactics_grid::game::types::{ActivityType, CellKind, GridIndex};

/// Stand-in for the world's actor spawner.
struct LogSpawner;

impl UnitSpawner for LogSpawner {
    fn spawn_unit(&mut self, unit: UnitId, template: &UnitTemplate, target: GridIndex) {
        info!("[Spawner] Spawned {} ({}) at {}", template.name, unit, target);
    }
}

fn load_grid() -> Result<GridState, GridError> {
    let path = style_source_path();
    let rows = read_style_rows(&path)?;
    GridState::with_styles(rows)
}

fn main() {
    // Initialize logger from environment variable (RUST_LOG).
    env_logger::init();

    let mut grid = match load_grid() {
        Ok(grid) => grid,
        Err(err) => {
            error!("[Startup] Cannot start session: {}", err);
            process::exit(1);
        }
    };

    // Rendering layer: redraw only when something visible changed.
    let dirty = Rc::new(Cell::new(false));
    let flag = Rc::clone(&dirty);
    grid.on_visual_update(move |_| flag.set(true));

    let mut session = GridSession::new(grid, LogSpawner);
    let mut rng = rand::rng();

    // Scatter a few obstacles outside the deployment zone.
    let geometry = *session.geometry();
    let zone = *session.zone();
    let obstacles = (0..GRID_ROWS)
        .flat_map(|row| (0..GRID_COLS).map(move |col| GridIndex::new(col, row)))
        .filter(|index| !zone.contains_index(*index, &geometry))
        .choose_multiple(&mut rng, 5);
    for index in obstacles {
        session
            .grid_mut()
            .update_cell_activity(index, CellKind::Obstacle, ActivityType::None);
    }

    for name in ["Knight", "Archer", "Mage"] {
        let unit = Unit::new(name);
        if !session.begin_deploy(unit, GridIndex::new(0, 0)) {
            continue;
        }

        let candidates: Vec<GridIndex> = zone
            .candidate_indices(&geometry)
            .into_iter()
            .filter(|index| session.grid().get_cell_state(*index).is_none_or(|cell| cell.occupant.is_none()))
            .collect();
        let Some(target) = candidates.into_iter().choose(&mut rng) else {
            if let Err(err) = session.cancel_action() {
                warn!("[Demo] Could not cancel deploy of {}: {}", name, err);
            }
            continue;
        };

        session.handle_hover(target);
        session.handle_select(target);
        if let Err(err) = session.confirm_action() {
            error!("[Demo] Deploy of {} failed: {}", name, err);
            if let Err(err) = session.cancel_action() {
                warn!("[Demo] Could not cancel deploy of {}: {}", name, err);
            }
        }

        if dirty.replace(false) {
            print_grid(session.grid(), GRID_COLS, GRID_ROWS);
        }
    }

    match serde_json::to_string_pretty(&session.grid().snapshot()) {
        Ok(json) => println!("{}", json),
        Err(err) => error!("[Demo] Failed to serialize grid snapshot: {}", err),
    }

    session.end_turn();
    if dirty.replace(false) {
        print_grid(session.grid(), GRID_COLS, GRID_ROWS);
    }
}
