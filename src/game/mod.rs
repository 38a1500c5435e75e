//! Grid domain: cell state store, style table, grid actions and the session
//! that ties them together.

pub mod actions;
pub mod entities;
pub mod error;
pub mod events;
pub mod grid;
pub mod session;
pub mod state;
pub mod style;
pub mod systems;
pub mod types;
