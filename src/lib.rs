//! Grid-state and grid-action core of a turn-based tactics game.
//!
//! The [`game::state::GridState`] store tracks every cell on the battlefield
//! and notifies listeners of changes. [`game::actions`] drives player actions
//! such as deploying a unit. [`game::session::GridSession`] owns both for one
//! play session.

pub mod config;
pub mod game;
