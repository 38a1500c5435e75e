//! Game entities module.
//!
//! This module organizes unit handles and the spawn collaborator.

pub mod unit;

pub use unit::*;
