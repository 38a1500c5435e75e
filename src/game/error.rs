//! Error types for the grid core.
//!
//! `GridError` covers configuration problems that must stop a session before
//! it starts. `ActionError` covers calls a grid action refuses to perform.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::game::actions::ActionState;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("style source not found at {path}")]
    StyleSourceMissing { path: PathBuf },

    #[error("failed to read style source {path}: {source}")]
    StyleSourceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse style source {path}: {source}")]
    StyleSourceParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("style source contains no rows")]
    EmptyStyleTable,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("cannot {operation} while action is {state:?}")]
    InvalidState {
        operation: &'static str,
        state: ActionState,
    },

    #[error("no valid target selected")]
    NoValidTarget,

    #[error("no grid action in progress")]
    NoActiveAction,
}
