//! Framework error type.
//!
//! Sub-crates define their own error enums (`PlanError`, `ScheduleError`,
//! `SimError`, `OutputError`); `MapfError` only covers the constructors that
//! live in this crate.

use thiserror::Error;

use crate::Position;

/// Errors produced by `mapf-core` constructors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MapfError {
    #[error("grid bounds must be non-empty, got {width}x{height}")]
    InvalidBounds { width: u32, height: u32 },

    #[error("a path needs at least one waypoint")]
    EmptyPath,

    #[error("waypoint {index} is not one step after its predecessor")]
    Discontinuous { index: usize },

    #[error("{from} → {to} is not a unit move")]
    IllegalMove { from: Position, to: Position },
}

/// Shorthand result type for `mapf-core`.
pub type MapfResult<T> = Result<T, MapfError>;
