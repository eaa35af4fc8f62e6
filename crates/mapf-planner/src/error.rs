//! Planner error type.

use std::fmt;

use thiserror::Error;

use mapf_core::{MapfError, Position, Step};

/// Why a task endpoint cannot be used.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvalidReason {
    OutOfBounds,
    Blocked,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::OutOfBounds => f.write_str("outside the grid"),
            InvalidReason::Blocked     => f.write_str("blocked"),
        }
    }
}

/// Errors produced by `mapf-planner`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// The frontier emptied without reaching the goal.  Expected and
    /// recoverable: the scheduler defers the task and tries again later.
    #[error("no path from {start} to {goal} starting at {start_step}")]
    Exhausted { start: Position, goal: Position, start_step: Step },

    /// The start or goal can never be occupied.  Retrying cannot help.
    #[error("invalid task: {position} is {reason}")]
    InvalidTask { position: Position, reason: InvalidReason },

    #[error("malformed path: {0}")]
    Path(#[from] MapfError),
}

impl PlanError {
    /// `true` for the recoverable "no path yet" outcome.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, PlanError::Exhausted { .. })
    }
}

pub type PlanResult<T> = Result<T, PlanError>;
