//! Plain data row types written by output backends.

use std::fmt;

/// One waypoint of a committed path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathRow {
    pub agent_id:   u32,
    pub task_index: usize,
    pub step:       u64,
    pub x:          i32,
    pub y:          i32,
}

/// Which log entry an [`OutcomeRow`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Committed,
    Deferred,
    Failed,
}

impl OutcomeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OutcomeKind::Committed => "committed",
            OutcomeKind::Deferred  => "deferred",
            OutcomeKind::Failed    => "failed",
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of an agent's outcome log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeRow {
    pub agent_id:   u32,
    pub task_index: usize,
    pub outcome:    OutcomeKind,
    /// Path start for `Committed`; the attempted step otherwise.
    pub step:       u64,
    pub start_x:    i32,
    pub start_y:    i32,
    pub goal_x:     i32,
    pub goal_y:     i32,
    /// Arrival step, deferral reason, or failure reason.
    pub detail:     String,
}
