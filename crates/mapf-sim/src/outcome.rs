//! Per-task results and the final run report.

use std::collections::BTreeMap;
use std::fmt;

use mapf_core::{AgentId, CommittedPath, Position, Step};
use mapf_planner::InvalidReason;
use mapf_reserve::Conflict;

// ── Deferral ──────────────────────────────────────────────────────────────────

/// Why a planning attempt did not commit.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum DeferReason {
    /// The search exhausted its frontier.
    NoPath,
    /// A path was found against the step snapshot but clashes with a path
    /// committed earlier in the same step.
    Conflict(Conflict),
}

impl fmt::Display for DeferReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeferReason::NoPath      => f.write_str("no path"),
            DeferReason::Conflict(c) => write!(f, "{c}"),
        }
    }
}

/// One failed attempt that will be retried.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct DeferralRecord {
    /// Step the attempt planned from.
    pub requested_step: Step,
    pub start:          Position,
    pub goal:           Position,
    pub reason:         DeferReason,
}

// ── Failure ───────────────────────────────────────────────────────────────────

/// Why a task was abandoned.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TaskFailure {
    /// The task failed `attempts` times in a row.
    RetryLimitExceeded { attempts: u32 },
    /// Start or goal can never be occupied.
    InvalidTask { position: Position, reason: InvalidReason },
}

impl fmt::Display for TaskFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskFailure::RetryLimitExceeded { attempts } => {
                write!(f, "retry limit exceeded after {attempts} attempts")
            }
            TaskFailure::InvalidTask { position, reason } => {
                write!(f, "invalid task: {position} is {reason}")
            }
        }
    }
}

// ── TaskOutcome ───────────────────────────────────────────────────────────────

/// One entry in an agent's outcome log.
///
/// A task produces zero or more `Deferred` entries followed by exactly one
/// `Committed` or `Failed`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TaskOutcome {
    Committed(CommittedPath),
    Deferred(DeferralRecord),
    Failed(TaskFailure),
}

impl TaskOutcome {
    /// `true` for `Committed` and `Failed`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TaskOutcome::Deferred(_))
    }

    pub fn path(&self) -> Option<&CommittedPath> {
        match self {
            TaskOutcome::Committed(path) => Some(path),
            _ => None,
        }
    }
}

// ── RunReport ─────────────────────────────────────────────────────────────────

/// Counters accumulated over a run.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct RunStats {
    pub committed:       u64,
    pub deferred:        u64,
    pub failed:          u64,
    /// Steps at which at least one task was planned.
    pub steps_processed: u64,
    pub planner_calls:   u64,
}

/// Everything a run produced.
#[derive(Clone, Debug, Default)]
pub struct RunReport {
    pub outcomes:   BTreeMap<AgentId, Vec<TaskOutcome>>,
    /// Last step at which a task was planned.
    pub final_step: Step,
    pub stats:      RunStats,
}

impl RunReport {
    /// Committed paths of `agent`, in task order.
    pub fn paths(&self, agent: AgentId) -> impl Iterator<Item = &CommittedPath> + '_ {
        self.outcomes
            .get(&agent)
            .into_iter()
            .flatten()
            .filter_map(TaskOutcome::path)
    }
}
