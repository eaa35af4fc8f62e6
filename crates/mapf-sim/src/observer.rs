//! Scheduler observer trait for progress reporting and data collection.

use mapf_core::{AgentId, CommittedPath, Step};
use mapf_schedule::Task;

use crate::{DeferralRecord, RunReport, TaskFailure};

/// Callbacks invoked by [`Scheduler::run`][crate::Scheduler::run] at key
/// points in the loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  `task_index` is the position of the task
/// in the agent's original task list.
///
/// # Example — conflict counter
///
/// ```rust,ignore
/// struct Deferrals(usize);
///
/// impl SchedulerObserver for Deferrals {
///     fn on_defer(&mut self, _agent: AgentId, _task: usize, _r: &DeferralRecord, _n: u32) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SchedulerObserver {
    /// Called before the tasks ready at `step` are planned.
    fn on_step_start(&mut self, _step: Step, _ready: usize) {}

    /// Called after every task of `step` has been resolved.
    fn on_step_end(&mut self, _step: Step, _planned: usize) {}

    /// Called when a path is written into the reservation table.
    fn on_commit(&mut self, _agent: AgentId, _task_index: usize, _path: &CommittedPath) {}

    /// Called when an attempt is deferred.  `attempts` counts failed attempts
    /// of this task so far, this one included.
    fn on_defer(
        &mut self,
        _agent:      AgentId,
        _task_index: usize,
        _record:     &DeferralRecord,
        _attempts:   u32,
    ) {}

    /// Called when a task is abandoned at `step`.
    fn on_failure(
        &mut self,
        _agent:      AgentId,
        _task_index: usize,
        _task:       &Task,
        _step:       Step,
        _failure:    &TaskFailure,
    ) {}

    /// Called once after the ready queue has drained.
    fn on_run_end(&mut self, _report: &RunReport) {}
}

/// A [`SchedulerObserver`] that does nothing.
pub struct NoopObserver;

impl SchedulerObserver for NoopObserver {}
