//! `OutputObserver<W>` — bridges `SchedulerObserver` to an `OutputWriter`.

use mapf_core::{AgentId, CommittedPath, Position, Step};
use mapf_schedule::Task;
use mapf_sim::{DeferralRecord, RunReport, SchedulerObserver, TaskFailure};

use crate::row::{OutcomeKind, OutcomeRow, PathRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SchedulerObserver`] that writes committed paths and every outcome
/// to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SchedulerObserver`
/// methods have no return value.  After `scheduler.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct OutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> OutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `scheduler.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }

    fn outcome(
        &mut self,
        agent:      AgentId,
        task_index: usize,
        outcome:    OutcomeKind,
        step:       Step,
        endpoints:  (Position, Position),
        detail:     String,
    ) {
        let (start, goal) = endpoints;
        let row = OutcomeRow {
            agent_id:   agent.0,
            task_index,
            outcome,
            step:       step.0,
            start_x:    start.x,
            start_y:    start.y,
            goal_x:     goal.x,
            goal_y:     goal.y,
            detail,
        };
        let result = self.writer.write_outcome(&row);
        self.store_err(result);
    }
}

impl<W: OutputWriter> SchedulerObserver for OutputObserver<W> {
    fn on_commit(&mut self, agent: AgentId, task_index: usize, path: &CommittedPath) {
        let rows: Vec<PathRow> = path
            .states()
            .iter()
            .map(|s| PathRow {
                agent_id:   agent.0,
                task_index,
                step:       s.step.0,
                x:          s.position.x,
                y:          s.position.y,
            })
            .collect();
        let result = self.writer.write_path(&rows);
        self.store_err(result);

        self.outcome(
            agent,
            task_index,
            OutcomeKind::Committed,
            path.start_step(),
            (path.start(), path.goal()),
            format!("arrives {}", path.end_step()),
        );
    }

    fn on_defer(&mut self, agent: AgentId, task_index: usize, record: &DeferralRecord, _attempts: u32) {
        self.outcome(
            agent,
            task_index,
            OutcomeKind::Deferred,
            record.requested_step,
            (record.start, record.goal),
            record.reason.to_string(),
        );
    }

    fn on_failure(
        &mut self,
        agent:      AgentId,
        task_index: usize,
        task:       &Task,
        step:       Step,
        failure:    &TaskFailure,
    ) {
        self.outcome(
            agent,
            task_index,
            OutcomeKind::Failed,
            step,
            (task.start, task.goal),
            failure.to_string(),
        );
    }

    fn on_run_end(&mut self, _report: &RunReport) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
