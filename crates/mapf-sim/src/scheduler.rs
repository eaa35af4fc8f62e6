//! The `Scheduler` struct and its step loop.

use std::collections::BTreeMap;

use mapf_core::{AgentId, CommittedPath, Grid, SchedulerConfig, Step};
use mapf_planner::{PlanError, PlanQuery, PlanResult, Planner, SearchScratch};
use mapf_reserve::{GoalHold, ReservationTable};
use mapf_schedule::{AgentQueue, ReadyEntry, ReadyQueue};

use crate::{
    DeferReason, DeferralRecord, RunReport, RunStats, SchedulerObserver, SimResult, TaskFailure,
    TaskOutcome,
};

// ── Scheduler ─────────────────────────────────────────────────────────────────

/// The continuous scheduler.
///
/// Drives the batch loop:
///
/// 1. **Pop**: take every entry of the earliest ready step.  Steps with
///    nothing ready are skipped.
/// 2. **Plan** (optionally parallel with the `parallel` feature): search
///    every task of the batch against the reservation table as it stands at
///    the start of the step.
/// 3. **Resolve** (sequential, registration order): re-check each path
///    against the live table, then commit, defer, or fail it.
///
/// Create via [`SchedulerBuilder`][crate::SchedulerBuilder].
pub struct Scheduler<P: Planner> {
    pub config: SchedulerConfig,

    /// Static map: bounds and obstacles.
    pub grid: Grid,

    /// Every committed path and goal hold so far.  Only the resolve phase
    /// writes to it.
    pub table: ReservationTable,

    pub(crate) planner:  P,
    /// Task backlogs indexed by registration rank.
    pub(crate) agents:   Vec<AgentQueue>,
    pub(crate) ready:    ReadyQueue,
    pub(crate) outcomes: BTreeMap<AgentId, Vec<TaskOutcome>>,
    pub(crate) stats:    RunStats,
    pub(crate) current:  Step,
}

impl<P: Planner> Scheduler<P> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Process batches until the ready queue is empty and return the report.
    ///
    /// Outcome logs are moved into the report; the reservation table stays
    /// with the scheduler.
    pub fn run<O: SchedulerObserver>(&mut self, observer: &mut O) -> SimResult<RunReport> {
        while self.run_step(observer)?.is_some() {}

        let report = RunReport {
            outcomes:   std::mem::take(&mut self.outcomes),
            final_step: self.current,
            stats:      self.stats,
        };
        tracing::debug!(
            final_step = report.final_step.0,
            committed  = report.stats.committed,
            deferred   = report.stats.deferred,
            failed     = report.stats.failed,
            "schedule complete"
        );
        observer.on_run_end(&report);
        Ok(report)
    }

    /// Process the earliest ready batch only.
    ///
    /// Returns the step that was processed, or `None` if nothing was ready.
    pub fn run_step<O: SchedulerObserver>(&mut self, observer: &mut O) -> SimResult<Option<Step>> {
        let Some((now, batch)) = self.ready.pop_batch() else {
            return Ok(None);
        };
        self.current = now;

        observer.on_step_start(now, batch.len());
        let planned = batch.len();
        self.process_batch(now, batch, observer)?;
        observer.on_step_end(now, planned);

        self.stats.steps_processed += 1;
        Ok(Some(now))
    }

    /// The most recently processed step.
    pub fn current_step(&self) -> Step {
        self.current
    }

    /// Step of the next batch, if any task is still pending.
    pub fn next_step(&self) -> Option<Step> {
        self.ready.next_step()
    }

    pub fn is_finished(&self) -> bool {
        self.ready.is_empty()
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    // ── Batch processing ──────────────────────────────────────────────────

    fn process_batch<O: SchedulerObserver>(
        &mut self,
        now:      Step,
        batch:    Vec<ReadyEntry>,
        observer: &mut O,
    ) -> SimResult<()> {
        // ── Plan against the start-of-step snapshot ───────────────────────
        let jobs: Vec<(ReadyEntry, PlanQuery)> = batch
            .into_iter()
            .map(|entry| {
                let query = PlanQuery::new(entry.task.start, entry.task.goal, now)
                    .with_goal_hold(self.goal_hold_for(&entry));
                (entry, query)
            })
            .collect();
        let results = self.plan_batch(&jobs);
        self.stats.planner_calls += jobs.len() as u64;

        // ── Resolve in registration order ─────────────────────────────────
        //
        // Entries of one step arrive sorted by rank, so commits happen in the
        // same order whether or not planning ran in parallel.
        for ((entry, query), result) in jobs.into_iter().zip(results) {
            match result {
                Ok(path) => match self.table.find_conflict(entry.agent, &path, query.goal_hold) {
                    None => self.commit(entry, path, query.goal_hold, observer),
                    Some(conflict) => {
                        self.defer(entry, now, DeferReason::Conflict(conflict), observer);
                    }
                },
                Err(PlanError::Exhausted { .. }) => {
                    self.defer(entry, now, DeferReason::NoPath, observer);
                }
                Err(PlanError::InvalidTask { position, reason }) => {
                    self.fail(entry, now, TaskFailure::InvalidTask { position, reason }, observer);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Run the planner for every job of a batch.
    ///
    /// Every call sees the same `&ReservationTable`, so no result can depend
    /// on another call of the same batch.
    fn plan_batch(&self, jobs: &[(ReadyEntry, PlanQuery)]) -> Vec<PlanResult<CommittedPath>> {
        let planner = &self.planner;
        let grid    = &self.grid;
        let table   = &self.table;

        #[cfg(not(feature = "parallel"))]
        {
            let mut scratch = SearchScratch::new();
            jobs.iter()
                .map(|(entry, query)| {
                    planner.plan_with(&mut scratch, grid, &table.view_for(entry.agent), query)
                })
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            jobs.par_iter()
                .map_init(SearchScratch::new, |scratch, (entry, query)| {
                    planner.plan_with(scratch, grid, &table.view_for(entry.agent), query)
                })
                .collect()
        }
    }

    /// How long the goal of `entry` stays reserved once it commits.
    fn goal_hold_for(&self, entry: &ReadyEntry) -> GoalHold {
        let last = self.agents[entry.rank].is_empty();
        if last && self.config.park_at_final_goal {
            GoalHold::Forever
        } else {
            GoalHold::Steps(self.config.goal_hold_steps)
        }
    }

    // ── Resolution ────────────────────────────────────────────────────────

    fn commit<O: SchedulerObserver>(
        &mut self,
        entry:    ReadyEntry,
        path:     CommittedPath,
        hold:     GoalHold,
        observer: &mut O,
    ) {
        self.table.commit(entry.agent, &path, hold);
        self.stats.committed += 1;
        tracing::debug!(
            agent    = entry.agent.0,
            task     = entry.task_index,
            start    = path.start_step().0,
            end      = path.end_step().0,
            attempts = entry.attempts,
            "path committed"
        );
        observer.on_commit(entry.agent, entry.task_index, &path);

        let next_ready = path.end_step().next();
        self.log(entry.agent, TaskOutcome::Committed(path));
        self.enqueue_next(entry.rank, next_ready);
    }

    fn defer<O: SchedulerObserver>(
        &mut self,
        entry:    ReadyEntry,
        now:      Step,
        reason:   DeferReason,
        observer: &mut O,
    ) {
        if entry.attempts >= self.config.max_retries {
            let attempts = entry.attempts + 1;
            tracing::warn!(
                agent = entry.agent.0,
                task  = entry.task_index,
                step  = now.0,
                attempts,
                %reason,
                "retry limit exceeded"
            );
            self.fail(entry, now, TaskFailure::RetryLimitExceeded { attempts }, observer);
            return;
        }

        let record = DeferralRecord {
            requested_step: now,
            start:          entry.task.start,
            goal:           entry.task.goal,
            reason,
        };
        let retry = entry.retry_at(now.next());
        self.stats.deferred += 1;
        tracing::debug!(
            agent    = entry.agent.0,
            task     = entry.task_index,
            step     = now.0,
            attempts = retry.attempts,
            %reason,
            "task deferred"
        );
        observer.on_defer(entry.agent, entry.task_index, &record, retry.attempts);
        self.log(entry.agent, TaskOutcome::Deferred(record));
        self.ready.push(retry);
    }

    fn fail<O: SchedulerObserver>(
        &mut self,
        entry:    ReadyEntry,
        now:      Step,
        failure:  TaskFailure,
        observer: &mut O,
    ) {
        self.stats.failed += 1;
        tracing::debug!(
            agent = entry.agent.0,
            task  = entry.task_index,
            step  = now.0,
            %failure,
            "task failed"
        );
        observer.on_failure(entry.agent, entry.task_index, &entry.task, now, &failure);
        self.log(entry.agent, TaskOutcome::Failed(failure));
        self.enqueue_next(entry.rank, now.next());
    }

    fn log(&mut self, agent: AgentId, outcome: TaskOutcome) {
        self.outcomes.entry(agent).or_default().push(outcome);
    }

    /// Hand the agent's next task to the ready queue, not before `after` and
    /// not before the task's own earliest step.
    fn enqueue_next(&mut self, rank: usize, after: Step) {
        let queue = &mut self.agents[rank];
        let Some(earliest) = queue.next_earliest() else {
            return;
        };
        if let Some(entry) = queue.next_entry(after.max(earliest)) {
            self.ready.push(entry);
        }
    }
}
