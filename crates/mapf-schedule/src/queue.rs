//! Per-agent task FIFOs and the step-ordered ready queue.
//!
//! # Why two queues
//!
//! An agent's tasks are strictly sequential: task `n + 1` cannot become ready
//! until task `n` has committed (or failed), because its ready step depends
//! on when task `n` finishes.  So each agent keeps its backlog in an
//! [`AgentQueue`] and exposes at most one task at a time to the scheduler via
//! the shared [`ReadyQueue`].
//!
//! # Ordering
//!
//! `ReadyQueue` is a `BTreeMap<Step, Vec<ReadyEntry>>` like a sparse wake
//! queue.  Each per-step bucket is kept sorted by registration rank, so
//! draining a step yields entries in the order agents were registered,
//! regardless of the order in which they were pushed.

use std::collections::{BTreeMap, VecDeque};

use mapf_core::{AgentId, Step};

use crate::Task;

// ── AgentQueue ────────────────────────────────────────────────────────────────

/// FIFO of one agent's pending tasks.
#[derive(Clone, Debug)]
pub struct AgentQueue {
    agent:      AgentId,
    /// Registration order; ties in the ready queue are broken by this.
    rank:       usize,
    pending:    VecDeque<Task>,
    /// Index of the next task to be handed out.
    next_index: usize,
}

impl AgentQueue {
    pub fn new(agent: AgentId, rank: usize, tasks: impl IntoIterator<Item = Task>) -> Self {
        Self { agent, rank, pending: tasks.into_iter().collect(), next_index: 0 }
    }

    pub fn agent(&self) -> AgentId {
        self.agent
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Hand out the next task as a ready entry due at `ready`.
    ///
    /// Returns `None` once the backlog is empty.
    pub fn next_entry(&mut self, ready: Step) -> Option<ReadyEntry> {
        let task = self.pending.pop_front()?;
        let entry = ReadyEntry {
            agent:      self.agent,
            rank:       self.rank,
            task_index: self.next_index,
            task,
            ready,
            attempts:   0,
        };
        self.next_index += 1;
        Some(entry)
    }

    /// Step at which the next task may start, if there is one.
    pub fn next_earliest(&self) -> Option<Step> {
        self.pending.front().map(|t| t.earliest)
    }

    /// Tasks not yet handed out.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

// ── ReadyEntry ────────────────────────────────────────────────────────────────

/// One task waiting to be planned.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ReadyEntry {
    pub agent:      AgentId,
    pub rank:       usize,
    /// Position of the task in the agent's original task list.
    pub task_index: usize,
    pub task:       Task,
    /// Step at which planning is attempted; the path starts here.
    pub ready:      Step,
    /// Failed planning attempts so far.
    pub attempts:   u32,
}

impl ReadyEntry {
    /// The same task, one more failed attempt, due at `ready`.
    pub fn retry_at(mut self, ready: Step) -> Self {
        self.attempts += 1;
        self.ready = ready;
        self
    }
}

// ── ReadyQueue ────────────────────────────────────────────────────────────────

/// Step-ordered queue of ready tasks.
#[derive(Debug, Default)]
pub struct ReadyQueue {
    inner: BTreeMap<Step, Vec<ReadyEntry>>,
    /// Cached total entry count for O(1) `len()`.
    total: usize,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue `entry` at `entry.ready`, after any entry of lower or equal
    /// rank already due at that step.
    pub fn push(&mut self, entry: ReadyEntry) {
        let bucket = self.inner.entry(entry.ready).or_default();
        let at = bucket.partition_point(|e| e.rank <= entry.rank);
        bucket.insert(at, entry);
        self.total += 1;
    }

    /// Remove and return the earliest step and every entry due at it.
    pub fn pop_batch(&mut self) -> Option<(Step, Vec<ReadyEntry>)> {
        let (step, batch) = self.inner.pop_first()?;
        self.total -= batch.len();
        Some((step, batch))
    }

    /// The earliest step with at least one entry.
    pub fn next_step(&self) -> Option<Step> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
