//! Fluent builder for constructing a [`Scheduler`].

use std::collections::{BTreeMap, BTreeSet};

use mapf_core::{AgentId, Grid, SchedulerConfig, Step};
use mapf_planner::{PlannerConfig, Planner, SpaceTimeAStar};
use mapf_reserve::ReservationTable;
use mapf_schedule::{AgentQueue, ReadyQueue, Task};

use crate::{RunStats, Scheduler, SimError, SimResult};

/// Fluent builder for [`Scheduler<P>`].
///
/// # Required inputs
///
/// - [`SchedulerConfig`] — retry cap, wait move, goal hold, parking
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                                   |
/// |----------------------|-------------------------------------------|
/// | `.planner(p)`        | `SpaceTimeAStar` configured from `config` |
/// | `.grid(g)`           | `Grid::open()`                            |
/// | `.agent(id, tasks)`  | No agents                                 |
/// | `.reservations(t)`   | Empty `ReservationTable`                  |
///
/// Agents are ranked in the order they are added; that rank breaks ties
/// between tasks ready at the same step.
///
/// # Example
///
/// ```rust,ignore
/// let tasks = load_tasks_csv(Path::new("tasks.csv"))?;
/// let mut scheduler = SchedulerBuilder::new(SchedulerConfig::default())
///     .grid(Grid::bounded(Bounds::new(32, 32)?))
///     .agents(tasks)
///     .build()?;
/// let report = scheduler.run(&mut NoopObserver)?;
/// ```
pub struct SchedulerBuilder<P: Planner> {
    config:       SchedulerConfig,
    planner:      P,
    grid:         Option<Grid>,
    agents:       Vec<(AgentId, Vec<Task>)>,
    reservations: Option<ReservationTable>,
}

impl SchedulerBuilder<SpaceTimeAStar> {
    /// Create a builder using the default planner.
    pub fn new(config: SchedulerConfig) -> Self {
        let planner = SpaceTimeAStar::new(PlannerConfig::from(&config));
        Self::with_planner(config, planner)
    }
}

impl<P: Planner> SchedulerBuilder<P> {
    /// Create a builder around a custom planner.
    pub fn with_planner(config: SchedulerConfig, planner: P) -> Self {
        Self {
            config,
            planner,
            grid:         None,
            agents:       Vec::new(),
            reservations: None,
        }
    }

    /// Swap the planner, keeping everything else.
    pub fn planner<Q: Planner>(self, planner: Q) -> SchedulerBuilder<Q> {
        SchedulerBuilder {
            config:       self.config,
            planner,
            grid:         self.grid,
            agents:       self.agents,
            reservations: self.reservations,
        }
    }

    /// Supply the static map.
    pub fn grid(mut self, grid: Grid) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Register one agent with its ordered task list.
    pub fn agent(mut self, agent: AgentId, tasks: Vec<Task>) -> Self {
        self.agents.push((agent, tasks));
        self
    }

    /// Register several agents, in ascending id order.
    pub fn agents(mut self, agents: BTreeMap<AgentId, Vec<Task>>) -> Self {
        self.agents.extend(agents);
        self
    }

    /// Start from an existing reservation table instead of an empty one.
    ///
    /// Entries in it must belong to agents outside this run (static traffic,
    /// parked robots) and are respected like any committed path.  An entry
    /// owned by a registered agent would be invisible to that agent's own
    /// searches, so [`build`][Self::build] rejects it.
    pub fn reservations(mut self, table: ReservationTable) -> Self {
        self.reservations = Some(table);
        self
    }

    /// Validate inputs, seed the ready queue, and return a ready-to-run
    /// [`Scheduler`].
    pub fn build(self) -> SimResult<Scheduler<P>> {
        // ── Validate agents ───────────────────────────────────────────────
        let mut seen = BTreeSet::new();
        for (agent, tasks) in &self.agents {
            if *agent == AgentId::INVALID {
                return Err(SimError::Config(format!("{agent} is reserved")));
            }
            if !seen.insert(*agent) {
                return Err(SimError::DuplicateAgent(*agent));
            }
            if let Some(task) = tasks.iter().find(|t| t.agent != *agent) {
                return Err(SimError::Config(format!(
                    "task for {} registered under {agent}", task.agent
                )));
            }
        }

        if let Some(table) = &self.reservations {
            if let Some(agent) = seen.iter().find(|&&a| table.has_entries_for(a)) {
                return Err(SimError::Config(format!(
                    "pre-populated reservations belong to registered {agent}"
                )));
            }
        }

        // ── Seed ready queue with each agent's first task ─────────────────
        let mut ready = ReadyQueue::new();
        let mut queues = Vec::with_capacity(self.agents.len());
        for (rank, (agent, tasks)) in self.agents.into_iter().enumerate() {
            let mut queue = AgentQueue::new(agent, rank, tasks);
            let first = queue.next_earliest().and_then(|earliest| queue.next_entry(earliest));
            if let Some(entry) = first {
                ready.push(entry);
            }
            queues.push(queue);
        }

        Ok(Scheduler {
            config:   self.config,
            grid:     self.grid.unwrap_or_default(),
            table:    self.reservations.unwrap_or_default(),
            planner:  self.planner,
            agents:   queues,
            ready,
            outcomes: BTreeMap::new(),
            stats:    RunStats::default(),
            current:  Step::ZERO,
        })
    }
}
