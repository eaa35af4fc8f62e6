//! Planner trait and the default time-expanded A* implementation.
//!
//! # Pluggability
//!
//! `mapf-sim` calls search through the [`Planner`] trait, so applications can
//! swap in another single-agent search without touching the scheduler.  The
//! default [`SpaceTimeAStar`] is optimal in steps for every query it answers.
//!
//! # Termination
//!
//! The reservation view reports a horizon after which every time slice looks
//! the same.  Closed-set keys clamp their step to `horizon + 1`, which makes
//! the explored state space finite in time even with the wait move enabled.
//! Space is finite on a bounded [`Grid`].  On an unbounded one the search is
//! kept inside the rectangle covering the endpoints, the known obstacles and
//! every reservation, padded by [`PlannerConfig::open_margin`].  No step bound
//! is needed: a task that is fully boxed in ends with [`PlanError::Exhausted`]
//! once every reachable `(cell, clamped step)` is closed.

use mapf_core::{
    heuristic, neighbors, CommittedPath, Grid, Position, Region, SchedulerConfig, SpaceTimeState,
    Step,
};
use mapf_reserve::{GoalHold, ReservationView};

use crate::{InvalidReason, PlanError, PlanResult, SearchNode, SearchScratch};

// ── PlanQuery / PlannerConfig ─────────────────────────────────────────────────

/// One single-agent planning request.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct PlanQuery {
    pub start:      Position,
    pub goal:       Position,
    /// Step at which the agent stands on `start`.
    pub start_step: Step,
    /// How long the goal must stay free after arrival for the arrival to
    /// count.
    pub goal_hold:  GoalHold,
}

impl PlanQuery {
    pub fn new(start: Position, goal: Position, start_step: Step) -> Self {
        Self { start, goal, start_step, goal_hold: GoalHold::NONE }
    }

    pub fn with_goal_hold(mut self, goal_hold: GoalHold) -> Self {
        self.goal_hold = goal_hold;
        self
    }
}

/// Search options for [`SpaceTimeAStar`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannerConfig {
    /// Offer a wait move in addition to the four unit moves.
    pub allow_wait:  bool,
    /// Padding around the map's known features on an unbounded grid.
    ///
    /// Any value of at least 1 keeps every shortest path when all obstacles
    /// are enumerable ([`BlockedCells`][mapf_core::BlockedCells]).  Closure
    /// obstacles report no extent, so routes around them may not leave the
    /// padded rectangle.
    pub open_margin: u32,
}

impl PlannerConfig {
    pub const DEFAULT_OPEN_MARGIN: u32 = 64;
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self { allow_wait: true, open_margin: Self::DEFAULT_OPEN_MARGIN }
    }
}

impl From<&SchedulerConfig> for PlannerConfig {
    fn from(config: &SchedulerConfig) -> Self {
        Self { allow_wait: config.allow_wait, ..Self::default() }
    }
}

// ── Planner trait ─────────────────────────────────────────────────────────────

/// Pluggable single-agent search.
///
/// # Contract
///
/// - Pure: the result depends only on the arguments.  Identical inputs give
///   identical paths.
/// - Never returns a path that hits an occupied cell or reserved edge of
///   `reservations` after `query.start_step`.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one planner can serve a whole
/// step's batch on Rayon worker threads.
pub trait Planner: Send + Sync {
    /// Plan using caller-provided working memory.
    fn plan_with(
        &self,
        scratch:      &mut SearchScratch,
        grid:         &Grid,
        reservations: &dyn ReservationView,
        query:        &PlanQuery,
    ) -> PlanResult<CommittedPath>;

    /// Plan with fresh working memory.
    fn plan(
        &self,
        grid:         &Grid,
        reservations: &dyn ReservationView,
        query:        &PlanQuery,
    ) -> PlanResult<CommittedPath> {
        self.plan_with(&mut SearchScratch::new(), grid, reservations, query)
    }
}

// ── SpaceTimeAStar ────────────────────────────────────────────────────────────

/// A* over `(position, step)` with the Manhattan heuristic.
#[derive(Copy, Clone, Debug, Default)]
pub struct SpaceTimeAStar {
    pub config: PlannerConfig,
}

impl SpaceTimeAStar {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }
}

impl Planner for SpaceTimeAStar {
    fn plan_with(
        &self,
        scratch:      &mut SearchScratch,
        grid:         &Grid,
        reservations: &dyn ReservationView,
        query:        &PlanQuery,
    ) -> PlanResult<CommittedPath> {
        check_endpoint(grid, query.start)?;
        check_endpoint(grid, query.goal)?;

        if query.start == query.goal {
            return Ok(CommittedPath::stationary(query.start, query.start_step));
        }

        let result = astar(self.config, scratch, grid, reservations, query);
        tracing::trace!(
            start    = %query.start,
            goal     = %query.goal,
            step     = query.start_step.0,
            expanded = scratch.expanded(),
            found    = result.is_ok(),
            "space-time search finished"
        );
        result
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

fn check_endpoint(grid: &Grid, pos: Position) -> PlanResult<()> {
    if !grid.contains(pos) {
        return Err(PlanError::InvalidTask { position: pos, reason: InvalidReason::OutOfBounds });
    }
    if grid.is_blocked(pos) {
        return Err(PlanError::InvalidTask { position: pos, reason: InvalidReason::Blocked });
    }
    Ok(())
}

/// Cells the search may enter beyond the grid's own bounds, or `None` when
/// the grid is bounded.
fn search_region(
    grid:         &Grid,
    reservations: &dyn ReservationView,
    query:        &PlanQuery,
    margin:       u32,
) -> Option<Region> {
    if grid.bounds().is_some() {
        return None;
    }
    let mut region = Region::around(query.start);
    region.include(query.goal);
    for known in [grid.obstacle_extent(), reservations.extent()].into_iter().flatten() {
        region = region.union(known);
    }
    Some(region.expand(margin))
}

/// Closed-set key: steps past the horizon are indistinguishable.
#[inline]
fn key(state: SpaceTimeState, ceiling: Step) -> SpaceTimeState {
    SpaceTimeState::new(state.position, state.step.min(ceiling))
}

/// `true` if standing on `goal` from `arrival` honours `hold`.
fn goal_stays_free(
    reservations: &dyn ReservationView,
    goal:         Position,
    arrival:      Step,
    hold:         GoalHold,
) -> bool {
    match hold {
        GoalHold::Steps(k) => (1..=k).all(|i| !reservations.is_occupied(goal, arrival + i)),
        GoalHold::Forever  => !reservations.is_reserved_after(goal, arrival),
    }
}

fn astar(
    config:       PlannerConfig,
    scratch:      &mut SearchScratch,
    grid:         &Grid,
    reservations: &dyn ReservationView,
    query:        &PlanQuery,
) -> PlanResult<CommittedPath> {
    scratch.reset();
    let ceiling = reservations.horizon().next();
    let region = search_region(grid, reservations, query, config.open_margin);
    let goal = query.goal;

    let root = SpaceTimeState::new(query.start, query.start_step);
    scratch.best_g.insert(key(root, ceiling), 0);
    scratch.push(SearchNode { state: root, g: 0, h: heuristic(query.start, goal), parent: None });

    while let Some(current) = scratch.pop() {
        let node = *scratch.arena.get(current);
        if !scratch.closed.insert(key(node.state, ceiling)) {
            continue;
        }
        scratch.expanded += 1;

        let pos = node.state.position;
        let now = node.state.step;

        if pos == goal && goal_stays_free(reservations, goal, now, query.goal_hold) {
            let states = scratch.arena.path_to(current);
            return Ok(CommittedPath::new(states)?);
        }

        let next = now.next();
        let waits = config.allow_wait.then_some(pos);
        for candidate in neighbors(pos).chain(waits) {
            if !grid.is_traversable(candidate)
                || region.is_some_and(|r| !r.contains(candidate))
                || reservations.is_occupied(candidate, next)
                || reservations.is_edge_reserved(pos, candidate, now)
                || reservations.is_edge_reserved(candidate, pos, now)
            {
                continue;
            }

            let state = SpaceTimeState::new(candidate, next);
            let k = key(state, ceiling);
            if scratch.closed.contains(&k) {
                continue;
            }
            let g = node.g + 1;
            if scratch.best_g.get(&k).is_some_and(|&best| best <= g) {
                continue;
            }
            scratch.best_g.insert(k, g);
            scratch.push(SearchNode { state, g, h: heuristic(candidate, goal), parent: Some(current) });
        }
    }

    Err(PlanError::Exhausted { start: query.start, goal, start_step: query.start_step })
}
