//! `ReservationTable` — append-only record of claimed space-time cells.

use std::fmt;

use rustc_hash::FxHashMap;

use mapf_core::{AgentId, CommittedPath, Position, Region, Step};

use crate::ReservationView;

// ── GoalHold ──────────────────────────────────────────────────────────────────

/// How long a committed goal stays reserved after arrival.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GoalHold {
    /// Reserve the goal for this many steps after the arrival step.
    Steps(u64),
    /// Reserve the goal from the arrival step onward, permanently.
    Forever,
}

impl GoalHold {
    /// Release the goal on arrival.
    pub const NONE: GoalHold = GoalHold::Steps(0);
}

impl Default for GoalHold {
    fn default() -> Self {
        GoalHold::NONE
    }
}

// ── Conflict ──────────────────────────────────────────────────────────────────

/// The first clash found between a candidate path and the table.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Conflict {
    /// `other` already stands on `position` at `step`.
    Vertex { position: Position, step: Step, other: AgentId },
    /// `other` already moves `to → from` while the candidate moves
    /// `from → to` during `step → step+1`.
    Swap { from: Position, to: Position, step: Step, other: AgentId },
}

impl Conflict {
    /// The agent owning the clashing reservation.
    pub fn other(&self) -> AgentId {
        match *self {
            Conflict::Vertex { other, .. } | Conflict::Swap { other, .. } => other,
        }
    }

    pub fn step(&self) -> Step {
        match *self {
            Conflict::Vertex { step, .. } | Conflict::Swap { step, .. } => step,
        }
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conflict::Vertex { position, step, other } => {
                write!(f, "vertex conflict with {other} at {position}@{step}")
            }
            Conflict::Swap { from, to, step, other } => {
                write!(f, "swap conflict with {other} on {from}↔{to} at {step}")
            }
        }
    }
}

// ── ReservationTable ──────────────────────────────────────────────────────────

/// Vertex, edge, and permanent reservations, each tagged with its owner.
///
/// Owners let the scheduler ignore an agent's own goal hold when that agent's
/// next task starts on the held cell, and let conflicts name the other party.
/// Cloning yields an independent snapshot.
#[derive(Clone, Debug, Default)]
pub struct ReservationTable {
    vertices:     FxHashMap<Step, FxHashMap<Position, AgentId>>,
    edges:        FxHashMap<Step, FxHashMap<(Position, Position), AgentId>>,
    parked:       FxHashMap<Position, (Step, AgentId)>,
    /// Latest finite vertex reservation per cell.
    latest:       FxHashMap<Position, Step>,
    horizon:      Step,
    /// Rectangle covering every reserved cell.
    extent:       Option<Region>,
    vertex_count: usize,
    edge_count:   usize,
}

impl ReservationTable {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Writes ────────────────────────────────────────────────────────────

    /// Register every waypoint of `path` as a vertex reservation and every
    /// consecutive pair as a directed edge reservation at the earlier step.
    ///
    /// Cells already held (by anyone) keep their original owner, so
    /// committing the same path twice leaves the table unchanged.
    pub fn occupy(&mut self, agent: AgentId, path: &CommittedPath) {
        for state in path.states() {
            self.insert_vertex(agent, state.position, state.step);
        }
        for (from, to, step) in path.edges() {
            self.insert_edge(agent, from, to, step);
        }
    }

    /// Reserve `pos` for `steps` consecutive steps starting at `from`.
    pub fn hold(&mut self, agent: AgentId, pos: Position, from: Step, steps: u64) {
        for k in 0..steps {
            self.insert_vertex(agent, pos, from + k);
        }
    }

    /// Reserve `pos` for every step from `from` onward.
    pub fn park(&mut self, agent: AgentId, pos: Position, from: Step) {
        self.parked.entry(pos).or_insert((from, agent));
        self.horizon = self.horizon.max(from);
        self.cover(pos);
    }

    /// Occupy `path` and reserve its goal according to `hold`.
    pub fn commit(&mut self, agent: AgentId, path: &CommittedPath, hold: GoalHold) {
        self.occupy(agent, path);
        match hold {
            GoalHold::Steps(k) => self.hold(agent, path.goal(), path.end_step().next(), k),
            GoalHold::Forever  => self.park(agent, path.goal(), path.end_step()),
        }
    }

    fn insert_vertex(&mut self, agent: AgentId, pos: Position, step: Step) {
        let slot = self.vertices.entry(step).or_default();
        if slot.contains_key(&pos) {
            return;
        }
        slot.insert(pos, agent);
        self.vertex_count += 1;

        let latest = self.latest.entry(pos).or_insert(step);
        *latest = (*latest).max(step);
        self.horizon = self.horizon.max(step);
        self.cover(pos);
    }

    fn cover(&mut self, pos: Position) {
        self.extent.get_or_insert(Region::around(pos)).include(pos);
    }

    fn insert_edge(&mut self, agent: AgentId, from: Position, to: Position, step: Step) {
        let slot = self.edges.entry(step).or_default();
        if slot.contains_key(&(from, to)) {
            return;
        }
        slot.insert((from, to), agent);
        self.edge_count += 1;
    }

    // ── Reads ─────────────────────────────────────────────────────────────

    /// Who stands on `pos` at `step`, if anyone.
    pub fn occupant(&self, pos: Position, step: Step) -> Option<AgentId> {
        self.vertices
            .get(&step)
            .and_then(|slot| slot.get(&pos).copied())
            .or_else(|| match self.parked.get(&pos) {
                Some(&(from, owner)) if from <= step => Some(owner),
                _ => None,
            })
    }

    /// Who moves exactly `from → to` during `step → step+1`, if anyone.
    pub fn edge_owner(&self, from: Position, to: Position, step: Step) -> Option<AgentId> {
        self.edges
            .get(&step)
            .and_then(|slot| slot.get(&(from, to)).copied())
    }

    /// `true` if any vertex, edge, or parked reservation belongs to `agent`.
    pub fn has_entries_for(&self, agent: AgentId) -> bool {
        self.vertices.values().any(|slot| slot.values().any(|&o| o == agent))
            || self.edges.values().any(|slot| slot.values().any(|&o| o == agent))
            || self.parked.values().any(|&(_, o)| o == agent)
    }

    /// Check a candidate path of `agent` (and the goal reservation it would
    /// make) against everything other agents hold.
    ///
    /// Returns the earliest conflict in path order, vertex before swap at the
    /// same step, then goal-hold conflicts.
    pub fn find_conflict(
        &self,
        agent: AgentId,
        path:  &CommittedPath,
        hold:  GoalHold,
    ) -> Option<Conflict> {
        let foreign = |owner: Option<AgentId>| owner.filter(|&o| o != agent);

        let states = path.states();
        for (i, state) in states.iter().enumerate() {
            if let Some(other) = foreign(self.occupant(state.position, state.step)) {
                return Some(Conflict::Vertex {
                    position: state.position,
                    step:     state.step,
                    other,
                });
            }
            if let Some(next) = states.get(i + 1) {
                let (from, to) = (state.position, next.position);
                if from != to {
                    if let Some(other) = foreign(self.edge_owner(to, from, state.step)) {
                        return Some(Conflict::Swap { from, to, step: state.step, other });
                    }
                }
            }
        }

        let goal = path.goal();
        let after = path.end_step().next();
        let last = match hold {
            GoalHold::Steps(0) => return None,
            GoalHold::Steps(k) => after + (k - 1),
            // Past the horizon only permanent reservations remain, and those
            // are visible from `horizon + 1` on.
            GoalHold::Forever  => self.horizon.next().max(after),
        };
        let mut step = after;
        while step <= last {
            if let Some(other) = foreign(self.occupant(goal, step)) {
                return Some(Conflict::Vertex { position: goal, step, other });
            }
            step = step.next();
        }
        None
    }

    /// Number of distinct vertex reservations (permanent ones excluded).
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of distinct directed edge reservations.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of permanently reserved cells.
    pub fn parked_count(&self) -> usize {
        self.parked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_count == 0 && self.edge_count == 0 && self.parked.is_empty()
    }
}

impl ReservationView for ReservationTable {
    #[inline]
    fn is_occupied(&self, pos: Position, step: Step) -> bool {
        self.occupant(pos, step).is_some()
    }

    #[inline]
    fn is_edge_reserved(&self, from: Position, to: Position, step: Step) -> bool {
        self.edges
            .get(&step)
            .is_some_and(|slot| slot.contains_key(&(from, to)))
    }

    fn is_reserved_after(&self, pos: Position, step: Step) -> bool {
        self.parked.contains_key(&pos)
            || self.latest.get(&pos).is_some_and(|&last| last > step)
    }

    #[inline]
    fn horizon(&self) -> Step {
        self.horizon
    }

    fn extent(&self) -> Option<Region> {
        self.extent
    }
}

// ── AgentView ─────────────────────────────────────────────────────────────────

/// The table as seen by one agent: its own vertex and edge reservations are
/// transparent.
///
/// Used when an agent plans its next task from the goal of the previous
/// one, where its own goal hold would otherwise pin it in place.
/// `is_reserved_after` still counts the agent's own entries.
#[derive(Copy, Clone, Debug)]
pub struct AgentView<'a> {
    table: &'a ReservationTable,
    agent: AgentId,
}

impl ReservationTable {
    pub fn view_for(&self, agent: AgentId) -> AgentView<'_> {
        AgentView { table: self, agent }
    }
}

impl AgentView<'_> {
    pub fn agent(&self) -> AgentId {
        self.agent
    }
}

impl ReservationView for AgentView<'_> {
    #[inline]
    fn is_occupied(&self, pos: Position, step: Step) -> bool {
        self.table.occupant(pos, step).is_some_and(|o| o != self.agent)
    }

    #[inline]
    fn is_edge_reserved(&self, from: Position, to: Position, step: Step) -> bool {
        self.table.edge_owner(from, to, step).is_some_and(|o| o != self.agent)
    }

    fn is_reserved_after(&self, pos: Position, step: Step) -> bool {
        self.table.is_reserved_after(pos, step)
    }

    #[inline]
    fn horizon(&self) -> Step {
        self.table.horizon()
    }

    fn extent(&self) -> Option<Region> {
        self.table.extent()
    }
}
