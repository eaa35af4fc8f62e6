//! `CommittedPath` — a contiguous space-time trajectory.

use std::fmt;

use crate::{MapfError, MapfResult, Move, Position, SpaceTimeState, Step};

/// An ordered sequence of `(Position, Step)` waypoints.
///
/// Guaranteed non-empty, contiguous in time (each waypoint one step after the
/// previous), and made only of unit moves or waits.  A single waypoint is a
/// zero-length path: the agent is already at its goal.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommittedPath {
    states: Vec<SpaceTimeState>,
}

impl CommittedPath {
    /// Validate and wrap a waypoint sequence.
    pub fn new(states: Vec<SpaceTimeState>) -> MapfResult<Self> {
        if states.is_empty() {
            return Err(MapfError::EmptyPath);
        }
        for (i, pair) in states.windows(2).enumerate() {
            let (a, b) = (pair[0], pair[1]);
            if b.step != a.step.next() {
                return Err(MapfError::Discontinuous { index: i + 1 });
            }
            if Move::between(a.position, b.position).is_none() {
                return Err(MapfError::IllegalMove { from: a.position, to: b.position });
            }
        }
        Ok(Self { states })
    }

    /// Build from positions visited at consecutive steps starting at `start`.
    pub fn from_positions(start: Step, positions: &[Position]) -> MapfResult<Self> {
        let states = positions
            .iter()
            .enumerate()
            .map(|(i, &p)| SpaceTimeState::new(p, start + i as u64))
            .collect();
        Self::new(states)
    }

    /// A zero-length path: stand on `pos` at `step`.
    pub fn stationary(pos: Position, step: Step) -> Self {
        Self { states: vec![SpaceTimeState::new(pos, step)] }
    }

    pub fn states(&self) -> &[SpaceTimeState] {
        &self.states
    }

    pub fn start(&self) -> Position {
        self.states[0].position
    }

    pub fn goal(&self) -> Position {
        self.states[self.states.len() - 1].position
    }

    pub fn start_step(&self) -> Step {
        self.states[0].step
    }

    /// Arrival step at the goal.
    pub fn end_step(&self) -> Step {
        self.states[self.states.len() - 1].step
    }

    /// Number of moves (waits included).
    pub fn len(&self) -> usize {
        self.states.len() - 1
    }

    /// `true` for a zero-length path.
    pub fn is_trivial(&self) -> bool {
        self.states.len() == 1
    }

    /// Where the path is at `step`, if the step is within its span.
    pub fn position_at(&self, step: Step) -> Option<Position> {
        if step < self.start_step() || step > self.end_step() {
            return None;
        }
        Some(self.states[step.since(self.start_step()) as usize].position)
    }

    /// Directed transitions `(from, to, step)`, where `step` is the time the
    /// move starts.  Waits appear as `from == to`.
    pub fn edges(&self) -> impl Iterator<Item = (Position, Position, Step)> + '_ {
        self.states
            .windows(2)
            .map(|w| (w[0].position, w[1].position, w[0].step))
    }

    /// The move sequence.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        // Validated at construction.
        self.edges()
            .filter_map(|(from, to, _)| Move::between(from, to))
    }

    pub fn wait_count(&self) -> usize {
        self.edges().filter(|(from, to, _)| from == to).count()
    }
}

impl fmt::Display for CommittedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}→{} [{}..{}]", self.start(), self.goal(), self.start_step(), self.end_step())
    }
}
