//! A single start → goal assignment.

use std::fmt;

use mapf_core::{AgentId, Position, Step};

/// One task for one agent.
///
/// `earliest` is the first step at which the agent may leave `start`.  It is
/// the ready step only for an agent's first task; later tasks become ready
/// when the previous one finishes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Task {
    pub agent:    AgentId,
    pub start:    Position,
    pub goal:     Position,
    pub earliest: Step,
}

impl Task {
    pub fn new(agent: AgentId, start: Position, goal: Position, earliest: Step) -> Self {
        Self { agent, start, goal, earliest }
    }

    /// `true` when no movement is required.
    #[inline]
    pub fn is_stationary(&self) -> bool {
        self.start == self.goal
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} → {} from {}", self.agent, self.start, self.goal, self.earliest)
    }
}
