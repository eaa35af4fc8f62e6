use mapf_core::AgentId;
use mapf_planner::PlanError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("scheduler configuration error: {0}")]
    Config(String),

    #[error("{0} registered more than once")]
    DuplicateAgent(AgentId),

    /// A planner returned something other than a path or a recoverable
    /// outcome.
    #[error("planner error: {0}")]
    Plan(#[from] PlanError),
}

pub type SimResult<T> = Result<T, SimError>;
