//! Scheduler configuration.
//!
//! Typically loaded from a TOML/JSON file by the application crate (enable
//! the `serde` feature) and passed to `mapf_sim::SchedulerBuilder`.

/// Top-level planning configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SchedulerConfig {
    /// How many times a single task may be deferred.  The next failed
    /// attempt after that is reported as `RetryLimitExceeded`.
    pub max_retries: u32,

    /// Offer a wait (stay in place) move during search.  Without it an agent
    /// can only dodge a reservation by detouring.
    pub allow_wait: bool,

    /// Steps a committed goal stays reserved after arrival.  The default of 1
    /// covers the step at which the agent's next task becomes ready; 0
    /// releases the goal on arrival.
    pub goal_hold_steps: u64,

    /// Reserve an agent's final goal for all future steps once its last task
    /// commits.
    pub park_at_final_goal: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_retries:        16,
            allow_wait:         true,
            goal_hold_steps:    1,
            park_at_final_goal: false,
        }
    }
}
