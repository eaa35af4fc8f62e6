//! `mapf-sim` — the continuous scheduler for the rust_mapf workspace.
//!
//! # Batch loop
//!
//! ```text
//! while ready queue not empty:
//!   ① Pop      — every task ready at the earliest pending step.
//!   ② Plan     — one planner call per task against the reservation table
//!                as it stood at the start of the step
//!                (parallel with the `parallel` feature).
//!   ③ Resolve  — for each task in agent registration order:
//!                  path, no conflict  → commit path + goal hold;
//!                                       next task ready at final step + 1
//!                  path, conflict     → deferred, retry at step + 1
//!                  no path            → deferred, retry at step + 1
//!                  too many retries   → failed; next task at step + 1
//!                  invalid endpoints  → failed; next task at step + 1
//! ```
//!
//! The re-check in ③ catches tasks whose snapshot path clashes with a path
//! committed earlier in the same batch.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the planning phase on Rayon's thread pool.        |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use mapf_core::{AgentId, Position, SchedulerConfig, Step};
//! use mapf_schedule::Task;
//! use mapf_sim::{NoopObserver, SchedulerBuilder};
//!
//! let a = AgentId(0);
//! let task = Task::new(a, Position::new(0, 0), Position::new(5, 5), Step(0));
//! let mut scheduler = SchedulerBuilder::new(SchedulerConfig::default())
//!     .agent(a, vec![task])
//!     .build()?;
//! let report = scheduler.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod outcome;
pub mod scheduler;


pub use builder::SchedulerBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SchedulerObserver};
pub use outcome::{DeferReason, DeferralRecord, RunReport, RunStats, TaskFailure, TaskOutcome};
pub use scheduler::Scheduler;
