//! `mapf-schedule` — agent tasks, the ready queue, and CSV loading.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`task`]   | `Task`                                                       |
//! | [`queue`]  | `AgentQueue` (per-agent FIFO), `ReadyQueue`, `ReadyEntry`    |
//! | [`loader`] | `load_tasks_csv`, `load_tasks_reader`                        |
//! | [`error`]  | `ScheduleError`, `ScheduleResult<T>`                         |
//!
//! # Ready model (summary)
//!
//! Each agent works through its tasks strictly in order, one at a time.  At
//! most one task per agent is ever in the [`ReadyQueue`]:
//!
//! ```text
//! ready_step(first task)  = task.earliest
//! ready_step(next task)   = committed path final step + 1
//! ready_step(deferred)    = current step + 1
//! ```
//!
//! Entries due at the same step come out in agent registration order.

pub mod error;
pub mod loader;
pub mod queue;
pub mod task;


pub use error::{ScheduleError, ScheduleResult};
pub use loader::{load_tasks_csv, load_tasks_reader};
pub use queue::{AgentQueue, ReadyEntry, ReadyQueue};
pub use task::Task;
