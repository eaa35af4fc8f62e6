//! `mapf-reserve` — the shared collision oracle.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`table`]    | `ReservationTable`, `AgentView`, `GoalHold`, `Conflict`    |
//! | [`view`]     | `ReservationView` — the read-only face handed to planners  |
//!
//! # Model
//!
//! ```text
//! vertices : Step → { Position → owner }        "who stands where at t"
//! edges    : Step → { (from, to) → owner }      "who moves from → to during t → t+1"
//! parked   : Position → (from_step, owner)       "who stands here forever from t"
//! ```
//!
//! Entries are only ever added.  A committed path is never retracted during a
//! scheduling run, so a planner's view of the past can only grow more
//! restrictive, never less.

pub mod table;
pub mod view;

#[cfg(test)]
mod tests;

pub use table::{AgentView, Conflict, GoalHold, ReservationTable};
pub use view::ReservationView;
