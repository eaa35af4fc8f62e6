//! `mapf-core` — foundational types for the `rust_mapf` workspace.
//!
//! Every other `mapf-*` crate depends on this one.  It has no `mapf-*`
//! dependencies and a single required external one (`thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`ids`]    | `AgentId`                                                  |
//! | [`grid`]   | `Position`, `Direction`, `Move`, `SpaceTimeState`, `neighbors`, `heuristic` |
//! | [`map`]    | `Bounds`, `Region`, `Obstacles`, `OpenGrid`, `BlockedCells`, `Grid` |
//! | [`path`]   | `CommittedPath`                                            |
//! | [`time`]   | `Step`                                                     |
//! | [`config`] | `SchedulerConfig`                                          |
//! | [`error`]  | `MapfError`, `MapfResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod config;
pub mod error;
pub mod grid;
pub mod ids;
pub mod map;
pub mod path;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SchedulerConfig;
pub use error::{MapfError, MapfResult};
pub use grid::{heuristic, neighbors, Direction, Move, Position, SpaceTimeState};
pub use ids::AgentId;
pub use map::{BlockedCells, Bounds, Grid, Obstacles, OpenGrid, Region};
pub use path::CommittedPath;
pub use time::Step;
