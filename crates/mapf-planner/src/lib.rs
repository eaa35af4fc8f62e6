//! `mapf-planner` — single-agent search through space and time.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`planner`] | `Planner` trait, `PlanQuery`, `PlannerConfig`, `SpaceTimeAStar` |
//! | [`arena`]   | `NodeArena`, `SearchNode`, `NodeRef`, `SearchScratch`       |
//! | [`error`]   | `PlanError`, `InvalidReason`, `PlanResult<T>`               |
//!
//! # Search model
//!
//! Nodes are `(position, step)` pairs, so the same cell at two different
//! steps is two different nodes.  That is what lets an agent wait for a
//! reserved cell to clear, or pass through a cell another agent will only
//! reach later.  Successors are the four unit moves plus an optional wait;
//! each costs one step.

pub mod arena;
pub mod error;
pub mod planner;


pub use arena::{NodeArena, NodeRef, SearchNode, SearchScratch};
pub use error::{InvalidReason, PlanError, PlanResult};
pub use planner::{PlanQuery, Planner, PlannerConfig, SpaceTimeAStar};
