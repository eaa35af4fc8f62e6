//! `mapf-output` — result writers for the rust_mapf scheduler.
//!
//! | Backend | Files created                   |
//! |---------|---------------------------------|
//! | CSV     | `paths.csv`, `outcomes.csv`     |
//!
//! Backends implement [`OutputWriter`] and are driven by [`OutputObserver`],
//! which implements `mapf_sim::SchedulerObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mapf_output::{CsvWriter, OutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = OutputObserver::new(writer);
//! scheduler.run(&mut obs).unwrap();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::OutputObserver;
pub use row::{OutcomeKind, OutcomeRow, PathRow};
pub use writer::OutputWriter;
