//! The `OutputWriter` trait implemented by all backend writers.

use crate::{OutcomeRow, OutputResult, PathRow};

/// Trait implemented by result writers.
///
/// Errors are stored by the observer and retrieved with
/// [`OutputObserver::take_error`][crate::OutputObserver::take_error].
pub trait OutputWriter {
    /// Write every waypoint of one committed path.
    fn write_path(&mut self, rows: &[PathRow]) -> OutputResult<()>;

    /// Write one task outcome.
    fn write_outcome(&mut self, row: &OutcomeRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
