//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `paths.csv`
//! - `outcomes.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{OutcomeRow, OutputResult, PathRow};
use crate::writer::OutputWriter;

/// Writes scheduler results to two CSV files.
pub struct CsvWriter {
    paths:    Writer<File>,
    outcomes: Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut paths = Writer::from_path(dir.join("paths.csv"))?;
        paths.write_record(["agent_id", "task_index", "step", "x", "y"])?;

        let mut outcomes = Writer::from_path(dir.join("outcomes.csv"))?;
        outcomes.write_record([
            "agent_id", "task_index", "outcome", "step",
            "start_x", "start_y", "goal_x", "goal_y", "detail",
        ])?;

        Ok(Self {
            paths,
            outcomes,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_path(&mut self, rows: &[PathRow]) -> OutputResult<()> {
        for row in rows {
            self.paths.write_record(&[
                row.agent_id.to_string(),
                row.task_index.to_string(),
                row.step.to_string(),
                row.x.to_string(),
                row.y.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_outcome(&mut self, row: &OutcomeRow) -> OutputResult<()> {
        self.outcomes.write_record(&[
            row.agent_id.to_string(),
            row.task_index.to_string(),
            row.outcome.as_str().to_owned(),
            row.step.to_string(),
            row.start_x.to_string(),
            row.start_y.to_string(),
            row.goal_x.to_string(),
            row.goal_y.to_string(),
            row.detail.clone(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.paths.flush()?;
        self.outcomes.flush()?;
        Ok(())
    }
}
