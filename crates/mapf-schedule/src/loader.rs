//! CSV task loader.
//!
//! # CSV format
//!
//! One row per task.  Rows for the same agent are that agent's tasks in file
//! order; agents may be interleaved.
//!
//! ```csv
//! agent_id,start_x,start_y,goal_x,goal_y,earliest_step
//! 0,0,0,5,5,0
//! 1,1,0,5,5,0
//! 0,5,5,0,9,
//! ```
//!
//! An empty `earliest_step` means step 0.  Only an agent's first task uses
//! its value as the ready step; see the crate docs.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use mapf_core::{AgentId, Position, Step};

use crate::{ScheduleError, Task};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct TaskRecord {
    agent_id:      u32,
    start_x:       i32,
    start_y:       i32,
    goal_x:        i32,
    goal_y:        i32,
    earliest_step: Option<u64>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load per-agent task lists from a CSV file.
pub fn load_tasks_csv(path: &Path) -> Result<BTreeMap<AgentId, Vec<Task>>, ScheduleError> {
    let file = std::fs::File::open(path)
        .map_err(ScheduleError::Io)?;
    load_tasks_reader(file)
}

/// Like [`load_tasks_csv`] but accepts any `Read` source.
pub fn load_tasks_reader<R: Read>(reader: R) -> Result<BTreeMap<AgentId, Vec<Task>>, ScheduleError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut by_agent: BTreeMap<AgentId, Vec<Task>> = BTreeMap::new();

    for (row, result) in csv_reader.deserialize::<TaskRecord>().enumerate() {
        let r = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        let agent = AgentId(r.agent_id);
        if agent == AgentId::INVALID {
            return Err(ScheduleError::Parse(format!(
                "row {}: agent_id {} is reserved", row + 1, r.agent_id
            )));
        }
        by_agent.entry(agent).or_default().push(Task {
            agent,
            start:    Position::new(r.start_x, r.start_y),
            goal:     Position::new(r.goal_x, r.goal_y),
            earliest: r.earliest_step.map_or(Step::ZERO, Step),
        });
    }

    Ok(by_agent)
}
