// src/export/model.rs

use crate::models::{DailyCount, TaskRecord};
use serde::Serialize;

/// Flat row for the daily counts export.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct DailyCountExport {
    pub date: String,
    pub count: u64,
}

/// Flat row for the raw task export.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct TaskExport {
    pub task_name: String,
    pub completion_date: String,
}

impl From<&DailyCount> for DailyCountExport {
    fn from(c: &DailyCount) -> Self {
        Self {
            date: c.date.format("%Y-%m-%d").to_string(),
            count: c.count,
        }
    }
}

impl From<&TaskRecord> for TaskExport {
    fn from(r: &TaskRecord) -> Self {
        Self {
            task_name: r.task_name.clone(),
            completion_date: r.completion_date.clone(),
        }
    }
}
