use serde::Serialize;

/// One fetched row of the task table.
///
/// `completion_date` keeps the text exactly as the store returned it, so
/// the raw table can show it unmodified. Normalization to a calendar date
/// happens in the aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRecord {
    pub task_name: String,       // ⇔ task column (TEXT)
    pub completion_date: String, // ⇔ date column (date-like TEXT)
}

impl TaskRecord {
    pub fn new(task_name: impl Into<String>, completion_date: impl Into<String>) -> Self {
        Self {
            task_name: task_name.into(),
            completion_date: completion_date.into(),
        }
    }
}

/// In-memory result of one adapter call: the projected column names (in
/// projection order) and the rows in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskFrame {
    pub columns: Vec<String>,
    pub rows: Vec<TaskRecord>,
}

impl TaskFrame {
    pub fn new(columns: Vec<String>, rows: Vec<TaskRecord>) -> Self {
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
