//! Data source adapter: the one capability the dashboard needs from a
//! warehouse, "execute a filtered read and return rows".

mod predicate;
mod sqlite;

pub use predicate::{DateInterval, TableRef, validate_identifier};
pub use sqlite::SqliteSource;

use crate::errors::AppResult;
use crate::models::TaskFrame;

/// Narrow read-only interface any warehouse client can implement.
///
/// `columns` is the ordered projection (task name, completion date).
/// Rows come back in source order; implementations never retry.
pub trait DataSource {
    fn fetch(
        &self,
        table: &TableRef,
        columns: &[String],
        predicate: &DateInterval,
    ) -> AppResult<TaskFrame>;
}

impl<T: DataSource + ?Sized> DataSource for &T {
    fn fetch(
        &self,
        table: &TableRef,
        columns: &[String],
        predicate: &DateInterval,
    ) -> AppResult<TaskFrame> {
        (**self).fetch(table, columns, predicate)
    }
}

/// Where the tasks live: table plus the two projected columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarehouseSchema {
    pub table: TableRef,
    pub task_column: String,
    pub date_column: String,
}

impl WarehouseSchema {
    pub fn new(table: &str, task_column: &str, date_column: &str) -> AppResult<Self> {
        Ok(Self {
            table: TableRef::parse(table)?,
            task_column: validate_identifier(task_column)?.to_string(),
            date_column: validate_identifier(date_column)?.to_string(),
        })
    }

    /// Projection in the order the adapter returns it.
    pub fn columns(&self) -> Vec<String> {
        vec![self.task_column.clone(), self.date_column.clone()]
    }
}
