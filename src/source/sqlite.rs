use super::{DataSource, DateInterval, TableRef, predicate::quote_identifier, validate_identifier};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::{TaskFrame, TaskRecord};
use rusqlite::params;
use rusqlite::types::ValueRef;
use std::time::Instant;
use tracing::debug;

/// `DataSource` backed by a SQLite file opened read-only.
pub struct SqliteSource {
    pool: DbPool,
}

impl SqliteSource {
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::open_read_only(path)?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl DataSource for SqliteSource {
    fn fetch(
        &self,
        table: &TableRef,
        columns: &[String],
        predicate: &DateInterval,
    ) -> AppResult<TaskFrame> {
        let [task_col, date_col] = columns else {
            return Err(AppError::Query(format!(
                "expected 2 projected columns (task name, completion date), got {}",
                columns.len()
            )));
        };

        let sql = format!(
            "SELECT {}, {} FROM {} WHERE {}",
            quote_identifier(validate_identifier(task_col)?),
            quote_identifier(validate_identifier(date_col)?),
            table.to_sql(),
            predicate.to_sql()?,
        );

        let started = Instant::now();
        let mut stmt = self.pool.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![predicate.start, predicate.end], |row| {
            let task_name: Option<String> = row.get(0)?;
            let completion_date = value_to_text(row.get_ref(1)?)
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, e.0, e.1.into()))?;
            Ok(TaskRecord {
                task_name: task_name.unwrap_or_default(),
                completion_date,
            })
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }

        debug!(
            table = %table,
            start = %predicate.start,
            end = %predicate.end,
            rows = out.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "fetched task rows"
        );

        Ok(TaskFrame::new(columns.to_vec(), out))
    }
}

struct Unconvertible(rusqlite::types::Type, String);

/// Date-like column values may be stored with any affinity; bring them
/// back as text.
fn value_to_text(v: ValueRef<'_>) -> Result<String, Unconvertible> {
    match v {
        ValueRef::Text(t) => Ok(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Integer(i) => Ok(i.to_string()),
        ValueRef::Real(f) => Ok(f.to_string()),
        ValueRef::Null => Err(Unconvertible(
            rusqlite::types::Type::Null,
            "completion date is NULL".to_string(),
        )),
        ValueRef::Blob(_) => Err(Unconvertible(
            rusqlite::types::Type::Blob,
            "completion date is a BLOB".to_string(),
        )),
    }
}
