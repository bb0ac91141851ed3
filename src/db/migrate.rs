use crate::errors::AppResult;
use crate::source::{TableRef, WarehouseSchema};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

fn quoted(name: &str) -> String {
    format!("\"{name}\"")
}

/// Check if the configured task table exists.
fn table_exists(conn: &Connection, table: &TableRef) -> Result<bool> {
    let master = match &table.schema {
        Some(schema) => format!("{}.sqlite_master", quoted(schema)),
        None => "sqlite_master".to_string(),
    };
    let mut stmt = conn.prepare(&format!(
        "SELECT name FROM {master} WHERE type='table' AND name=?1"
    ))?;
    let exists: Option<String> = stmt
        .query_row([&table.name], |row| row.get(0))
        .optional()?;
    Ok(exists.is_some())
}

/// Check if `column` is present on the table.
fn table_has_column(conn: &Connection, table: &TableRef, column: &str) -> Result<bool> {
    let pragma = match &table.schema {
        Some(schema) => format!("PRAGMA {}.table_info({})", quoted(schema), quoted(&table.name)),
        None => format!("PRAGMA table_info({})", quoted(&table.name)),
    };
    let mut stmt = conn.prepare(&pragma)?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c?.eq_ignore_ascii_case(column) {
            return Ok(true);
        }
    }
    Ok(false)
}

fn create_task_table(conn: &Connection, schema: &WarehouseSchema) -> Result<()> {
    let table = &schema.table;
    let index_name = format!(
        "idx_{}_{}",
        table.name.to_ascii_lowercase(),
        schema.date_column.to_ascii_lowercase()
    );
    let qualified_index = match &table.schema {
        Some(s) => format!("{}.{}", quoted(s), quoted(&index_name)),
        None => quoted(&index_name),
    };

    conn.execute_batch(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table} (
            {task}  TEXT NOT NULL,
            {date}  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS {index} ON {bare}({date});
        "#,
        table = table.to_sql(),
        task = quoted(&schema.task_column),
        date = quoted(&schema.date_column),
        index = qualified_index,
        bare = quoted(&table.name),
    ))?;
    Ok(())
}

/// Public entry point: make sure the task table exists with both columns.
///
/// An existing table is never altered; a missing column is reported so
/// the user can fix the config instead.
pub fn run_pending_migrations(conn: &Connection, schema: &WarehouseSchema) -> AppResult<()> {
    if !table_exists(conn, &schema.table)? {
        create_task_table(conn, schema)?;
        success(format!("Created table {} (task schema).", schema.table));
        return Ok(());
    }

    for column in [&schema.task_column, &schema.date_column] {
        if !table_has_column(conn, &schema.table, column)? {
            return Err(crate::errors::AppError::Config(format!(
                "table {} exists but has no column {column}",
                schema.table
            )));
        }
    }

    Ok(())
}
