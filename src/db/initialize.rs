use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use crate::source::WarehouseSchema;
use rusqlite::Connection;

/// Initialize a local warehouse file.
/// Delegates all schema creation to the migration step.
pub fn init_db(conn: &Connection, schema: &WarehouseSchema) -> AppResult<()> {
    run_pending_migrations(conn, schema)?;
    Ok(())
}
