use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::source::WarehouseSchema;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use chrono::NaiveDate;
use std::fs;

/// Summary of the task table, as printed by `taskchart info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStats {
    pub rows: i64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

pub fn table_stats(pool: &DbPool, schema: &WarehouseSchema) -> AppResult<TableStats> {
    let date_col = format!("date(\"{}\")", schema.date_column);
    let table = schema.table.to_sql();

    let rows: i64 = pool
        .conn
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
            row.get(0)
        })?;

    let (first, last): (Option<String>, Option<String>) = pool.conn.query_row(
        &format!("SELECT MIN({date_col}), MAX({date_col}) FROM {table}"),
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    Ok(TableStats {
        rows,
        first_date: first.as_deref().and_then(parse_date),
        last_date: last.as_deref().and_then(parse_date),
    })
}

pub fn print_db_info(pool: &DbPool, db_path: &str, schema: &WarehouseSchema) -> AppResult<()> {
    let stats = table_stats(pool, schema)?;
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);
    println!("{}• Table:{} {}", CYAN, RESET, schema.table);

    //
    // 2) TOTAL ROWS
    //
    println!(
        "{}• Total tasks:{} {}{}{}",
        CYAN, RESET, GREEN, stats.rows, RESET
    );

    //
    // 3) DATE RANGE
    //
    let fmt = |d: Option<NaiveDate>| {
        d.map(|d| d.to_string())
            .unwrap_or_else(|| format!("{GREY}--{RESET}"))
    };

    println!("{}• Completion dates:{}", CYAN, RESET);
    println!("    from: {}", fmt(stats.first_date));
    println!("    to:   {}", fmt(stats.last_date));

    //
    // 4) AVERAGE TASKS/DAY
    //
    if let (Some(f), Some(l)) = (stats.first_date, stats.last_date) {
        let days = (l - f).num_days() + 1;
        let avg = stats.rows as f64 / days as f64;
        println!("{}• Average tasks/day:{} {:.2}", CYAN, RESET, avg);
    }

    println!();
    Ok(())
}

fn parse_date(date_str: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn stats_summarize_rows_and_bounds() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE tasks (TASK_NAME TEXT, COMPLETION_DATE TEXT);
             INSERT INTO tasks VALUES ('a', '2025-02-03 08:00:00');
             INSERT INTO tasks VALUES ('b', '2025-02-01');
             INSERT INTO tasks VALUES ('c', '2025-02-10');",
        )
        .unwrap();
        let pool = DbPool { conn };
        let schema = WarehouseSchema::new("tasks", "TASK_NAME", "COMPLETION_DATE").unwrap();

        let stats = table_stats(&pool, &schema).unwrap();
        assert_eq!(stats.rows, 3);
        assert_eq!(stats.first_date, NaiveDate::from_ymd_opt(2025, 2, 1));
        assert_eq!(stats.last_date, NaiveDate::from_ymd_opt(2025, 2, 10));
    }

    #[test]
    fn empty_table_has_no_bounds() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE tasks (TASK_NAME TEXT, COMPLETION_DATE TEXT);")
            .unwrap();
        let pool = DbPool { conn };
        let schema = WarehouseSchema::new("tasks", "TASK_NAME", "COMPLETION_DATE").unwrap();

        let stats = table_stats(&pool, &schema).unwrap();
        assert_eq!(stats.rows, 0);
        assert_eq!(stats.first_date, None);
    }
}
