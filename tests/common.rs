#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;
use taskchart::source::WarehouseSchema;

/// Fixed "today" so the allowed windows do not move under the tests.
pub const TODAY: &str = "2025-02-20";

pub fn tc() -> Command {
    cargo_bin_cmd!("taskchart")
}

/// Command bound to `db_path`, a config file that does not exist and [`TODAY`].
pub fn tc_db(db_path: &str) -> Command {
    let mut cmd = tc();
    cmd.args([
        "--db",
        db_path,
        "--config",
        &missing_config(db_path),
        "--today",
        TODAY,
    ]);
    cmd
}

fn missing_config(db_path: &str) -> String {
    let p = format!("{db_path}.conf");
    fs::remove_file(&p).ok();
    p
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_taskchart.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_taskchart_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Create the task table and insert `rows` as (task name, completion date).
pub fn seed(db_path: &str, rows: &[(&str, &str)]) {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    let schema = WarehouseSchema::new("tasks", "TASK_NAME", "COMPLETION_DATE").expect("schema");
    taskchart::db::initialize::init_db(&conn, &schema).expect("init db");

    for (name, date) in rows {
        conn.execute(
            "INSERT INTO tasks (TASK_NAME, COMPLETION_DATE) VALUES (?1, ?2)",
            rusqlite::params![name, date],
        )
        .expect("insert task");
    }
}

/// The three-row dataset used by most tests: two tasks on Feb 1st, one on Feb 3rd.
pub fn seed_default(db_path: &str) {
    seed(
        db_path,
        &[
            ("Plan sprint", "2025-02-01"),
            ("Fix login", "2025-02-01 14:30:00"),
            ("Ship release", "2025-02-03"),
        ],
    );
}
