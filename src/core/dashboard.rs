//! The whole pipeline for one pass: fetch, aggregate, build the view.

use crate::config::ChartConfig;
use crate::core::aggregate::aggregate;
use crate::core::controller::InputController;
use crate::core::fetcher::TaskFetcher;
use crate::errors::AppResult;
use crate::models::{DailyCount, DateRange, TaskFrame};
use crate::render::{View, build_view};
use crate::source::DataSource;
use std::sync::Arc;
use tracing::info;

/// Output of one pass.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub range: DateRange,
    pub frame: Arc<TaskFrame>,
    pub counts: Vec<DailyCount>,
    pub view: View,
}

pub struct Dashboard<S> {
    fetcher: TaskFetcher<S>,
    chart: ChartConfig,
}

impl<S: DataSource> Dashboard<S> {
    pub fn new(fetcher: TaskFetcher<S>, chart: ChartConfig) -> Self {
        Self { fetcher, chart }
    }

    /// Re-run the pipeline for the controller's current state. Repeated
    /// ranges are served from the fetch cache.
    pub fn run(&self, controller: &InputController) -> AppResult<Rendered> {
        let range = controller.range();
        let frame = self.fetcher.get_tasks(&range)?;
        let counts = aggregate(&frame.rows)?;
        let view = build_view(&counts, &frame, controller.show_raw(), &self.chart);

        info!(
            %range,
            span_days = range.days(),
            rows = frame.len(),
            bars = counts.len(),
            "pipeline pass"
        );

        Ok(Rendered {
            range,
            frame,
            counts,
            view,
        })
    }

    pub fn fetcher(&self) -> &TaskFetcher<S> {
        &self.fetcher
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CacheConfig;
    use crate::db::pool::DbPool;
    use crate::source::{SqliteSource, WarehouseSchema};
    use chrono::NaiveDate;
    use rusqlite::Connection;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn dashboard(rows: &[(&str, &str)]) -> Dashboard<SqliteSource> {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE tasks (TASK_NAME TEXT, COMPLETION_DATE TEXT);")
            .unwrap();
        for (n, dt) in rows {
            conn.execute("INSERT INTO tasks VALUES (?1, ?2)", [n, dt])
                .unwrap();
        }
        let schema = WarehouseSchema::new("tasks", "TASK_NAME", "COMPLETION_DATE").unwrap();
        let fetcher = TaskFetcher::new(
            SqliteSource::from_pool(DbPool { conn }),
            schema,
            &CacheConfig::default(),
        );
        Dashboard::new(fetcher, ChartConfig::default())
    }

    fn controller(start: NaiveDate, end: NaiveDate) -> InputController {
        let mut c = InputController::new(d(2023, 1, 1), d(2025, 2, 1), d(2025, 3, 1)).unwrap();
        c.set_range(start, end).unwrap();
        c
    }

    #[test]
    fn two_bars_for_two_active_days() {
        let dash = dashboard(&[
            ("Plan sprint", "2025-02-01"),
            ("Fix login", "2025-02-01"),
            ("Ship release", "2025-02-02"),
            ("Too late", "2025-02-04"),
        ]);
        let out = dash.run(&controller(d(2025, 2, 1), d(2025, 2, 3))).unwrap();

        assert_eq!(
            out.counts,
            vec![
                DailyCount::new(d(2025, 2, 1), 2),
                DailyCount::new(d(2025, 2, 2), 1)
            ]
        );
        let View::Chart { chart, raw } = out.view else {
            panic!("expected chart");
        };
        assert_eq!(chart.bars.len(), 2);
        assert!(raw.is_none());
    }

    #[test]
    fn empty_range_gives_no_data() {
        let dash = dashboard(&[("Old", "2024-01-01")]);
        let out = dash.run(&controller(d(2025, 2, 1), d(2025, 2, 3))).unwrap();
        assert!(out.counts.is_empty());
        assert_eq!(out.view, View::NoData);
    }

    #[test]
    fn toggling_raw_reuses_cached_rows() {
        let dash = dashboard(&[("A", "2025-02-01")]);
        let mut c = controller(d(2025, 2, 1), d(2025, 2, 3));
        dash.run(&c).unwrap();
        c.toggle_raw();
        let out = dash.run(&c).unwrap();

        assert!(matches!(out.view, View::Chart { raw: Some(_), .. }));
        assert_eq!(dash.fetcher().stats().misses, 1);
        assert_eq!(dash.fetcher().stats().hits, 1);
    }

    #[test]
    fn every_returned_record_is_inside_the_range() {
        let dash = dashboard(&[
            ("a", "2025-01-31 23:59:59"),
            ("b", "2025-02-01 00:00:00"),
            ("c", "2025-02-10"),
            ("d", "2025-02-11T00:00:01"),
        ]);
        let c = controller(d(2025, 2, 1), d(2025, 2, 10));
        let out = dash.run(&c).unwrap();
        assert_eq!(out.frame.len(), 2);
        for r in &out.frame.rows {
            let day = crate::core::aggregate::normalize_date(&r.completion_date).unwrap();
            assert!(out.range.contains(day));
        }
    }
}
