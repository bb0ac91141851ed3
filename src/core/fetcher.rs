//! Range-filtered fetcher: one adapter round trip per distinct range.

use crate::config::CacheConfig;
use crate::errors::AppResult;
use crate::models::{DateRange, TaskFrame};
use crate::source::{DataSource, DateInterval, WarehouseSchema};
use moka::sync::Cache;
use std::cell::Cell;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStats {
    pub hits: u64,
    pub misses: u64,
}

/// Memoizes `get_tasks` by the exact `(start, end)` pair.
///
/// Entries are bounded by `cache.max_entries` and, when set, expire after
/// `cache.ttl_seconds`. Failed fetches are not cached.
pub struct TaskFetcher<S> {
    source: S,
    schema: WarehouseSchema,
    cache: Cache<DateRange, Arc<TaskFrame>>,
    hits: Cell<u64>,
    misses: Cell<u64>,
}

impl<S: DataSource> TaskFetcher<S> {
    pub fn new(source: S, schema: WarehouseSchema, cache_cfg: &CacheConfig) -> Self {
        let mut builder =
            Cache::<DateRange, Arc<TaskFrame>>::builder().max_capacity(cache_cfg.max_entries);
        if let Some(ttl) = cache_cfg.ttl_seconds {
            builder = builder.time_to_live(Duration::from_secs(ttl));
        }

        Self {
            source,
            schema,
            cache: builder.build(),
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }

    pub fn get_tasks(&self, range: &DateRange) -> AppResult<Arc<TaskFrame>> {
        if let Some(frame) = self.cache.get(range) {
            self.hits.set(self.hits.get() + 1);
            debug!(%range, rows = frame.len(), "fetch cache hit");
            return Ok(frame);
        }

        self.misses.set(self.misses.get() + 1);
        debug!(%range, "fetch cache miss");

        let predicate = DateInterval::new(
            self.schema.date_column.clone(),
            range.start().format("%Y-%m-%d").to_string(),
            range.end().format("%Y-%m-%d").to_string(),
        );
        let frame = Arc::new(self.source.fetch(
            &self.schema.table,
            &self.schema.columns(),
            &predicate,
        )?);

        self.cache.insert(*range, Arc::clone(&frame));
        Ok(frame)
    }

    /// Drop every cached range; the next call per range goes to the source.
    pub fn invalidate(&self) {
        self.cache.invalidate_all();
        debug!("fetch cache invalidated");
    }

    pub fn stats(&self) -> FetchStats {
        FetchStats {
            hits: self.hits.get(),
            misses: self.misses.get(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::models::TaskRecord;
    use crate::source::TableRef;
    use chrono::NaiveDate;

    /// Filters a fixed row set by text comparison and counts calls.
    struct CountingSource {
        rows: Vec<TaskRecord>,
        calls: Cell<usize>,
        fail: bool,
    }

    impl CountingSource {
        fn new(rows: &[(&str, &str)]) -> Self {
            Self {
                rows: rows.iter().map(|(n, d)| TaskRecord::new(*n, *d)).collect(),
                calls: Cell::new(0),
                fail: false,
            }
        }
    }

    impl DataSource for CountingSource {
        fn fetch(
            &self,
            _table: &TableRef,
            columns: &[String],
            p: &DateInterval,
        ) -> AppResult<TaskFrame> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(AppError::Query("warehouse unreachable".into()));
            }
            let rows = self
                .rows
                .iter()
                .filter(|r| {
                    let day = &r.completion_date[..10];
                    day >= p.start.as_str() && day <= p.end.as_str()
                })
                .cloned()
                .collect();
            Ok(TaskFrame::new(columns.to_vec(), rows))
        }
    }

    fn range(s: (i32, u32, u32), e: (i32, u32, u32)) -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(s.0, s.1, s.2).unwrap(),
            NaiveDate::from_ymd_opt(e.0, e.1, e.2).unwrap(),
        )
        .unwrap()
    }

    fn fetcher(src: &CountingSource) -> TaskFetcher<&CountingSource> {
        let schema = WarehouseSchema::new("tasks", "TASK_NAME", "COMPLETION_DATE").unwrap();
        TaskFetcher::new(src, schema, &CacheConfig::default())
    }

    #[test]
    fn identical_range_hits_cache() {
        let src = CountingSource::new(&[("a", "2025-02-01"), ("b", "2025-02-02")]);
        let f = fetcher(&src);
        let r = range((2025, 2, 1), (2025, 2, 3));

        let first = f.get_tasks(&r).unwrap();
        let second = f.get_tasks(&r).unwrap();

        assert_eq!(src.calls.get(), 1);
        assert_eq!(first, second);
        assert_eq!(f.stats(), FetchStats { hits: 1, misses: 1 });
    }

    #[test]
    fn distinct_ranges_each_fetch_once() {
        let src = CountingSource::new(&[("a", "2025-02-01"), ("b", "2025-02-05")]);
        let f = fetcher(&src);
        let narrow = range((2025, 2, 1), (2025, 2, 3));
        let wide = range((2025, 2, 1), (2025, 2, 5));

        assert_eq!(f.get_tasks(&narrow).unwrap().len(), 1);
        assert_eq!(f.get_tasks(&wide).unwrap().len(), 2);
        f.get_tasks(&narrow).unwrap();
        f.get_tasks(&wide).unwrap();

        assert_eq!(src.calls.get(), 2);
    }

    #[test]
    fn invalidate_forces_round_trip() {
        let src = CountingSource::new(&[("a", "2025-02-01")]);
        let f = fetcher(&src);
        let r = range((2025, 2, 1), (2025, 2, 1));

        f.get_tasks(&r).unwrap();
        f.invalidate();
        f.get_tasks(&r).unwrap();

        assert_eq!(src.calls.get(), 2);
    }

    #[test]
    fn errors_are_not_cached() {
        let mut src = CountingSource::new(&[]);
        src.fail = true;
        let f = fetcher(&src);
        let r = range((2025, 2, 1), (2025, 2, 3));

        assert!(f.get_tasks(&r).is_err());
        assert!(f.get_tasks(&r).is_err());
        assert_eq!(src.calls.get(), 2);
    }

    #[test]
    fn bounds_are_passed_as_text() {
        struct Recorder(std::cell::RefCell<Option<DateInterval>>);
        impl DataSource for Recorder {
            fn fetch(&self, _: &TableRef, c: &[String], p: &DateInterval) -> AppResult<TaskFrame> {
                *self.0.borrow_mut() = Some(p.clone());
                Ok(TaskFrame::new(c.to_vec(), Vec::new()))
            }
        }

        let rec = Recorder(std::cell::RefCell::new(None));
        let schema = WarehouseSchema::new("tasks", "TASK_NAME", "COMPLETION_DATE").unwrap();
        let f = TaskFetcher::new(&rec, schema, &CacheConfig::default());
        f.get_tasks(&range((2025, 2, 1), (2025, 2, 3))).unwrap();

        let seen = rec.0.borrow().clone().unwrap();
        assert_eq!(seen.column, "COMPLETION_DATE");
        assert_eq!(seen.start, "2025-02-01");
        assert_eq!(seen.end, "2025-02-03");
    }
}
