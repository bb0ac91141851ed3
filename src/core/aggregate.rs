//! Per-day aggregation of fetched task rows.

use crate::errors::{AppError, AppResult};
use crate::models::{DailyCount, TaskRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Reduce a stored completion value to its calendar date.
///
/// Time of day is discarded. RFC 3339 values keep the date as written
/// in their own offset.
pub fn normalize_date(raw: &str) -> AppResult<NaiveDate> {
    let s = raw.trim();

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }

    Err(AppError::InvalidDate(raw.to_string()))
}

/// One `DailyCount` per distinct normalized date, oldest first.
pub fn aggregate(records: &[TaskRecord]) -> AppResult<Vec<DailyCount>> {
    let mut by_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();

    for r in records {
        let day = normalize_date(&r.completion_date)?;
        *by_day.entry(day).or_insert(0) += 1;
    }

    Ok(by_day
        .into_iter()
        .map(|(date, count)| DailyCount::new(date, count))
        .collect())
}

pub fn total(counts: &[DailyCount]) -> u64 {
    counts.iter().map(|c| c.count).sum()
}
