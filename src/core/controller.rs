//! Input controller: the two bounded date pickers plus the raw-data toggle.

use crate::errors::{AppError, AppResult};
use crate::models::DateRange;
use chrono::NaiveDate;

/// Live picker state.
///
/// Start is bounded to `[min_date, today]`; end is bounded to
/// `[start, today]` and follows start when start moves past it, so the
/// held range is always ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputController {
    min_date: NaiveDate,
    today: NaiveDate,
    range: DateRange,
    show_raw: bool,
}

impl InputController {
    /// Start at `default_start` (clamped into its window) and end today.
    pub fn new(min_date: NaiveDate, default_start: NaiveDate, today: NaiveDate) -> AppResult<Self> {
        if min_date > today {
            return Err(AppError::Config(format!(
                "minimum date {min_date} is after today {today}"
            )));
        }
        let start = default_start.clamp(min_date, today);

        Ok(Self {
            min_date,
            today,
            range: DateRange::new(start, today)?,
            show_raw: false,
        })
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn show_raw(&self) -> bool {
        self.show_raw
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn start_bounds(&self) -> (NaiveDate, NaiveDate) {
        (self.min_date, self.today)
    }

    pub fn end_bounds(&self) -> (NaiveDate, NaiveDate) {
        (self.range.start(), self.today)
    }

    pub fn set_start(&mut self, start: NaiveDate) -> AppResult<()> {
        let (min, max) = self.start_bounds();
        check_bounds(start, min, max)?;

        let end = self.range.end().max(start);
        self.range = DateRange::new(start, end)?;
        Ok(())
    }

    pub fn set_end(&mut self, end: NaiveDate) -> AppResult<()> {
        let (min, max) = self.end_bounds();
        check_bounds(end, min, max)?;

        self.range = DateRange::new(self.range.start(), end)?;
        Ok(())
    }

    /// Apply both bounds at once, start first so the end window is the
    /// one the new start implies.
    pub fn set_range(&mut self, start: NaiveDate, end: NaiveDate) -> AppResult<()> {
        let snapshot = self.range;
        self.set_start(start)?;
        if let Err(e) = self.set_end(end) {
            self.range = snapshot;
            return Err(e);
        }
        Ok(())
    }

    pub fn set_show_raw(&mut self, on: bool) {
        self.show_raw = on;
    }

    pub fn toggle_raw(&mut self) -> bool {
        self.show_raw = !self.show_raw;
        self.show_raw
    }
}

fn check_bounds(date: NaiveDate, min: NaiveDate, max: NaiveDate) -> AppResult<()> {
    if date < min || date > max {
        return Err(AppError::OutOfBounds {
            date: date.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        });
    }
    Ok(())
}
