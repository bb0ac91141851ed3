use crate::config::ChartConfig;
use crate::models::{DailyCount, TaskFrame, TaskRecord};

pub const NO_DATA_MESSAGE: &str =
    "No tasks found for the selected date range. Try a different range.";

pub const CHART_TITLE: &str = "Task Completion Bar Chart";
pub const X_TITLE: &str = "Date";
pub const Y_TITLE: &str = "Number of Completed Tasks";

/// What the presenter will draw for one pipeline pass.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    NoData,
    Chart {
        chart: ChartSpec,
        raw: Option<RawTable>,
    },
}

/// Bar chart description: one bar per date, x temporal, y quantitative.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub width: u32,
    pub height: u32,
    pub responsive: bool,
    pub bars: Vec<DailyCount>,
}

/// Fetched rows as they came back, for the "show raw data" table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<TaskRecord>,
}

impl ChartSpec {
    pub fn max_count(&self) -> u64 {
        self.bars.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

/// Build the view. Bars are sorted by date whatever order the counts
/// arrive in; raw rows keep fetch order.
pub fn build_view(
    counts: &[DailyCount],
    frame: &TaskFrame,
    show_raw: bool,
    cfg: &ChartConfig,
) -> View {
    if counts.is_empty() {
        return View::NoData;
    }

    let mut bars = counts.to_vec();
    bars.sort_by_key(|b| b.date);

    let raw = show_raw.then(|| RawTable {
        columns: frame.columns.clone(),
        rows: frame.rows.clone(),
    });

    View::Chart {
        chart: ChartSpec {
            title: CHART_TITLE.to_string(),
            x_title: X_TITLE.to_string(),
            y_title: Y_TITLE.to_string(),
            width: cfg.width,
            height: cfg.height,
            responsive: cfg.responsive,
            bars,
        },
        raw,
    }
}
