//! ANSI rendering of a [`View`] for the terminal.

use super::{ChartSpec, NO_DATA_MESSAGE, RawTable, View};
use crate::core::aggregate::total;
use crate::errors::AppResult;
use crate::models::DateRange;
use crate::ui::messages::{write_header, write_warning};
use crate::utils::formatting::{bold, pad_left, plural_tasks};
use crate::utils::table::{Column, Table};
use ansi_term::Colour;
use std::io::Write;

/// Terminal styling, taken from `ChartConfig`.
#[derive(Debug, Clone)]
pub struct BarStyle {
    pub bar_char: String,
    pub max_bar_width: usize,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            bar_char: "█".to_string(),
            max_bar_width: 50,
        }
    }
}

pub fn render<W: Write>(
    out: &mut W,
    view: &View,
    range: &DateRange,
    style: &BarStyle,
) -> AppResult<()> {
    match view {
        View::NoData => {
            write_warning(out, NO_DATA_MESSAGE)?;
        }
        View::Chart { chart, raw } => {
            render_chart(out, chart, range, style)?;
            if let Some(raw) = raw {
                render_raw(out, raw)?;
            }
        }
    }
    Ok(())
}

fn render_chart<W: Write>(
    out: &mut W,
    chart: &ChartSpec,
    range: &DateRange,
    style: &BarStyle,
) -> AppResult<()> {
    write_header(out, &chart.title)?;

    let tasks = total(&chart.bars);
    writeln!(
        out,
        "Range: {}  ({} on {} day{})\n",
        range,
        plural_tasks(tasks),
        chart.bars.len(),
        if chart.bars.len() == 1 { "" } else { "s" }
    )?;

    let max = chart.max_count();
    let count_w = max.to_string().len();

    writeln!(
        out,
        "{} │ {}",
        bold(&format!("{:<10}", chart.x_title)),
        bold(&chart.y_title)
    )?;
    for bar in &chart.bars {
        let len = bar_len(bar.count, max, style.max_bar_width);
        let drawn = Colour::Green.paint(style.bar_char.repeat(len));
        writeln!(
            out,
            "{} │{} {}",
            bar.date.format("%Y-%m-%d"),
            drawn,
            pad_left(&bar.count.to_string(), count_w)
        )?;
    }
    writeln!(out)?;
    Ok(())
}

fn render_raw<W: Write>(out: &mut W, raw: &RawTable) -> AppResult<()> {
    write_header(out, "Raw data")?;

    let mut table = Table::new(raw.columns.iter().map(Column::new).collect());
    for r in &raw.rows {
        table.add_row(vec![r.task_name.clone(), r.completion_date.clone()]);
    }
    write!(out, "{}", table.render())?;
    writeln!(out, "{} row(s)", raw.rows.len())?;
    Ok(())
}

/// Bar length scaled to the largest count; any non-zero count draws at
/// least one cell.
pub fn bar_len(count: u64, max: u64, width: usize) -> usize {
    if count == 0 || max == 0 || width == 0 {
        return 0;
    }
    let scaled = (count as u128 * width as u128).div_ceil(max as u128);
    (scaled as usize).clamp(1, width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartConfig;
    use crate::models::{DailyCount, TaskFrame, TaskRecord};
    use crate::render::build_view;
    use crate::utils::colors::strip_ansi;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, day).unwrap()
    }

    fn draw(view: &View) -> String {
        let range = DateRange::new(d(1), d(3)).unwrap();
        let mut buf = Vec::new();
        render(&mut buf, view, &range, &BarStyle::default()).unwrap();
        strip_ansi(&String::from_utf8(buf).unwrap())
    }

    #[test]
    fn bar_lengths_scale() {
        assert_eq!(bar_len(2, 2, 50), 50);
        assert_eq!(bar_len(1, 2, 50), 25);
        assert_eq!(bar_len(1, 1000, 50), 1);
        assert_eq!(bar_len(0, 10, 50), 0);
    }

    #[test]
    fn no_data_prints_only_the_warning() {
        let text = draw(&View::NoData);
        assert!(text.contains(NO_DATA_MESSAGE));
        assert!(!text.contains("│"));
    }

    #[test]
    fn chart_has_one_bar_per_date() {
        let frame = TaskFrame::new(
            vec!["TASK_NAME".into(), "COMPLETION_DATE".into()],
            vec![
                TaskRecord::new("a", "2025-02-01"),
                TaskRecord::new("b", "2025-02-01"),
                TaskRecord::new("c", "2025-02-02"),
            ],
        );
        let counts = [DailyCount::new(d(1), 2), DailyCount::new(d(2), 1)];
        let view = build_view(&counts, &frame, false, &ChartConfig::default());
        let text = draw(&view);

        assert!(text.contains("Task Completion Bar Chart"));
        assert!(text.contains("3 tasks on 2 days"));
        let bars: Vec<&str> = text.lines().filter(|l| l.starts_with("2025-02-")).collect();
        assert_eq!(bars.len(), 2);
        assert!(bars[0].starts_with("2025-02-01 │"));
        assert!(bars[0].ends_with(" 2"));
        assert!(bars[1].ends_with(" 1"));
        assert!(!text.contains("Raw data"));
    }

    #[test]
    fn raw_table_follows_chart() {
        let frame = TaskFrame::new(
            vec!["TASK_NAME".into(), "COMPLETION_DATE".into()],
            vec![
                TaskRecord::new("second", "2025-02-02 09:15:00"),
                TaskRecord::new("first", "2025-02-01"),
            ],
        );
        let counts = [DailyCount::new(d(1), 1), DailyCount::new(d(2), 1)];
        let view = build_view(&counts, &frame, true, &ChartConfig::default());
        let text = draw(&view);

        assert!(text.contains("Raw data"));
        assert!(text.contains("TASK_NAME"));
        assert!(text.contains("COMPLETION_DATE"));
        let second = text.find("second").unwrap();
        let first = text.find("first").unwrap();
        assert!(second < first);
        assert!(text.contains("2025-02-02 09:15:00"));
        assert!(text.contains("2 row(s)"));
    }
}
