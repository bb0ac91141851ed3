pub mod chart;
pub mod config;
pub mod export;
pub mod info;
pub mod init;
pub mod session;

use crate::cli::parser::RangeArgs;
use crate::config::Config;
use crate::core::{Dashboard, InputController, TaskFetcher};
use crate::errors::{AppError, AppResult};
use crate::render::terminal::BarStyle;
use crate::source::SqliteSource;
use crate::utils::date::{parse_date, parse_period};
use crate::utils::path::expand_tilde;
use chrono::NaiveDate;
use std::path::PathBuf;

/// Everything a command handler needs, resolved once in `run()`.
pub struct AppContext {
    pub cfg: Config,
    pub config_path: PathBuf,
    pub today: NaiveDate,
    pub test: bool,
}

/// Open the configured warehouse read-only and wire up the pipeline.
pub(crate) fn open_dashboard(ctx: &AppContext) -> AppResult<Dashboard<SqliteSource>> {
    let schema = ctx.cfg.schema()?;
    let path = expand_tilde(&ctx.cfg.database);

    if !path.exists() {
        return Err(AppError::Query(format!(
            "warehouse database not found: {} (run `taskchart init` or pass --db)",
            path.display()
        )));
    }

    let source = SqliteSource::open(&path.to_string_lossy())?;
    let fetcher = TaskFetcher::new(source, schema, &ctx.cfg.cache);
    Ok(Dashboard::new(fetcher, ctx.cfg.chart.clone()))
}

/// Controller seeded from config, then moved to the requested dates.
pub(crate) fn build_controller(
    ctx: &AppContext,
    args: &RangeArgs,
    raw: bool,
) -> AppResult<InputController> {
    let mut c = InputController::new(ctx.cfg.min_date, ctx.cfg.default_start, ctx.today)?;

    if let Some(p) = &args.period {
        apply_period(&mut c, p)?;
    } else {
        let start = args.start.as_deref().map(parse_date).transpose()?;
        let end = args.end.as_deref().map(parse_date).transpose()?;

        match (start, end) {
            (Some(s), Some(e)) => c.set_range(s, e)?,
            (Some(s), None) => c.set_start(s)?,
            (None, Some(e)) => c.set_end(e)?,
            (None, None) => {}
        }
    }

    c.set_show_raw(raw);
    Ok(c)
}

/// Move the controller to a --period, clipped to the start window.
pub(crate) fn apply_period(c: &mut InputController, period: &str) -> AppResult<()> {
    let (min, max) = c.start_bounds();
    let (start, end) = parse_period(period)?;
    if end < min || start > max {
        return Err(AppError::OutOfBounds {
            date: period.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        });
    }
    c.set_range(start.max(min), end.min(max))
}

pub(crate) fn bar_style(cfg: &Config) -> BarStyle {
    BarStyle {
        bar_char: cfg.chart.bar_char.clone(),
        max_bar_width: cfg.chart.max_bar_width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> AppContext {
        AppContext {
            cfg: Config::from_yaml("database: /tmp/none.sqlite\n").unwrap(),
            config_path: PathBuf::from("/tmp/none.conf"),
            today: NaiveDate::from_ymd_opt(2025, 2, 20).unwrap(),
            test: true,
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn no_args_means_defaults() {
        let c = build_controller(&ctx(), &RangeArgs::default(), false).unwrap();
        assert_eq!(c.range().start(), d(2025, 2, 1));
        assert_eq!(c.range().end(), d(2025, 2, 20));
    }

    #[test]
    fn period_is_clipped_to_today() {
        let args = RangeArgs {
            period: Some("2025-02".into()),
            ..Default::default()
        };
        let c = build_controller(&ctx(), &args, true).unwrap();
        assert_eq!(c.range().start(), d(2025, 2, 1));
        assert_eq!(c.range().end(), d(2025, 2, 20));
        assert!(c.show_raw());
    }

    #[test]
    fn period_entirely_outside_window_fails() {
        let args = RangeArgs {
            period: Some("2021".into()),
            ..Default::default()
        };
        assert!(matches!(
            build_controller(&ctx(), &args, false),
            Err(AppError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn explicit_end_before_start_fails() {
        let args = RangeArgs {
            start: Some("2025-02-10".into()),
            end: Some("2025-02-05".into()),
            period: None,
        };
        assert!(build_controller(&ctx(), &args, false).is_err());
    }

    #[test]
    fn missing_warehouse_is_reported() {
        let mut c = ctx();
        c.cfg.database = "/definitely/not/here/warehouse.sqlite".into();
        let err = open_dashboard(&c).err().unwrap();
        assert!(err.to_string().contains("warehouse database not found"));
    }
}
