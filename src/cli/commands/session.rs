//! Interactive session: every state change redraws the whole pipeline.

use super::{AppContext, apply_period, bar_style, build_controller, open_dashboard};
use crate::cli::parser::{Commands, RangeArgs};
use crate::core::{Dashboard, InputController};
use crate::errors::{AppError, AppResult};
use crate::render::terminal::{self, BarStyle};
use crate::source::DataSource;
use crate::ui::messages::write_error;
use crate::utils::date::parse_date;
use chrono::NaiveDate;
use std::io::{self, BufRead, Write};

const PROMPT: &str = "taskchart> ";

const HELP: &str = "\
Commands:
  start YYYY-MM-DD     move the start date
  end YYYY-MM-DD       move the end date
  period P             YYYY, YYYY-MM, YYYY-MM-DD or a:b
  raw [on|off]         show/hide the raw data table (toggle without argument)
  refresh              drop cached results and fetch again
  show                 redraw
  status               current range, allowed windows, cache counters
  help                 this text
  quit | exit          leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Start(NaiveDate),
    End(NaiveDate),
    Period(String),
    Raw(Option<bool>),
    Refresh,
    Show,
    Status,
    Help,
    Quit,
}

/// `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> AppResult<Option<SessionCommand>> {
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        return Ok(None);
    };
    let arg = parts.next();
    if parts.next().is_some() {
        return Err(AppError::Other(format!("too many arguments: {line}")));
    }

    let need = |name: &str| {
        arg.ok_or_else(|| AppError::Other(format!("`{name}` needs an argument")))
    };

    let cmd = match word.to_ascii_lowercase().as_str() {
        "start" => SessionCommand::Start(parse_date(need("start")?)?),
        "end" => SessionCommand::End(parse_date(need("end")?)?),
        "period" => SessionCommand::Period(need("period")?.to_string()),
        "raw" => match arg.map(str::to_ascii_lowercase).as_deref() {
            None => SessionCommand::Raw(None),
            Some("on") => SessionCommand::Raw(Some(true)),
            Some("off") => SessionCommand::Raw(Some(false)),
            Some(other) => {
                return Err(AppError::Other(format!("raw expects on|off, got {other}")));
            }
        },
        "refresh" => SessionCommand::Refresh,
        "show" => SessionCommand::Show,
        "status" => SessionCommand::Status,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        other => {
            return Err(AppError::Other(format!(
                "unknown command `{other}` (type `help`)"
            )));
        }
    };
    Ok(Some(cmd))
}

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Session { raw } = cmd {
        let dashboard = open_dashboard(ctx)?;
        let mut controller = build_controller(ctx, &RangeArgs::default(), *raw)?;

        let stdin = io::stdin();
        let stdout = io::stdout();
        run_session(
            &dashboard,
            &mut controller,
            &bar_style(&ctx.cfg),
            stdin.lock(),
            stdout.lock(),
        )?;
    }
    Ok(())
}

/// Draw once, then read commands until `quit` or end of input.
///
/// A bad command or a failed pass prints the error and keeps the
/// previous controller state.
pub fn run_session<S, R, W>(
    dashboard: &Dashboard<S>,
    controller: &mut InputController,
    style: &BarStyle,
    input: R,
    mut out: W,
) -> AppResult<()>
where
    S: DataSource,
    R: BufRead,
    W: Write,
{
    if let Err(e) = redraw(dashboard, controller, style, &mut out) {
        write_error(&mut out, e)?;
    }
    write!(out, "{PROMPT}")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;

        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(SessionCommand::Quit)) => break,
            Ok(Some(cmd)) => {
                if let Err(e) = apply(cmd, dashboard, controller, style, &mut out) {
                    write_error(&mut out, e)?;
                }
            }
            Err(e) => write_error(&mut out, e)?,
        }

        write!(out, "{PROMPT}")?;
        out.flush()?;
    }

    writeln!(out)?;
    Ok(())
}

fn apply<S: DataSource, W: Write>(
    cmd: SessionCommand,
    dashboard: &Dashboard<S>,
    controller: &mut InputController,
    style: &BarStyle,
    out: &mut W,
) -> AppResult<()> {
    match cmd {
        SessionCommand::Start(d) => controller.set_start(d)?,
        SessionCommand::End(d) => controller.set_end(d)?,
        SessionCommand::Period(p) => apply_period(controller, &p)?,
        SessionCommand::Raw(Some(on)) => controller.set_show_raw(on),
        SessionCommand::Raw(None) => {
            controller.toggle_raw();
        }
        SessionCommand::Refresh => dashboard.fetcher().invalidate(),
        SessionCommand::Show => {}
        SessionCommand::Status => return status(dashboard, controller, out),
        SessionCommand::Help => {
            writeln!(out, "{HELP}")?;
            return Ok(());
        }
        SessionCommand::Quit => return Ok(()),
    }

    redraw(dashboard, controller, style, out)
}

fn redraw<S: DataSource, W: Write>(
    dashboard: &Dashboard<S>,
    controller: &InputController,
    style: &BarStyle,
    out: &mut W,
) -> AppResult<()> {
    let rendered = dashboard.run(controller)?;
    terminal::render(out, &rendered.view, &rendered.range, style)
}

fn status<S: DataSource, W: Write>(
    dashboard: &Dashboard<S>,
    controller: &InputController,
    out: &mut W,
) -> AppResult<()> {
    let (smin, smax) = controller.start_bounds();
    let (emin, emax) = controller.end_bounds();
    let stats = dashboard.fetcher().stats();

    writeln!(out, "today:       {}", controller.today())?;
    writeln!(out, "range:       {}", controller.range())?;
    writeln!(out, "start window: {smin} ..= {smax}")?;
    writeln!(out, "end window:   {emin} ..= {emax}")?;
    writeln!(out, "raw data:    {}", if controller.show_raw() { "on" } else { "off" })?;
    writeln!(out, "cache:       {} hit(s), {} miss(es)", stats.hits, stats.misses)?;
    Ok(())
}
