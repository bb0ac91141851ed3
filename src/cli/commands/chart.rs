use super::{AppContext, bar_style, build_controller, open_dashboard};
use crate::cli::parser::Commands;
use crate::errors::AppResult;
use crate::export::{ExportFormat, ExportLogic};
use crate::render::terminal;
use std::io;

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Chart {
        range,
        raw,
        html,
        force,
    } = cmd
    {
        let dashboard = open_dashboard(ctx)?;
        let controller = build_controller(ctx, range, *raw)?;
        let rendered = dashboard.run(&controller)?;

        let stdout = io::stdout();
        let mut out = stdout.lock();
        terminal::render(&mut out, &rendered.view, &rendered.range, &bar_style(&ctx.cfg))?;

        if let Some(file) = html {
            ExportLogic::export(&rendered, ExportFormat::Html, file, *raw, *force)?;
        }
    }
    Ok(())
}
