use super::{AppContext, build_controller, open_dashboard};
use crate::cli::parser::Commands;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        raw,
        force,
    } = cmd
    {
        let dashboard = open_dashboard(ctx)?;
        let controller = build_controller(ctx, range, *raw)?;
        let rendered = dashboard.run(&controller)?;
        ExportLogic::export(&rendered, *format, file, *raw, *force)?;
    }
    Ok(())
}
