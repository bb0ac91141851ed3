use super::AppContext;
use crate::cli::parser::Commands;
use crate::db::pool::DbPool;
use crate::db::stats::print_db_info;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if matches!(cmd, Commands::Info) {
        let schema = ctx.cfg.schema()?;
        let pool = DbPool::open_read_only(&ctx.cfg.database)?;
        print_db_info(&pool, &ctx.cfg.database, &schema)?;
    }
    Ok(())
}
