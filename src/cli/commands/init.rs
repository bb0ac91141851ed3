use super::AppContext;
use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the task table in the warehouse file, if it does not exist yet
pub fn handle(cli: &Cli, ctx: &AppContext) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.as_deref(), &ctx.config_path, ctx.test)?;
    let schema = cfg.schema()?;

    println!("⚙️  Initializing taskchart…");
    println!("📄 Config file : {}", ctx.config_path.display());
    println!("🗄️  Database   : {}", &cfg.database);

    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn, &schema)?;

    println!("✅ Warehouse ready at {}", &cfg.database);
    println!("🎉 taskchart initialization completed!");
    Ok(())
}
