//! taskchart library root.
//! Exposes the CLI parser, the high-level run() function and the pipeline
//! modules (source → fetcher → aggregate → render).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod render;
pub mod source;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands::AppContext;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use tracing_subscriber::EnvFilter;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, ctx: &AppContext) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, ctx),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, ctx),
        Commands::Chart { .. } => cli::commands::chart::handle(&cli.command, ctx),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, ctx),
        Commands::Session { .. } => cli::commands::session::handle(&cli.command, ctx),
        Commands::Info => cli::commands::info::handle(&cli.command, ctx),
    }
}

/// Diagnostics go to stderr; RUST_LOG wins over -v.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "taskchart=warn",
        1 => "taskchart=debug",
        _ => "taskchart=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // 2️⃣ load config ONCE
    let config_path = cli
        .config
        .as_deref()
        .map(utils::path::expand_tilde)
        .unwrap_or_else(Config::config_file);
    let mut cfg = Config::load_from(&config_path)?;

    // 3️⃣ command-line overrides
    if let Some(custom_db) = &cli.db {
        cfg.database = utils::path::expand_tilde(custom_db)
            .to_string_lossy()
            .to_string();
    }

    let today = match &cli.today {
        Some(t) => utils::date::parse_date(t)?,
        None => utils::date::today(),
    };

    if !matches!(cli.command, Commands::Init | Commands::Config { .. }) {
        cfg.validate(today)?;
    }

    let ctx = AppContext {
        cfg,
        config_path,
        today,
        test: cli.test,
    };

    // 4️⃣ hand everything to the dispatcher
    dispatch(&cli, &ctx)
}
