use crate::export::ExportFormat;
use clap::{ArgAction, Args, Parser, Subcommand};

/// Command-line interface definition for taskchart
/// Terminal dashboard charting completed tasks per day
#[derive(Parser)]
#[command(
    name = "taskchart",
    version = env!("CARGO_PKG_VERSION"),
    about = "Chart daily task completions for a date range from a SQLite warehouse table",
    long_about = None
)]
pub struct Cli {
    /// Override warehouse database path
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Use this configuration file instead of the default one
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Increase diagnostic output on stderr (-v debug, -vv trace)
    #[arg(global = true, short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(global = true, long = "today", hide = true)]
    pub today: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Date selection shared by `chart` and `export`.
///
/// Start must lie in [min_date, today], end in [start, today].
#[derive(Args, Debug, Clone, Default)]
pub struct RangeArgs {
    #[arg(long, value_name = "YYYY-MM-DD", help = "Start date (default: config default_start)")]
    pub start: Option<String>,

    #[arg(long, value_name = "YYYY-MM-DD", help = "End date (default: today)")]
    pub end: Option<String>,

    /// Period instead of explicit bounds.
    ///
    /// Supported formats:
    /// - YYYY, YYYY-MM, YYYY-MM-DD
    /// - ranges in the same format: YYYY:YYYY, YYYY-MM:YYYY-MM,
    ///   YYYY-MM-DD:YYYY-MM-DD
    ///
    /// The period is clipped to the allowed window.
    #[arg(
        long,
        short,
        conflicts_with_all = ["start", "end"],
        help = "Year/month/day or a custom range (YYYY, YYYY-MM, YYYY-MM-DD, or a:b)"
    )]
    pub period: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the configuration file and the warehouse task table
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Validate the current configuration")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Draw the bar chart of completed tasks per day
    Chart {
        #[command(flatten)]
        range: RangeArgs,

        #[arg(long = "raw", help = "Also show the raw fetched rows")]
        raw: bool,

        #[arg(long, value_name = "FILE", help = "Also write the chart as an HTML page")]
        html: Option<String>,

        #[arg(long, short = 'f', help = "Overwrite the HTML file without asking")]
        force: bool,
    },

    /// Export daily counts (or raw rows) to a file
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[command(flatten)]
        range: RangeArgs,

        #[arg(long = "raw", help = "Export the raw fetched rows instead of daily counts")]
        raw: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Interactive session: change dates and the chart is redrawn
    Session {
        #[arg(long = "raw", help = "Start with the raw data table shown")]
        raw: bool,
    },

    /// Show warehouse file and task table information
    Info,
}
