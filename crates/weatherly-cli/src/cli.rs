//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use time::Date;
use weatherly_types::{ParseError, Units, parse_iso_date};

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    /// Parse a format name from the config file.
    pub fn from_config(value: &str) -> Option<Self> {
        Self::from_str(value, true).ok()
    }
}

fn parse_date(value: &str) -> Result<Date, ParseError> {
    parse_iso_date(value)
}

/// Engine settings shared by `query` and `session`
#[derive(Debug, Clone, Args)]
pub struct EngineArgs {
    /// Seed the random source for reproducible output
    #[arg(long, env = "WEATHERLY_SEED")]
    pub seed: Option<u64>,

    /// Skip the simulated network delay
    #[arg(long)]
    pub no_delay: bool,
}

/// Arguments for a single query
#[derive(Debug, Clone, Args)]
pub struct QueryArgs {
    /// Location name, e.g. "Paris, France"
    #[arg(short, long)]
    pub location: String,

    /// First day of the range (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_date)]
    pub start: Date,

    /// Last day of the range (YYYY-MM-DD); defaults to a 5-day forecast
    #[arg(short, long, value_parser = parse_date)]
    pub end: Option<Date>,

    /// Only keep forecast days with this condition ("any" for no filter)
    #[arg(short, long)]
    pub condition: Option<String>,

    /// Language tag for weekday names and labels (overrides config)
    #[arg(long)]
    pub lang: Option<String>,

    /// Unit system: celsius/metric or fahrenheit/imperial (overrides config)
    #[arg(short, long)]
    pub units: Option<Units>,

    /// Output format (overrides config)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output compact JSON (no pretty-printing)
    #[arg(long)]
    pub compact: bool,

    /// Include hourly temperatures in text output
    #[arg(long)]
    pub hourly: bool,

    #[command(flatten)]
    pub engine: EngineArgs,
}

#[derive(Parser)]
#[command(name = "weatherly")]
#[command(author, version, about = "Mock weather forecasts with a session cache", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up the weather for a location and date range
    Query(QueryArgs),

    /// Answer JSON queries from stdin, one per line, sharing one cache
    Session {
        /// Cache in a SQLite file for the session (deleted on exit)
        #[arg(long)]
        store: Option<PathBuf>,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Manage CLI configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Config subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the config file path
    Path,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
