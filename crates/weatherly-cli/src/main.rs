//! Command-line front end for the Weatherly mock forecast engine.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `query` | Look up the weather for a location and date range |
//! | `session` | Answer JSON queries from stdin, sharing one cache |
//! | `config` | Manage CLI configuration |
//! | `completions` | Generate shell completions |
//!
//! # Configuration
//!
//! Settings live in `~/.config/weatherly/config.toml` (or the platform
//! equivalent, or `$WEATHERLY_CONFIG`): `language`, `units`, `format`,
//! `no_color` and a `[latency]` table. Command-line flags win.
//!
//! # Examples
//!
//! ```bash
//! weatherly query --location "Paris, France" --start 2025-06-01 --end 2025-06-03
//! weatherly query -l Cairo -s 2025-01-01 --condition snow --format json
//! echo '{"location":"Oslo","startDate":"2025-01-10"}' | weatherly session --no-delay
//! ```

mod cli;
mod commands;
mod config;
mod format;

use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::{cmd_config, cmd_query, cmd_session};
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle completions command early (before tracing init)
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "weatherly", &mut io::stdout());
        return Ok(());
    }

    // When quiet mode is enabled, suppress info-level logging
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(!cli.no_color)
        .init();

    let config = Config::load();

    match cli.command {
        Commands::Query(args) => cmd_query(args, &config, cli.no_color).await?,
        Commands::Session { store, engine } => cmd_session(store, &engine, &config).await?,
        Commands::Config { action } => cmd_config(action, &config, cli.quiet)?,
        Commands::Completions { .. } => {
            // Already handled above
            unreachable!()
        }
    }

    Ok(())
}
