//! Config command implementation.

use anyhow::{Result, bail};

use crate::cli::ConfigAction;
use crate::config::Config;

pub fn cmd_config(action: ConfigAction, config: &Config, quiet: bool) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let path = Config::path();
            if !quiet {
                if path.exists() {
                    eprintln!("# {}", path.display());
                } else {
                    eprintln!("# {} (not found, showing defaults)", path.display());
                }
            }
            print!("{}", toml::to_string_pretty(config)?);
        }
        ConfigAction::Path => {
            println!("{}", Config::path().display());
        }
        ConfigAction::Init { force } => {
            let path = Config::path();
            if path.exists() && !force {
                bail!(
                    "Config file already exists at {} (use --force to overwrite)",
                    path.display()
                );
            }
            Config::default().save()?;
            if !quiet {
                println!("Wrote default config to {}", path.display());
            }
        }
    }
    Ok(())
}
