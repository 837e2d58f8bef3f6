//! Configuration file management.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use weatherly_core::LatencyConfig;
use weatherly_types::Units;

use crate::cli::OutputFormat;

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "WEATHERLY_CONFIG";

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Default language tag
    #[serde(default)]
    pub language: Option<String>,

    /// Default unit system ("celsius" or "fahrenheit")
    #[serde(default)]
    pub units: Option<String>,

    /// Default output format ("text" or "json")
    #[serde(default)]
    pub format: Option<String>,

    /// Disable colored output
    #[serde(default)]
    pub no_color: bool,

    /// Simulated network delay
    #[serde(default)]
    pub latency: LatencySettings,
}

/// `[latency]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencySettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_min_ms")]
    pub min_ms: u64,

    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

fn default_true() -> bool {
    true
}

fn default_min_ms() -> u64 {
    800
}

fn default_max_ms() -> u64 {
    1500
}

impl Default for LatencySettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            min_ms: default_min_ms(),
            max_ms: default_max_ms(),
        }
    }
}

impl LatencySettings {
    /// Engine latency for these settings; `no_delay` wins over the file.
    pub fn to_latency(&self, no_delay: bool) -> Result<LatencyConfig> {
        if no_delay || !self.enabled {
            return Ok(LatencyConfig::disabled());
        }
        LatencyConfig::new(
            Duration::from_millis(self.min_ms),
            Duration::from_millis(self.max_ms),
        )
        .context("Invalid [latency] settings in config")
    }
}

impl Config {
    /// Get the config file path
    pub fn path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("weatherly")
            .join("config.toml")
    }

    /// Load config from file, or return default if not found
    pub fn load() -> Self {
        let path = Self::path();
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config: {}", e);
                    }
                },
                Err(e) => {
                    eprintln!("Warning: Failed to read config: {}", e);
                }
            }
        }
        Self::default()
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::path();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Resolve units: explicit flag overrides config, config overrides celsius.
    pub fn resolve_units(&self, flag: Option<Units>) -> Result<Units> {
        if let Some(units) = flag {
            return Ok(units);
        }
        match &self.units {
            Some(value) => value
                .parse()
                .with_context(|| format!("Invalid units in config: {value}")),
            None => Ok(Units::default()),
        }
    }

    /// Resolve the output format: explicit flag overrides config.
    pub fn resolve_format(&self, flag: Option<OutputFormat>) -> OutputFormat {
        flag.or_else(|| self.format.as_deref().and_then(OutputFormat::from_config))
            .unwrap_or_default()
    }

    /// Resolve the language tag: explicit flag overrides config.
    pub fn resolve_language(&self, flag: Option<String>) -> Option<String> {
        flag.or_else(|| self.language.clone())
    }
}
