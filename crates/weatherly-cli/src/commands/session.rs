//! Session command implementation.
//!
//! Reads one JSON request per line and writes one JSON line per request:
//! the report, `null` for not found, or `{"error": "..."}` for a request
//! that could not be answered. All requests share one engine and cache.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use weatherly_core::{SessionCache, WeatherEngine};
use weatherly_store::SessionStore;
use weatherly_types::{Condition, DEFAULT_LANGUAGE, SearchQuery, Units, parse_iso_date};

use super::build_engine;
use crate::cli::EngineArgs;
use crate::config::Config;

/// One line of session input, in the front end's field names.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    pub location: String,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    /// Condition filter; absent, empty or "any" means no filter.
    #[serde(default)]
    pub weather: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub units: Option<String>,
}

/// Values used when a request leaves a field out.
#[derive(Debug, Clone)]
pub struct SessionDefaults {
    pub language: String,
    pub units: Units,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            units: Units::default(),
        }
    }
}

impl SessionRequest {
    /// Validate into a query.
    pub fn into_query(self, defaults: &SessionDefaults) -> Result<SearchQuery> {
        let start = parse_iso_date(&self.start_date)?;
        let end = self
            .end_date
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(parse_iso_date)
            .transpose()?;
        let condition = match self.weather.as_deref() {
            Some(value) => Condition::parse_filter(value)?,
            None => None,
        };
        let units = match self.units.as_deref() {
            Some(value) => value.parse::<Units>()?,
            None => defaults.units,
        };

        let query = SearchQuery::builder(self.location, start)
            .maybe_end_date(end)
            .maybe_condition(condition)
            .language(self.language.unwrap_or_else(|| defaults.language.clone()))
            .units(units)
            .build()?;
        Ok(query)
    }
}

/// Counts for one session run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Requests answered with a report or not-found.
    pub answered: u64,
    /// Requests rejected with an error line.
    pub rejected: u64,
}

/// Answer every request line from `input`, writing one line each to `out`.
pub async fn run_session<R, W>(
    engine: &WeatherEngine,
    defaults: &SessionDefaults,
    input: R,
    out: &mut W,
) -> Result<SessionSummary>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut summary = SessionSummary::default();
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let answer = match answer_line(engine, defaults, line).await {
            Ok(json) => {
                summary.answered += 1;
                json
            }
            Err(e) => {
                summary.rejected += 1;
                warn!("Rejected request: {:#}", e);
                serde_json::json!({ "error": format!("{e:#}") }).to_string()
            }
        };
        writeln!(out, "{answer}")?;
        out.flush()?;
    }

    Ok(summary)
}

async fn answer_line(
    engine: &WeatherEngine,
    defaults: &SessionDefaults,
    line: &str,
) -> Result<String> {
    let request: SessionRequest = serde_json::from_str(line).context("Malformed request")?;
    let query = request.into_query(defaults)?;
    let result = engine.query(&query).await?;
    Ok(serde_json::to_string(&result)?)
}

pub async fn cmd_session(
    store: Option<PathBuf>,
    engine_args: &EngineArgs,
    config: &Config,
) -> Result<()> {
    let defaults = SessionDefaults {
        language: config
            .resolve_language(None)
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        units: config.resolve_units(None)?,
    };

    let store = match store {
        Some(path) => Some(Arc::new(
            SessionStore::open(&path)
                .with_context(|| format!("Failed to open session store {}", path.display()))?,
        )),
        None => None,
    };
    let cache = store.clone().map(|s| s as Arc<dyn SessionCache>);
    let engine = build_engine(engine_args, config, cache)?;

    let input = BufReader::new(tokio::io::stdin());
    let outcome = run_session(&engine, &defaults, input, &mut io::stdout()).await;

    let stats = engine.stats();
    info!(
        hits = stats.hits,
        misses = stats.misses,
        generated = engine.generation_count(),
        "Session finished"
    );
    drop(engine);

    if let Some(store) = store {
        let store = Arc::try_unwrap(store).map_err(|_| anyhow!("Session store still in use"))?;
        store.end().context("Failed to end session store")?;
    }

    let summary = outcome?;
    if summary.rejected > 0 {
        warn!(rejected = summary.rejected, "Some requests were rejected");
    }
    Ok(())
}
