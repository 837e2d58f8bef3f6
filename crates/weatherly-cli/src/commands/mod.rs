//! Command implementations for the CLI.

mod config;
mod query;
mod session;

use std::sync::Arc;

use anyhow::Result;
use weatherly_core::{SessionCache, WeatherEngine};

use crate::cli::EngineArgs;
use crate::config::Config;

pub use config::cmd_config;
pub use query::cmd_query;
pub use session::cmd_session;

/// Build an engine from flags and config, optionally on a given cache.
fn build_engine(
    args: &EngineArgs,
    config: &Config,
    cache: Option<Arc<dyn SessionCache>>,
) -> Result<WeatherEngine> {
    let mut builder = WeatherEngine::builder()
        .latency(config.latency.to_latency(args.no_delay)?)
        .maybe_seed(args.seed);
    if let Some(cache) = cache {
        builder = builder.cache(cache);
    }
    Ok(builder.build())
}
