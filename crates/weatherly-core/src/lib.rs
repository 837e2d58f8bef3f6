//! Mock weather generation and session caching engine.
//!
//! This crate answers weather queries with plausible, randomly generated
//! reports and caches every answer for the life of a session, so repeat
//! queries return the same report without the simulated network delay.
//!
//! # Features
//!
//! - **Generation**: current conditions plus a multi-day forecast with 24
//!   hourly temperatures per day, drawn from fixed per-condition profiles
//! - **Units**: metric or imperial output from the same random draws
//! - **Filtering**: keep only forecast days with a requested condition
//! - **Not found**: implausible queries (snow in the desert) yield
//!   [`QueryResult::NotFound`], which is cached like any other answer
//! - **Caching**: pluggable [`SessionCache`] backends keyed by a canonical
//!   [`cache_key`](cache::cache_key)
//! - **Reproducibility**: seed the engine for deterministic output
//!
//! # Quick Start
//!
//! ```
//! use weatherly_core::WeatherEngine;
//! use weatherly_types::{Condition, SearchQuery, parse_iso_date};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = WeatherEngine::builder().seed(3).no_latency().build();
//!
//!     let query = SearchQuery::builder("Vancouver, Canada", parse_iso_date("2025-11-02")?)
//!         .condition(Condition::Rain)
//!         .build()?;
//!
//!     if let Some(report) = engine.query(&query).await?.report() {
//!         println!("{}: {}°C", report.current_conditions.location, report.current_conditions.temperature);
//!         for day in &report.forecast {
//!             println!("{} {} {}/{}", day.day, day.date, day.high, day.low);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod engine;
pub mod error;
pub mod generator;
pub mod latency;
pub mod locale;
pub mod mock;
pub mod profiles;
pub mod traits;
pub mod units;

// Core exports
pub use cache::{CacheError, CacheResult, MemoryCache, SessionCache};
pub use engine::{EngineStats, WeatherEngine, WeatherEngineBuilder};
pub use error::{Error, Result};
pub use generator::WeatherGenerator;
pub use latency::LatencyConfig;
pub use locale::{BuiltinWeekdays, TranslationKey, WeekdayFormatter, translate};
pub use mock::MockCache;
pub use profiles::WeatherProfile;
pub use traits::WeatherService;

/// Type alias for a shared engine reference.
pub type SharedEngine = std::sync::Arc<WeatherEngine>;

// Re-export from weatherly-types
pub use weatherly_types::{
    Condition, CurrentConditions, ForecastDay, HourlyRecord, QueryResult, SearchQuery, Units,
    WeatherReport,
};
