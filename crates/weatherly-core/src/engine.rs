//! The weather query engine.
//!
//! [`WeatherEngine`] answers [`SearchQuery`]s with a cache in front of the
//! [`WeatherGenerator`]:
//!
//! 1. look up the canonical [`cache_key`]; a hit is returned immediately
//! 2. on a miss, wait the simulated latency
//! 3. generate, store the result (or the not-found sentinel), return it
//!
//! Cache failures are logged and never reach the caller.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use weatherly_types::{QueryResult, SearchQuery};

use crate::cache::{MemoryCache, SessionCache, cache_key};
use crate::error::Result;
use crate::generator::WeatherGenerator;
use crate::latency::LatencyConfig;
use crate::locale::WeekdayFormatter;
use crate::traits::WeatherService;

/// Cache counters for an engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Queries answered from the cache.
    pub hits: u64,
    /// Queries that went to the generator.
    pub misses: u64,
}

impl EngineStats {
    /// Total queries answered.
    pub fn total(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of queries served from the cache (0.0 when idle).
    pub fn hit_rate(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }
}

/// Mock weather engine with a session cache.
///
/// # Example
///
/// ```
/// use weatherly_core::WeatherEngine;
/// use weatherly_types::{SearchQuery, parse_iso_date};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let engine = WeatherEngine::builder().seed(42).no_latency().build();
/// let query = SearchQuery::builder("Paris", parse_iso_date("2025-06-01")?)
///     .end_date(parse_iso_date("2025-06-03")?)
///     .build()?;
///
/// let report = engine.query(&query).await?.into_report().unwrap();
/// assert_eq!(report.forecast.len(), 2);
///
/// // Served from the cache the second time
/// engine.query(&query).await?;
/// assert_eq!(engine.generation_count(), 1);
/// # Ok(())
/// # }
/// ```
pub struct WeatherEngine {
    generator: WeatherGenerator,
    cache: Arc<dyn SessionCache>,
    latency: LatencyConfig,
    rng: Mutex<StdRng>,
    generations: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl std::fmt::Debug for WeatherEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherEngine")
            .field("latency", &self.latency)
            .field("generations", &self.generation_count())
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

impl Default for WeatherEngine {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WeatherEngine {
    /// Start configuring an engine.
    pub fn builder() -> WeatherEngineBuilder {
        WeatherEngineBuilder::new()
    }

    /// Answer a query, consulting the cache first.
    pub async fn query(&self, query: &SearchQuery) -> Result<QueryResult> {
        let key = cache_key(query);

        if let Some(result) = self.lookup(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, not_found = result.is_not_found(), "Cache hit");
            return Ok(result);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(key = %key, "Cache miss");

        // Never hold the random source across the delay
        let delay = {
            let mut rng = self.rng.lock().await;
            self.latency.sample(&mut *rng)
        };
        if let Some(delay) = delay {
            debug!(?delay, "Simulating latency");
            tokio::time::sleep(delay).await;
        }

        self.generations.fetch_add(1, Ordering::Relaxed);
        let result = {
            let mut rng = self.rng.lock().await;
            self.generator.generate(query, &mut *rng)?
        };

        self.store(&key, &result);
        Ok(result)
    }

    /// Number of times the generator has run.
    pub fn generation_count(&self) -> u64 {
        self.generations.load(Ordering::Relaxed)
    }

    /// Cache hit and miss counters.
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Reset the generation and cache counters.
    pub fn reset_stats(&self) {
        self.generations.store(0, Ordering::Relaxed);
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// The session cache this engine reads and writes.
    pub fn cache(&self) -> &Arc<dyn SessionCache> {
        &self.cache
    }

    /// Latency settings in effect.
    pub fn latency(&self) -> &LatencyConfig {
        &self.latency
    }

    fn lookup(&self, key: &str) -> Option<QueryResult> {
        let raw = match self.cache.get(key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(key, error = %e, "Cache read failed, continuing uncached");
                return None;
            }
        };

        // The sentinel "null" decodes to NotFound
        match serde_json::from_str::<QueryResult>(&raw) {
            Ok(result) => Some(result),
            Err(e) => {
                warn!(key, error = %e, "Ignoring undecodable cache entry");
                None
            }
        }
    }

    fn store(&self, key: &str, result: &QueryResult) {
        let value = match serde_json::to_string(result) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Failed to encode result for the cache");
                return;
            }
        };
        if let Err(e) = self.cache.set(key, &value) {
            warn!(key, error = %e, "Cache write failed, result not cached");
        }
    }
}

#[async_trait]
impl WeatherService for WeatherEngine {
    async fn query(&self, query: &SearchQuery) -> Result<QueryResult> {
        WeatherEngine::query(self, query).await
    }
}

/// Builder for [`WeatherEngine`].
#[derive(Default)]
pub struct WeatherEngineBuilder {
    cache: Option<Arc<dyn SessionCache>>,
    latency: LatencyConfig,
    seed: Option<u64>,
    formatter: Option<Arc<dyn WeekdayFormatter>>,
}

impl WeatherEngineBuilder {
    /// Defaults: in-memory cache, 800-1500 ms latency, OS-seeded randomness,
    /// built-in weekday names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific session cache.
    #[must_use]
    pub fn cache(mut self, cache: Arc<dyn SessionCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Set the simulated latency.
    #[must_use]
    pub fn latency(mut self, latency: LatencyConfig) -> Self {
        self.latency = latency;
        self
    }

    /// Disable the simulated latency.
    #[must_use]
    pub fn no_latency(self) -> Self {
        self.latency(LatencyConfig::disabled())
    }

    /// Seed the random source for reproducible output.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Seed the random source when a seed is given.
    #[must_use]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Use a custom weekday formatter.
    #[must_use]
    pub fn formatter(mut self, formatter: Arc<dyn WeekdayFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Build the engine.
    pub fn build(self) -> WeatherEngine {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let generator = match self.formatter {
            Some(formatter) => WeatherGenerator::new(formatter),
            None => WeatherGenerator::default(),
        };

        WeatherEngine {
            generator,
            cache: self.cache.unwrap_or_else(|| Arc::new(MemoryCache::new())),
            latency: self.latency,
            rng: Mutex::new(rng),
            generations: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }
}
