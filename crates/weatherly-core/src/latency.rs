//! Simulated network latency.
//!
//! Cache misses wait a random delay before generating, so a front end shows
//! its loading state as it would against a real API. Cache hits never wait.

use std::time::Duration;

use rand::Rng;

use crate::error::{Error, Result};

/// Configuration for the artificial delay on cache misses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatencyConfig {
    /// Whether to delay at all.
    pub enabled: bool,
    /// Shortest delay.
    pub min: Duration,
    /// Longest delay.
    pub max: Duration,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min: Duration::from_millis(800),
            max: Duration::from_millis(1500),
        }
    }
}

impl LatencyConfig {
    /// Delay uniformly drawn between `min` and `max` (inclusive).
    pub fn new(min: Duration, max: Duration) -> Result<Self> {
        let config = Self {
            enabled: true,
            min,
            max,
        };
        config.validate()?;
        Ok(config)
    }

    /// No delay, for tests and non-interactive callers.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Check that the range is well formed.
    pub fn validate(&self) -> Result<()> {
        if self.min > self.max {
            return Err(Error::invalid_config(format!(
                "latency min {:?} exceeds max {:?}",
                self.min, self.max
            )));
        }
        Ok(())
    }

    /// Draw a delay, or `None` when latency simulation is off.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Duration> {
        if !self.enabled {
            return None;
        }
        let min = self.min.as_millis() as u64;
        let max = (self.max.as_millis() as u64).max(min);
        Some(Duration::from_millis(rng.random_range(min..=max)))
    }
}
