//! Error types for weatherly-core.
//!
//! # Outcomes that are not errors
//!
//! A query for weather that cannot plausibly occur (snow in Cairo) is
//! answered with [`QueryResult::NotFound`](weatherly_types::QueryResult), not
//! with an error. Cache failures are not errors either: the engine logs them
//! and answers uncached.
//!
//! # Error classification
//!
//! | Error | Meaning | Suggested handling |
//! |-------|---------|--------------------|
//! | [`Error::Generation`] | Internal fault while generating (date overflow) | Show a generic "try again" message |
//! | [`Error::InvalidConfig`] | Engine misconfigured (bad latency range) | Fix configuration and restart |
//!
//! Malformed queries never reach the engine: the builder and parsers in
//! `weatherly-types` reject them with their own error types.

use thiserror::Error;

/// Errors that can occur while answering weather queries.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Generating mock data failed unexpectedly.
    #[error("Failed to generate mock weather data: {0}")]
    Generation(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Create a generation error.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }

    /// Create a configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}

/// Result type alias using weatherly-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;
