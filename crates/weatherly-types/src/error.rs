//! Error types for query parsing and validation in weatherly-types.

use thiserror::Error;
use time::Date;

/// Errors that can occur when parsing user-supplied query fields.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Date string is not a `YYYY-MM-DD` calendar date.
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Condition name is not part of the weather profile pool.
    #[error("Unknown weather condition: {0}")]
    UnknownCondition(String),

    /// Unit system name is not recognized.
    #[error("Unknown unit system '{0}': expected celsius or fahrenheit")]
    UnknownUnits(String),
}

/// Errors raised when a [`SearchQuery`](crate::SearchQuery) fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum QueryError {
    /// Location was empty or only whitespace.
    #[error("Location must not be empty")]
    EmptyLocation,

    /// End date precedes the start date.
    #[error("End date {end} is before start date {start}")]
    EndBeforeStart {
        /// Requested start date.
        start: Date,
        /// Requested end date.
        end: Date,
    },
}

/// Result type alias using weatherly-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
