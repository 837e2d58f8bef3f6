//! Trait abstractions for weather lookups.
//!
//! This module provides the [`WeatherService`] trait so front ends can be
//! written against any source of weather reports, the mock engine included.

use async_trait::async_trait;

use weatherly_types::{QueryResult, SearchQuery};

use crate::error::Result;

/// Trait abstracting a weather lookup.
///
/// # Example
///
/// ```
/// use weatherly_core::{WeatherEngine, WeatherService};
/// use weatherly_types::{SearchQuery, parse_iso_date};
///
/// async fn location_of<S: WeatherService>(service: &S, query: &SearchQuery) -> Option<String> {
///     let result = service.query(query).await.ok()?;
///     result.into_report().map(|r| r.current_conditions.location)
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let engine = WeatherEngine::builder().seed(1).no_latency().build();
/// let query = SearchQuery::builder("oslo, norway", parse_iso_date("2025-01-10").unwrap())
///     .build()
///     .unwrap();
/// assert_eq!(location_of(&engine, &query).await.as_deref(), Some("Oslo"));
/// # }
/// ```
#[async_trait]
pub trait WeatherService: Send + Sync {
    /// Answer a query.
    ///
    /// An implausible query yields `Ok(QueryResult::NotFound)`; `Err` is
    /// reserved for faults.
    async fn query(&self, query: &SearchQuery) -> Result<QueryResult>;
}
