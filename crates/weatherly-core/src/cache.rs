//! Session-scoped query cache.
//!
//! Entries map a canonical query key to either a JSON-serialized
//! [`WeatherReport`](weatherly_types::WeatherReport) or the
//! [`NOT_FOUND_SENTINEL`]. Entries live for the session and are never evicted
//! individually by the engine.
//!
//! Cache failures never reach the caller of a query: the engine logs them and
//! carries on uncached.

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;
use weatherly_types::SearchQuery;

/// Prefix shared by every cache key.
pub const CACHE_NAMESPACE: &str = "weather-cache:";

/// Stored value meaning "no plausible data for this query".
pub const NOT_FOUND_SENTINEL: &str = "null";

/// Build the canonical cache key for a query.
///
/// The fields are encoded as a JSON array after the namespace prefix, so a
/// missing end date (`null`) never collides with an empty string and no field
/// can bleed into its neighbour. The location is trimmed and lowercased.
///
/// # Example
///
/// ```
/// use weatherly_core::cache::cache_key;
/// use weatherly_types::{SearchQuery, parse_iso_date};
///
/// let query = SearchQuery::builder(" Paris ", parse_iso_date("2025-06-01").unwrap())
///     .build()
///     .unwrap();
/// assert_eq!(
///     cache_key(&query),
///     r#"weather-cache:["paris","2025-06-01",null,null,"en","celsius"]"#
/// );
/// ```
pub fn cache_key(query: &SearchQuery) -> String {
    let fields = serde_json::json!([
        query.normalized_location(),
        query.start_date().to_string(),
        query.end_date().map(|d| d.to_string()),
        query.condition().map(|c| c.name()),
        query.language(),
        query.units().as_str(),
    ]);
    format!("{CACHE_NAMESPACE}{fields}")
}

/// Errors raised by cache backends.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CacheError {
    /// The backing storage cannot be used.
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    /// The backing storage refused a write because it is full.
    #[error("Cache quota exceeded (limit {limit} entries)")]
    QuotaExceeded {
        /// Configured entry limit.
        limit: usize,
    },

    /// Backend-specific failure.
    #[error("Cache backend error: {0}")]
    Backend(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Key/value storage for one session.
///
/// Implementations must be safe to share between tasks; the engine only ever
/// calls these methods outside of its suspension points.
pub trait SessionCache: Send + Sync {
    /// Fetch the stored value for a key.
    fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Store a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> CacheResult<()>;

    /// Remove a single entry. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> CacheResult<()>;

    /// Drop every entry.
    fn clear(&self) -> CacheResult<()>;

    /// Number of stored entries.
    fn len(&self) -> CacheResult<usize>;

    /// Whether the cache holds no entries.
    fn is_empty(&self) -> CacheResult<bool> {
        Ok(self.len()? == 0)
    }
}

/// In-process cache backed by a `HashMap`.
///
/// Lives exactly as long as the value; dropping it ends the session.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, String>>,
    max_entries: Option<usize>,
}

impl MemoryCache {
    /// Create an unbounded cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache that refuses new keys once `max_entries` are stored,
    /// like a browser storage quota.
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            entries: RwLock::default(),
            max_entries: Some(max_entries),
        }
    }

    fn poisoned() -> CacheError {
        CacheError::Unavailable("cache lock poisoned".to_string())
    }
}

impl SessionCache for MemoryCache {
    fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let entries = self.entries.read().map_err(|_| Self::poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> CacheResult<()> {
        let mut entries = self.entries.write().map_err(|_| Self::poisoned())?;
        if let Some(limit) = self.max_entries
            && entries.len() >= limit
            && !entries.contains_key(key)
        {
            return Err(CacheError::QuotaExceeded { limit });
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> CacheResult<()> {
        let mut entries = self.entries.write().map_err(|_| Self::poisoned())?;
        entries.remove(key);
        Ok(())
    }

    fn clear(&self) -> CacheResult<()> {
        let mut entries = self.entries.write().map_err(|_| Self::poisoned())?;
        entries.clear();
        Ok(())
    }

    fn len(&self) -> CacheResult<usize> {
        let entries = self.entries.read().map_err(|_| Self::poisoned())?;
        Ok(entries.len())
    }
}
