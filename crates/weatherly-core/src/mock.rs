//! Mock cache implementation for testing.
//!
//! [`MockCache`] wraps a [`MemoryCache`] and implements [`SessionCache`], so
//! it can stand in for any backend handed to the engine.
//!
//! # Features
//!
//! - **Failure injection**: make reads or writes fail, permanently or for the
//!   next few calls
//! - **Call counting**: observe how often the engine touched the cache

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::cache::{CacheError, CacheResult, MemoryCache, SessionCache};

/// A session cache with failure injection and call counters.
///
/// # Example
///
/// ```
/// use weatherly_core::cache::SessionCache;
/// use weatherly_core::MockCache;
///
/// let cache = MockCache::new();
/// cache.set_transient_failures(1);
/// assert!(cache.get("k").is_err());
/// assert!(cache.get("k").unwrap().is_none());
/// assert_eq!(cache.get_count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MockCache {
    inner: MemoryCache,
    get_count: AtomicU32,
    set_count: AtomicU32,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    /// Number of operations to fail before succeeding again.
    fail_count: AtomicU32,
    /// Failures left (decremented on each failure).
    remaining_failures: AtomicU32,
}

impl MockCache {
    /// Create an empty mock cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `get` fail (or succeed again).
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::Relaxed);
    }

    /// Make every `set` fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    /// Fail the next `count` operations of any kind, then recover.
    pub fn set_transient_failures(&self, count: u32) {
        self.fail_count.store(count, Ordering::Relaxed);
        self.remaining_failures.store(count, Ordering::Relaxed);
    }

    /// Re-arm the transient failures configured last.
    pub fn reset_transient_failures(&self) {
        self.remaining_failures
            .store(self.fail_count.load(Ordering::Relaxed), Ordering::Relaxed);
    }

    /// Transient failures still pending.
    pub fn remaining_failures(&self) -> u32 {
        self.remaining_failures.load(Ordering::Relaxed)
    }

    /// Number of `get` calls so far, failed ones included.
    pub fn get_count(&self) -> u32 {
        self.get_count.load(Ordering::Relaxed)
    }

    /// Number of `set` calls so far, failed ones included.
    pub fn set_count(&self) -> u32 {
        self.set_count.load(Ordering::Relaxed)
    }

    /// Reset both call counters.
    pub fn reset_counts(&self) {
        self.get_count.store(0, Ordering::Relaxed);
        self.set_count.store(0, Ordering::Relaxed);
    }

    fn check_should_fail(&self, permanent: &AtomicBool) -> CacheResult<()> {
        if self
            .remaining_failures
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(CacheError::Unavailable("injected transient failure".to_string()));
        }
        if permanent.load(Ordering::Relaxed) {
            return Err(CacheError::Backend("injected failure".to_string()));
        }
        Ok(())
    }
}

impl SessionCache for MockCache {
    fn get(&self, key: &str) -> CacheResult<Option<String>> {
        self.get_count.fetch_add(1, Ordering::Relaxed);
        self.check_should_fail(&self.fail_reads)?;
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> CacheResult<()> {
        self.set_count.fetch_add(1, Ordering::Relaxed);
        self.check_should_fail(&self.fail_writes)?;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> CacheResult<()> {
        self.inner.remove(key)
    }

    fn clear(&self) -> CacheResult<()> {
        self.inner.clear()
    }

    fn len(&self) -> CacheResult<usize> {
        self.inner.len()
    }
}
