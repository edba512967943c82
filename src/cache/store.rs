//! In-memory store for fetched API responses
//!
//! Provides a `MemoryCache` that keeps one entry per resource key together with
//! the timestamp of the last successful fetch. Expired entries are still
//! readable (with `is_expired = true`) so callers can fall back to stale data
//! when an upstream source is unavailable.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// Default staleness window for cached entries (5 minutes)
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// A cached value and the time of the last successful fetch that produced it
#[derive(Debug, Clone)]
struct CacheEntry {
    /// The cached data, type-erased as JSON
    value: Value,
    /// When the data was last successfully fetched
    fetched_at: DateTime<Utc>,
}

/// Result of reading from cache, including metadata about cache freshness
#[derive(Debug)]
pub struct CachedData<T> {
    /// The cached data
    pub data: T,
    /// When the data was last successfully fetched
    pub fetched_at: DateTime<Utc>,
    /// Whether the entry has outlived the requested TTL
    pub is_expired: bool,
}

/// In-memory cache of API responses keyed by resource name
///
/// Entries are stored as JSON values so a single cache can hold every resource
/// type. At most one entry exists per key; a successful fetch overwrites the
/// previous entry and its timestamp, a failed fetch never touches either.
/// Entries are never evicted (lifetime = process lifetime).
///
/// The cache is an explicitly owned value, not a global; share it by holding it
/// inside the component that needs it. The inner lock is never held across an
/// await point, so the cache can be used from concurrent tasks. Concurrent
/// fetches for the same key are not deduplicated: whichever completes last
/// overwrites the entry.
#[derive(Debug, Default)]
pub struct MemoryCache {
    /// Map of resource key to cached entry
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    /// Creates a new, empty MemoryCache
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Reads data from the cache
    ///
    /// Returns `None` if no entry exists for `key` or the stored value cannot
    /// be decoded as `T`. Returns `Some(CachedData)` with `is_expired = true`
    /// if the entry exists but is older than `ttl`, allowing for graceful
    /// degradation when upstream sources are unavailable.
    ///
    /// # Arguments
    /// * `key` - The cache key to read
    /// * `ttl` - Staleness window to judge the entry against
    pub fn read<T: DeserializeOwned>(&self, key: &str, ttl: Duration) -> Option<CachedData<T>> {
        let entries = self.entries.lock().ok()?;
        let entry = entries.get(key)?;
        let data = serde_json::from_value(entry.value.clone()).ok()?;

        let age = Utc::now().signed_duration_since(entry.fetched_at);
        let is_expired = age >= TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX);

        Some(CachedData {
            data,
            fetched_at: entry.fetched_at,
            is_expired,
        })
    }

    /// Writes data to the cache, stamping it with the current time
    ///
    /// Overwrites any existing entry for `key`. A value that cannot be
    /// serialized (or a poisoned lock) drops the write; the caller still has
    /// the value in hand and the cache simply stays as it was.
    pub fn write<T: Serialize>(&self, key: &str, data: &T) {
        let Ok(value) = serde_json::to_value(data) else {
            return;
        };
        let Ok(mut entries) = self.entries.lock() else {
            return;
        };
        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                fetched_at: Utc::now(),
            },
        );
    }

    /// Read-through fetch with a staleness window and stale fallback
    ///
    /// # Arguments
    /// * `key` - Resource key identifying the cached value
    /// * `ttl` - How long a cached value is trusted without revalidation
    /// * `fetch` - Zero-argument operation producing the raw data or failing
    /// * `transform` - Mapping from raw data to the typed result, may fail
    ///
    /// # Behavior
    /// - If a fresh entry exists for `key`, returns it without invoking `fetch`
    /// - Otherwise invokes `fetch` and `transform`; on success the result is
    ///   stored under `key` and returned
    /// - If `fetch` or `transform` fails and any entry exists for `key`
    ///   (expired included), returns the cached value and suppresses the error
    /// - If `fetch` fails and no entry exists, propagates the error
    pub async fn get_or_fetch<Raw, T, E, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        fetch: impl FnOnce() -> Fut,
        transform: impl FnOnce(Raw) -> Result<T, E>,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        Fut: Future<Output = Result<Raw, E>>,
    {
        if let Some(cached) = self.read::<T>(key, ttl) {
            if !cached.is_expired {
                return Ok(cached.data);
            }
        }

        match fetch().await.and_then(transform) {
            Ok(data) => {
                self.write(key, &data);
                Ok(data)
            }
            Err(err) => match self.read::<T>(key, ttl) {
                Some(cached) => Ok(cached.data),
                None => Err(err),
            },
        }
    }

    /// Rewinds the stored timestamp of an entry, so tests can age entries
    /// without sleeping
    #[cfg(test)]
    pub(crate) fn backdate(&self, key: &str, age: Duration) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        if let Some(entry) = entries.get_mut(key) {
            entry.fetched_at = entry.fetched_at - TimeDelta::from_std(age).expect("age out of range");
        }
    }
}
