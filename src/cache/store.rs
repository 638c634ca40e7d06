//! TTL-bounded key-value store backing the read-through cache.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::keys::CacheKey;

struct Entry {
    value: Value,
    expires_at: Instant,
}

/// In-process cache with a uniform TTL and explicit per-key invalidation.
///
/// Values are stored as JSON documents so the store stays agnostic of the
/// listing types it holds. Get/set/forget are each atomic per key; there is
/// no cross-key transaction, so a concurrent write's `forget` racing a
/// read's repopulation can leave one stale entry until the next write or
/// TTL expiry.
pub struct CacheStore {
    ttl: Duration,
    entries: RwLock<HashMap<CacheKey, Entry>>,
}

impl CacheStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Return the cached value, or run `producer` and cache its success
    /// result. The producer is invoked only on a miss; its error caches
    /// nothing and is returned untouched.
    pub async fn remember<T, E, F, Fut>(&self, key: CacheKey, producer: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(value) = self.get::<T>(&key) {
            debug!(key = %key, "cache hit");
            return Ok(value);
        }
        debug!(key = %key, "cache miss");
        let produced = producer().await?;
        self.put(key, &produced);
        Ok(produced)
    }

    /// Drop the entry for `key`, if any.
    pub fn forget(&self, key: &CacheKey) {
        if self.write_entries("forget").remove(key).is_some() {
            debug!(key = %key, "cache invalidated");
        }
    }

    pub fn get<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let entries = self.read_entries("get");
        let entry = entries.get(key)?;
        if entry.expires_at <= Instant::now() {
            return None;
        }
        match serde_json::from_value(entry.value.clone()) {
            Ok(value) => Some(value),
            Err(error) => {
                warn!(key = %key, %error, "cached document failed to decode, treating as miss");
                None
            }
        }
    }

    pub fn put<T: Serialize>(&self, key: CacheKey, value: &T) {
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(error) => {
                warn!(key = %key, %error, "value failed to encode, not caching");
                return;
            }
        };
        let entry = Entry {
            value,
            expires_at: Instant::now() + self.ttl,
        };
        self.write_entries("put").insert(key, entry);
    }

    // A panic while a guard is held must not wedge the cache for the rest
    // of the process; recover the map and keep serving.
    fn read_entries(&self, op: &'static str) -> RwLockReadGuard<'_, HashMap<CacheKey, Entry>> {
        match self.entries.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!(
                    op,
                    lock_kind = "rwlock.read",
                    result = "poisoned_recovered",
                    hint = "state may be stale after panic in another thread",
                    "Recovered from poisoned cache lock"
                );
                poisoned.into_inner()
            }
        }
    }

    fn write_entries(&self, op: &'static str) -> RwLockWriteGuard<'_, HashMap<CacheKey, Entry>> {
        match self.entries.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!(
                    op,
                    lock_kind = "rwlock.write",
                    result = "poisoned_recovered",
                    hint = "state may be stale after panic in another thread",
                    "Recovered from poisoned cache lock"
                );
                poisoned.into_inner()
            }
        }
    }
}
