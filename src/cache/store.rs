//! Cache Store Module
//!
//! Process-wide key/value cache with read-time TTL expiry and prefix
//! invalidation. All state sits behind one mutex.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::debug;

use crate::cache::stats::Counters;
use crate::cache::{CacheEntry, CacheStats};

#[derive(Debug)]
struct Inner<V> {
    entries: HashMap<String, CacheEntry<V>>,
    counters: Counters,
}

// == Cache Store ==
/// Time-bounded cache shared by reference between collaborators.
///
/// Expiry is lazy: a stale entry is only dropped when a `get` touches it,
/// so [`CacheStats::size`] may include stale entries. There is no size cap.
#[derive(Debug)]
pub struct CacheStore<V = Value> {
    inner: Mutex<Inner<V>>,
    /// TTL applied when `set` is called without one
    default_ttl: Duration,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `default_ttl` - Lifetime used by `set` when no TTL is given
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                counters: Counters::default(),
            }),
            default_ttl,
        }
    }

    // == Get ==
    /// Looks up a live entry.
    ///
    /// Counts exactly one hit or one miss. A stale entry is removed and
    /// reported as a miss.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        match inner.entries.get(key) {
            None => {
                inner.counters.record_miss();
                debug!(key, "cache miss");
                None
            }
            Some(entry) if entry.is_expired() => {
                inner.entries.remove(key);
                inner.counters.record_miss();
                debug!(key, "cache entry expired");
                None
            }
            Some(entry) => {
                inner.counters.record_hit();
                debug!(key, "cache hit");
                Some(entry.data.clone())
            }
        }
    }

    // == Set ==
    /// Inserts or overwrites `key`, restarting its lifetime.
    ///
    /// # Arguments
    /// * `key` - Opaque cache key
    /// * `value` - Payload to store
    /// * `ttl` - Lifetime; `None` uses the store default
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        let key = key.into();
        let ttl = ttl.unwrap_or(self.default_ttl);
        debug!(key = %key, ttl_ms = ttl.as_millis() as u64, "cache set");

        let mut inner = self.inner.lock();
        inner.entries.insert(key, CacheEntry::new(value, ttl));
    }

    // == Delete ==
    /// Removes `key`. Returns whether an entry was present.
    pub fn delete(&self, key: &str) -> bool {
        let removed = self.inner.lock().entries.remove(key).is_some();
        debug!(key, removed, "cache delete");
        removed
    }

    // == Clear Prefix ==
    /// Removes every entry whose key starts with `prefix`.
    ///
    /// Plain ordinal prefix match. Returns the number of entries removed.
    pub fn clear_prefix(&self, prefix: &str) -> usize {
        let mut inner = self.inner.lock();
        let before = inner.entries.len();
        inner.entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before - inner.entries.len();
        debug!(prefix, removed, "cache prefix cleared");
        removed
    }

    // == Stats ==
    /// Returns current size and access counters.
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        CacheStats::snapshot(inner.entries.len(), inner.counters)
    }

    // == Length ==
    /// Returns the number of held entries, stale ones included.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }
}
