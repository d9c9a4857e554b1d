//! Cache Entry Module
//!
//! Defines a single cached payload together with its insertion time and TTL.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A cached payload with the instant it was stored and its time-to-live.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The cached payload
    pub data: V,
    /// Monotonic insertion time
    pub stored_at: Instant,
    /// Lifetime measured from `stored_at`
    pub ttl: Duration,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates an entry stamped with the current instant.
    pub fn new(data: V, ttl: Duration) -> Self {
        Self {
            data,
            stored_at: Instant::now(),
            ttl,
        }
    }

    // == Is Expired ==
    /// Checks if the entry is stale.
    ///
    /// An entry stays live while the elapsed time is at most its TTL; it
    /// becomes stale only once `elapsed > ttl`.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Same as [`is_expired`](Self::is_expired), evaluated at `now`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.stored_at) > self.ttl
    }
}
