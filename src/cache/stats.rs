//! Cache Statistics Module
//!
//! Hit/miss counters and the snapshot handed to the diagnostics endpoint.

use serde::Serialize;

// == Counters ==
/// Process-lifetime access counters, owned by the store behind its lock.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Counters {
    pub hits: u64,
    pub misses: u64,
}

impl Counters {
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }
}

// == Cache Stats ==
/// Point-in-time view of the cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Entries currently held, including stale entries not yet visited
    pub size: usize,
    /// Reads that found a live entry
    pub hits: u64,
    /// Reads that found nothing or a stale entry
    pub misses: u64,
}

impl CacheStats {
    pub(crate) fn snapshot(size: usize, counters: Counters) -> Self {
        Self {
            size,
            hits: counters.hits,
            misses: counters.misses,
        }
    }

    // == Hit Rate ==
    /// Hit percentage rounded to one decimal place.
    ///
    /// Returns `hits / (hits + misses) * 100`, or `0.0` before any read.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            return 0.0;
        }
        let percent = self.hits as f64 / total as f64 * 100.0;
        (percent * 10.0).round() / 10.0
    }

    /// Hit rate rendered as `"66.7%"`.
    pub fn hit_rate_label(&self) -> String {
        format!("{:.1}%", self.hit_rate())
    }
}
