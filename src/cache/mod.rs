//! Cache Module
//!
//! In-memory cache with lazy TTL expiry and prefix invalidation.

mod entry;
pub mod keys;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use keys::{task_list_key, task_prefix, user_key};
pub use stats::CacheStats;
pub use store::CacheStore;
