//! Todo Cache - multi-user to-do task service
//!
//! Serves per-user task pages through an in-process TTL cache that is
//! invalidated by key prefix whenever a user's tasks change.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;
pub mod telemetry;

pub use api::AppState;
pub use cache::CacheStore;
pub use config::Config;
pub use tasks::TaskService;
