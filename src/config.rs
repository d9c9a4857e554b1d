//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::telemetry::DEFAULT_TELEMETRY_CAPACITY;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// TTL in seconds for cache writes that do not pass one
    pub default_ttl: u64,
    /// TTL in seconds for cached task pages
    pub task_page_ttl: u64,
    /// TTL in seconds for cached user lookups
    pub user_ttl: u64,
    /// Number of telemetry events retained
    pub telemetry_capacity: usize,
    /// HTTP server port
    pub server_port: u16,
    /// bcrypt work factor for stored passwords
    pub bcrypt_cost: u32,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DEFAULT_TTL` - Default cache TTL in seconds (default: 300)
    /// - `TASK_PAGE_TTL` - Task page TTL in seconds (default: 300)
    /// - `USER_TTL` - User lookup TTL in seconds (default: 600)
    /// - `TELEMETRY_MAX` - Telemetry events retained (default: 100)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `BCRYPT_COST` - Password hashing cost (default: 12)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_ttl: env_or("DEFAULT_TTL", defaults.default_ttl),
            task_page_ttl: env_or("TASK_PAGE_TTL", defaults.task_page_ttl),
            user_ttl: env_or("USER_TTL", defaults.user_ttl),
            telemetry_capacity: env_or("TELEMETRY_MAX", defaults.telemetry_capacity),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            bcrypt_cost: env_or("BCRYPT_COST", defaults.bcrypt_cost),
        }
    }

    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl)
    }

    pub fn task_page_ttl(&self) -> Duration {
        Duration::from_secs(self.task_page_ttl)
    }

    pub fn user_ttl(&self) -> Duration {
        Duration::from_secs(self.user_ttl)
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl: 300,
            task_page_ttl: 300,
            user_ttl: 600,
            telemetry_capacity: DEFAULT_TELEMETRY_CAPACITY,
            server_port: 3000,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}
