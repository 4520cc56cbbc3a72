//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::cache::EvictionPolicy;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold across all buckets
    pub max_entries: usize,
    /// Eviction policy applied when the cache is full
    pub eviction_policy: EvictionPolicy,
    /// Background sweep interval in milliseconds (0 disables sweeping)
    pub sweep_interval_ms: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1024)
    /// - `EVICTION_POLICY` - one of none/oldest/newest/lru/mru (default: lru)
    /// - `SWEEP_INTERVAL_MS` - Sweep frequency in milliseconds (default: 500)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        Self {
            max_entries: env::var("MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1024),
            eviction_policy: env::var("EVICTION_POLICY")
                .ok()
                .and_then(|v| EvictionPolicy::parse_token(&v))
                .unwrap_or(EvictionPolicy::Lru),
            sweep_interval_ms: env::var("SWEEP_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(500),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
        }
    }

    /// Returns the sweep interval as a Duration.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 1024,
            eviction_policy: EvictionPolicy::Lru,
            sweep_interval_ms: 500,
            server_port: 3000,
        }
    }
}
