//! Bucketcache - A bucket-namespaced in-memory cache server
//!
//! Provides a capacity-bounded cache with per-entry TTL expiration and a
//! pluggable eviction policy, behind a thin HTTP front end.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{Cache, CacheMetrics, CacheStats, EvictionPolicy, NoopMetrics, Options, StatsCollector};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::spawn_reaper;
