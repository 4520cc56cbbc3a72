//! Cache Module
//!
//! Provides bucket-namespaced in-memory caching with TTL expiration and a
//! pluggable eviction policy.

mod engine;
mod entry;
mod metrics;
mod options;
mod order;
mod store;


// Re-export public types
pub use engine::Cache;
pub use entry::CacheEntry;
pub use metrics::{CacheMetrics, CacheStats, NoopMetrics, StatsCollector};
pub use options::{EvictionPolicy, Options};
pub use order::{NodeId, OrderTracker};
pub use store::CacheStore;
