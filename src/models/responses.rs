//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheStats, EvictionPolicy};

/// Response body for the SET operation (PUT /cache/:bucket/:key)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The bucket that was written to
    pub bucket: String,
    /// The key that was set
    pub key: String,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        let bucket = bucket.into();
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            bucket,
            key,
        }
    }
}

/// Response body for the DELETE operation (DELETE /cache/:bucket/:key)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The bucket that was written to
    pub bucket: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        let bucket = bucket.into();
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            bucket,
            key,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of successful retrievals
    pub hits: u64,
    /// Number of retrievals that found no bucket or key
    pub not_found: u64,
    /// Number of sets that inserted a new key
    pub sets: u64,
    /// Number of sets that replaced an existing key
    pub sets_existing: u64,
    /// Number of explicit deletes
    pub deletes: u64,
    /// Number of entries evicted under capacity pressure
    pub evictions: u64,
    /// Number of expired entries removed by reads
    pub expired_lazy: u64,
    /// Number of expired entries removed by the background sweep
    pub expired_swept: u64,
    /// Current number of entries in the cache
    pub size: usize,
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Configured eviction policy token
    pub policy: &'static str,
    /// Hit rate over all retrievals
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from a stats snapshot and the cache
    /// configuration
    pub fn new(stats: CacheStats, policy: EvictionPolicy, capacity: usize) -> Self {
        let hit_rate = stats.hit_rate();
        Self {
            hits: stats.hits,
            not_found: stats.not_found,
            sets: stats.sets,
            sets_existing: stats.sets_existing,
            deletes: stats.deletes,
            evictions: stats.evictions,
            expired_lazy: stats.expired_lazy,
            expired_swept: stats.expired_swept,
            size: stats.size,
            capacity,
            policy: policy.as_str(),
            hit_rate,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
