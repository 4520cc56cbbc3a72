//! Cache Metrics Module
//!
//! The observer interface the engine reports to, a no-op default, and an
//! atomic collector that backs the stats endpoint.
//!
//! Hooks are invoked synchronously while the engine lock is held, so
//! implementations must only do cheap, non-blocking work.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use serde::Serialize;

// == Metrics Trait ==
/// Observer for cache activity. All hooks default to no-ops.
pub trait CacheMetrics: Send + Sync {
    /// A get found a live entry.
    fn record_hit(&self) {}
    /// A get missed (unknown bucket or key).
    fn record_not_found(&self) {}
    /// A set inserted a new key.
    fn record_set(&self) {}
    /// A set replaced an existing key in place.
    fn record_set_existing(&self) {}
    /// An explicit delete removed an entry.
    fn record_delete(&self) {}
    /// Capacity pressure evicted an entry.
    fn record_evict(&self) {}
    /// An expired entry was removed; `lazy` is true when a get discovered
    /// it, false when the sweep did.
    fn record_expire(&self, lazy: bool) {
        let _ = lazy;
    }
    /// The number of live entries changed.
    fn record_size(&self, size: usize) {
        let _ = size;
    }
}

// == Noop Metrics ==
/// Default observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetrics;

impl CacheMetrics for NoopMetrics {}

// == Stats Collector ==
/// Counts cache activity with relaxed atomics so the stats endpoint can
/// snapshot without taking the engine lock.
#[derive(Debug, Default)]
pub struct StatsCollector {
    hits: AtomicU64,
    not_found: AtomicU64,
    sets: AtomicU64,
    sets_existing: AtomicU64,
    deletes: AtomicU64,
    evictions: AtomicU64,
    expired_lazy: AtomicU64,
    expired_swept: AtomicU64,
    size: AtomicUsize,
}

impl StatsCollector {
    /// Creates a collector with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes a point-in-time snapshot of all counters.
    pub fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            sets: self.sets.load(Ordering::Relaxed),
            sets_existing: self.sets_existing.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            expired_lazy: self.expired_lazy.load(Ordering::Relaxed),
            expired_swept: self.expired_swept.load(Ordering::Relaxed),
            size: self.size.load(Ordering::Relaxed),
        }
    }
}

impl CacheMetrics for StatsCollector {
    fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_not_found(&self) {
        self.not_found.fetch_add(1, Ordering::Relaxed);
    }

    fn record_set(&self) {
        self.sets.fetch_add(1, Ordering::Relaxed);
    }

    fn record_set_existing(&self) {
        self.sets_existing.fetch_add(1, Ordering::Relaxed);
    }

    fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    fn record_evict(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    fn record_expire(&self, lazy: bool) {
        if lazy {
            self.expired_lazy.fetch_add(1, Ordering::Relaxed);
        } else {
            self.expired_swept.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn record_size(&self, size: usize) {
        self.size.store(size, Ordering::Relaxed);
    }
}

// == Cache Stats ==
/// Point-in-time snapshot of cache activity counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals
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
    /// Number of expired entries removed by a get
    pub expired_lazy: u64,
    /// Number of expired entries removed by the sweep
    pub expired_swept: u64,
    /// Current number of entries in the cache
    pub size: usize,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Failed retrievals count both missing keys and keys a get found
    /// already expired. Returns 0.0 if no retrievals have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.not_found + self.expired_lazy;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
