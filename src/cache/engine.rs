//! Cache Engine Module
//!
//! The public cache handle. Owns the store behind a single mutex, reports to
//! the injected metrics observer and manages the sweep task lifecycle.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::cache::{CacheMetrics, CacheStore, EvictionPolicy, NoopMetrics, Options};
use crate::error::{CacheError, Result};
use crate::tasks::spawn_reaper;

// == Cache ==
/// Bucket-namespaced in-memory cache with TTL expiration and a fixed
/// eviction policy.
///
/// All operations serialize on one internal mutex, so calls from concurrent
/// tasks are safe and linearizable. Every critical section is pure in-memory
/// work; the lock is never held across an await point.
pub struct Cache {
    store: Arc<Mutex<CacheStore>>,
    shutdown: watch::Sender<bool>,
    reaper: Option<JoinHandle<()>>,
}

impl Cache {
    // == Constructors ==
    /// Creates a cache that reports to no one.
    ///
    /// `capacity` is the maximum number of entries across all buckets and
    /// must be at least 1. A zero `sweep_interval` disables the background
    /// sweep; expired entries are then only removed when a get finds them.
    /// With sweeping enabled this must be called inside a Tokio runtime.
    pub fn new(
        capacity: usize,
        policy: EvictionPolicy,
        sweep_interval: Duration,
    ) -> Result<Self> {
        Self::with_metrics(capacity, policy, sweep_interval, Arc::new(NoopMetrics))
    }

    /// Creates a cache that reports activity to `metrics`.
    ///
    /// The observer is invoked synchronously inside the cache lock and must
    /// not block.
    pub fn with_metrics(
        capacity: usize,
        policy: EvictionPolicy,
        sweep_interval: Duration,
        metrics: Arc<dyn CacheMetrics>,
    ) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidOptions(
                "capacity must be at least 1".to_string(),
            ));
        }

        let store = Arc::new(Mutex::new(CacheStore::new(capacity, policy, metrics)));
        let (shutdown, rx) = watch::channel(false);

        let reaper = if sweep_interval.is_zero() {
            None
        } else {
            Some(spawn_reaper(store.clone(), sweep_interval, rx))
        };

        Ok(Self {
            store,
            shutdown,
            reaper,
        })
    }

    // == Operations ==
    /// Stores a value under `(bucket, key)`, creating the bucket on first
    /// use. See [`CacheStore::set`] for overwrite and eviction behavior.
    pub fn set(&self, bucket: &str, key: &str, value: Bytes, opts: &Options) -> Result<()> {
        self.store.lock().set(bucket, key, value, opts)
    }

    /// Retrieves the value stored under `(bucket, key)`.
    pub fn get(&self, bucket: &str, key: &str, opts: &Options) -> Result<Bytes> {
        self.store.lock().get(bucket, key, opts)
    }

    /// Removes the entry stored under `(bucket, key)`.
    pub fn delete(&self, bucket: &str, key: &str) -> Result<()> {
        self.store.lock().delete(bucket, key)
    }

    // == Lifecycle ==
    /// Stops the background sweep task.
    ///
    /// Safe to call any number of times. A sweep already in progress runs to
    /// completion; no new sweep starts afterwards. Data operations keep
    /// working, with expired entries still removed lazily on reads.
    pub fn stop(&self) {
        let _ = self.shutdown.send(true);
    }

    // == Accessors ==
    /// Returns the current number of entries across all buckets.
    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    /// Returns the configured eviction policy.
    pub fn policy(&self) -> EvictionPolicy {
        self.store.lock().policy()
    }

    /// Returns the configured capacity.
    pub fn capacity(&self) -> usize {
        self.store.lock().capacity()
    }
}

impl Drop for Cache {
    fn drop(&mut self) {
        self.stop();
    }
}
