//! Cache Store Module
//!
//! Bucket-namespaced storage combining the bucket index with the global
//! order sequence, capacity eviction and TTL expiration. All methods assume
//! the caller holds the engine lock.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;

use crate::cache::{CacheEntry, CacheMetrics, EvictionPolicy, NodeId, Options, OrderTracker};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Bucket-namespaced cache storage with pluggable eviction and TTL support.
///
/// Buckets map keys to handles into the order sequence; the sequence nodes
/// own the entries. Both sides are updated together, so every indexed handle
/// resolves to a live node and every node is indexed exactly once.
pub struct CacheStore {
    /// Bucket name -> key -> order node handle
    buckets: HashMap<String, HashMap<String, NodeId>>,
    /// Global sequence over all live entries, oldest first
    order: OrderTracker<CacheEntry>,
    /// Victim selection strategy, fixed at construction
    policy: EvictionPolicy,
    /// Maximum number of entries across all buckets
    capacity: usize,
    /// Activity observer, invoked inside the engine lock
    metrics: Arc<dyn CacheMetrics>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries across all buckets (>= 1,
    ///   validated by the engine constructor)
    /// * `policy` - Eviction policy applied for the lifetime of the store
    /// * `metrics` - Observer notified of cache activity
    pub fn new(capacity: usize, policy: EvictionPolicy, metrics: Arc<dyn CacheMetrics>) -> Self {
        Self {
            buckets: HashMap::new(),
            order: OrderTracker::with_capacity(capacity),
            policy,
            capacity,
            metrics,
        }
    }

    // == Set ==
    /// Stores a value under `(bucket, key)`.
    ///
    /// An existing key is overwritten in place and its expiration is
    /// recomputed from the TTL supplied with this call. A new key lands at
    /// the newest end of the order sequence; if the cache is at capacity one
    /// victim is evicted first. The bucket is created on first use.
    pub fn set(&mut self, bucket: &str, key: &str, value: Bytes, opts: &Options) -> Result<()> {
        self.check_policy(opts.policy)?;

        // Overwrite case: replace value and expiry, touch recency if the
        // policy tracks it
        if let Ok(id) = self.lookup(bucket, key) {
            if let Some(entry) = self.order.get_mut(id) {
                entry.update(value, opts.ttl);
            }
            if self.policy.updates_recency() {
                self.order.move_to_back(id);
            }
            self.metrics.record_set_existing();
            return Ok(());
        }

        // New key: make room first when at capacity
        if self.order.len() >= self.capacity {
            self.evict_one();
        }

        let entry = CacheEntry::new(bucket.to_string(), key.to_string(), value, opts.ttl);
        let id = self.order.push_back(entry);
        self.buckets
            .entry(bucket.to_string())
            .or_default()
            .insert(key.to_string(), id);

        self.metrics.record_set();
        self.metrics.record_size(self.order.len());
        Ok(())
    }

    // == Get ==
    /// Retrieves the value stored under `(bucket, key)`.
    ///
    /// An entry whose TTL has elapsed is removed on the spot and reported as
    /// expired; the next get sees it as absent. Under LRU/MRU a successful
    /// get moves the entry to the newest end of the sequence.
    pub fn get(&mut self, bucket: &str, key: &str, opts: &Options) -> Result<Bytes> {
        self.check_policy(opts.policy)?;

        let id = match self.lookup(bucket, key) {
            Ok(id) => id,
            Err(err) => {
                self.metrics.record_not_found();
                return Err(err);
            }
        };

        if let Some(entry) = self.order.get(id) {
            if entry.is_expired() {
                // Lazy expiration on the read path
                self.remove_entry(id);
                self.metrics.record_expire(true);
                self.metrics.record_size(self.order.len());
                return Err(CacheError::KeyExpired(key.to_string()));
            }

            let value = entry.value.clone();
            if self.policy.updates_recency() {
                self.order.move_to_back(id);
            }
            self.metrics.record_hit();
            Ok(value)
        } else {
            self.metrics.record_not_found();
            Err(CacheError::KeyNotFound(key.to_string()))
        }
    }

    // == Delete ==
    /// Removes the entry stored under `(bucket, key)`.
    ///
    /// Removing the last key of a bucket removes the bucket as well.
    pub fn delete(&mut self, bucket: &str, key: &str) -> Result<()> {
        let id = self.lookup(bucket, key)?;
        self.remove_entry(id);
        self.metrics.record_delete();
        self.metrics.record_size(self.order.len());
        Ok(())
    }

    // == Sweep Expired ==
    /// Removes every expired entry.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&mut self) -> usize {
        let expired_ids: Vec<NodeId> = self
            .order
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(id, _)| id)
            .collect();

        let count = expired_ids.len();

        for id in expired_ids {
            self.remove_entry(id);
            self.metrics.record_expire(false);
        }

        self.metrics.record_size(self.order.len());
        count
    }

    // == Accessors ==
    /// Returns the current number of entries across all buckets.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the configured eviction policy.
    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    /// Returns the configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Policy Check ==
    /// Checks a per-call policy assertion against the configured policy.
    ///
    /// `None` means no preference and always passes.
    fn check_policy(&self, requested: EvictionPolicy) -> Result<()> {
        if requested == EvictionPolicy::None || requested == self.policy {
            Ok(())
        } else {
            Err(CacheError::InvalidOptions(format!(
                "policy '{}' conflicts with configured policy '{}'",
                requested.as_str(),
                self.policy.as_str()
            )))
        }
    }

    // == Lookup ==
    /// Resolves `(bucket, key)` to an order node handle.
    fn lookup(&self, bucket: &str, key: &str) -> Result<NodeId> {
        let keys = self
            .buckets
            .get(bucket)
            .ok_or_else(|| CacheError::BucketNotFound(bucket.to_string()))?;
        keys.get(key)
            .copied()
            .ok_or_else(|| CacheError::KeyNotFound(key.to_string()))
    }

    // == Remove Entry ==
    /// Removes a node from the sequence and the bucket index.
    ///
    /// Shared by delete, eviction and expiration so that bucket cleanup
    /// behaves the same on every removal path.
    fn remove_entry(&mut self, id: NodeId) -> Option<CacheEntry> {
        let entry = self.order.remove(id)?;
        if let Some(keys) = self.buckets.get_mut(&entry.bucket) {
            keys.remove(&entry.key);
            if keys.is_empty() {
                self.buckets.remove(&entry.bucket);
            }
        }
        Some(entry)
    }

    // == Evict One ==
    /// Removes one entry according to the configured policy.
    fn evict_one(&mut self) {
        let victim = if self.policy.evicts_newest() {
            self.order.tail_id()
        } else {
            self.order.head_id()
        };

        if let Some(id) = victim {
            if self.remove_entry(id).is_some() {
                self.metrics.record_evict();
            }
        }
    }

    // == Debug Validation ==
    /// Asserts the bucket index and the order sequence describe the same set
    /// of entries.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate(&self) {
        self.order.debug_validate();

        let mut indexed = 0usize;
        for (bucket, keys) in &self.buckets {
            assert!(!keys.is_empty(), "empty bucket '{}' left behind", bucket);
            for (key, id) in keys {
                let entry = self
                    .order
                    .get(*id)
                    .unwrap_or_else(|| panic!("dangling handle for '{}/{}'", bucket, key));
                assert_eq!(&entry.bucket, bucket);
                assert_eq!(&entry.key, key);
                indexed += 1;
            }
        }
        assert_eq!(indexed, self.order.len());
        assert!(self.order.len() <= self.capacity);
    }
}
