//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

use bytes::Bytes;

// == Cache Entry ==
/// Represents a single cache entry with its value and expiration metadata.
///
/// Entries remember their own bucket and key so that eviction and sweeping,
/// which walk the global order sequence, can update the bucket index without
/// a reverse lookup.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Bucket this entry belongs to
    pub bucket: String,
    /// Key within the bucket
    pub key: String,
    /// The stored value
    pub value: Bytes,
    /// Expiration deadline on the monotonic clock, None = no expiration
    pub expires_at: Option<Instant>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry.
    ///
    /// A zero TTL means the entry never expires.
    pub fn new(bucket: String, key: String, value: Bytes, ttl: Duration) -> Self {
        Self {
            bucket,
            key,
            value,
            expires_at: deadline_from_ttl(ttl),
        }
    }

    // == Update ==
    /// Replaces the value and recomputes the expiration deadline from `ttl`.
    ///
    /// The deadline is always recomputed, so updating with a zero TTL clears
    /// a previously set expiration.
    pub fn update(&mut self, value: Bytes, ttl: Duration) {
        self.value = value;
        self.expires_at = deadline_from_ttl(ttl);
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is considered expired when the current
    /// instant is greater than or equal to the deadline, so the entry becomes
    /// unreadable the moment its TTL has fully elapsed.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, or None if no expiration is set.
    ///
    /// This method is useful for debugging and statistics purposes.
    ///
    /// # Returns
    /// - `Some(0)` if the entry has expired (TTL elapsed)
    /// - `Some(remaining_ms)` if the entry has TTL and hasn't expired
    /// - `None` if the entry has no TTL (never expires)
    pub fn ttl_remaining_ms(&self) -> Option<u64> {
        self.expires_at.map(|deadline| {
            deadline
                .saturating_duration_since(Instant::now())
                .as_millis() as u64
        })
    }
}

// == Utility Functions ==
/// Converts a TTL into an absolute deadline. Zero means no expiration.
fn deadline_from_ttl(ttl: Duration) -> Option<Instant> {
    if ttl.is_zero() {
        None
    } else {
        Instant::now().checked_add(ttl)
    }
}
