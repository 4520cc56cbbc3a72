//! Cache Options Module
//!
//! Eviction policy tokens and the per-call options accepted by set and get.

use std::time::Duration;

use serde::Serialize;

// == Eviction Policy ==
/// Strategy for choosing a victim when an insert would exceed capacity.
///
/// The policy is fixed when the cache is constructed. `None` doubles as the
/// "no preference" value in per-call options; as a configured policy it
/// behaves like `Oldest` (insertion-order eviction without recency updates).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EvictionPolicy {
    /// No preference; evicts in insertion order
    None,
    /// Evict the least recently inserted entry
    Oldest,
    /// Evict the most recently inserted entry
    Newest,
    /// Evict the least recently used entry
    Lru,
    /// Evict the most recently used entry
    Mru,
}

impl EvictionPolicy {
    // == Token Parsing ==
    /// Parses a policy token (case-insensitive). Returns `None` for unknown
    /// tokens; empty input is treated as no preference.
    pub fn parse_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "" | "none" => Some(Self::None),
            "oldest" => Some(Self::Oldest),
            "newest" => Some(Self::Newest),
            "lru" => Some(Self::Lru),
            "mru" => Some(Self::Mru),
            _ => None,
        }
    }

    /// Returns the canonical token for this policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Oldest => "oldest",
            Self::Newest => "newest",
            Self::Lru => "lru",
            Self::Mru => "mru",
        }
    }

    // == Behavior Flags ==
    /// Whether reads and in-place updates refresh an entry's position.
    pub fn updates_recency(&self) -> bool {
        matches!(self, Self::Lru | Self::Mru)
    }

    /// Whether the victim is taken from the newest end of the sequence.
    pub fn evicts_newest(&self) -> bool {
        matches!(self, Self::Newest | Self::Mru)
    }
}

// == Options ==
/// Per-call options for set and get operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Time to live for the entry; zero means no expiration
    pub ttl: Duration,
    /// Policy assertion; `None` means no preference, anything else must
    /// match the policy the cache was constructed with
    pub policy: EvictionPolicy,
}

impl Options {
    /// Options with the given TTL and no policy preference.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            policy: EvictionPolicy::None,
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            ttl: Duration::ZERO,
            policy: EvictionPolicy::None,
        }
    }
}
