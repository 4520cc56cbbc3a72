//! Request DTOs for the cache server API
//!
//! Defines the query parameters accepted by the cache routes and their
//! translation into engine options.

use std::time::Duration;

use serde::Deserialize;

use crate::cache::{EvictionPolicy, Options};
use crate::error::{CacheError, Result};

/// Query parameters accepted by the GET and PUT cache routes.
///
/// # Fields
/// - `ttl_ms`: Entry lifetime in milliseconds; 0 or absent means no
///   expiration
/// - `policy`: Eviction policy assertion; must name the policy the server
///   was configured with
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptionsQuery {
    /// TTL in milliseconds
    #[serde(default)]
    pub ttl_ms: Option<i64>,
    /// Eviction policy token
    #[serde(default)]
    pub policy: Option<String>,
}

impl OptionsQuery {
    /// Translates the raw query parameters into engine options.
    ///
    /// Rejects negative TTLs and unknown policy tokens.
    pub fn into_options(self) -> Result<Options> {
        let ttl = match self.ttl_ms {
            Some(ms) if ms < 0 => {
                return Err(CacheError::InvalidOptions(format!(
                    "ttl_ms must not be negative, got {}",
                    ms
                )));
            }
            Some(ms) => Duration::from_millis(ms as u64),
            None => Duration::ZERO,
        };

        let policy = match self.policy.as_deref() {
            Some(token) => EvictionPolicy::parse_token(token).ok_or_else(|| {
                CacheError::InvalidOptions(format!("unknown eviction policy '{}'", token))
            })?,
            None => EvictionPolicy::None,
        };

        Ok(Options { ttl, policy })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_query_deserialize() {
        let json = r#"{"ttl_ms": 1500, "policy": "lru"}"#;
        let query: OptionsQuery = serde_json::from_str(json).unwrap();
        assert_eq!(query.ttl_ms, Some(1500));
        assert_eq!(query.policy.as_deref(), Some("lru"));
    }

    #[test]
    fn test_options_query_empty() {
        let query: OptionsQuery = serde_json::from_str("{}").unwrap();
        let opts = query.into_options().unwrap();
        assert_eq!(opts, Options::default());
    }

    #[test]
    fn test_into_options_ttl() {
        let query = OptionsQuery {
            ttl_ms: Some(1500),
            policy: None,
        };
        let opts = query.into_options().unwrap();
        assert_eq!(opts.ttl, Duration::from_millis(1500));
        assert_eq!(opts.policy, EvictionPolicy::None);
    }

    #[test]
    fn test_into_options_zero_ttl_means_no_expiration() {
        let query = OptionsQuery {
            ttl_ms: Some(0),
            policy: None,
        };
        let opts = query.into_options().unwrap();
        assert_eq!(opts.ttl, Duration::ZERO);
    }

    #[test]
    fn test_into_options_negative_ttl_rejected() {
        let query = OptionsQuery {
            ttl_ms: Some(-5),
            policy: None,
        };
        assert!(matches!(
            query.into_options(),
            Err(CacheError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_into_options_policy_token() {
        let query = OptionsQuery {
            ttl_ms: None,
            policy: Some("MRU".to_string()),
        };
        let opts = query.into_options().unwrap();
        assert_eq!(opts.policy, EvictionPolicy::Mru);
    }

    #[test]
    fn test_into_options_unknown_policy_rejected() {
        let query = OptionsQuery {
            ttl_ms: None,
            policy: Some("random".to_string()),
        };
        assert!(matches!(
            query.into_options(),
            Err(CacheError::InvalidOptions(_))
        ));
    }
}
