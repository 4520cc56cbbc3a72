//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use bytes::Bytes;

use crate::cache::{Cache, StatsCollector};
use crate::config::Config;
use crate::error::Result;
use crate::models::{DeleteResponse, HealthResponse, OptionsQuery, SetResponse, StatsResponse};

/// Application state shared across all handlers.
///
/// Holds the cache engine and the stats collector it reports to. The
/// collector is kept separately so the stats endpoint can snapshot counters
/// without touching the cache lock.
#[derive(Clone)]
pub struct AppState {
    /// The cache engine
    pub cache: Arc<Cache>,
    /// Activity counters backing the stats endpoint
    pub stats: Arc<StatsCollector>,
}

impl AppState {
    /// Creates a new AppState from an engine and the collector wired into it.
    pub fn new(cache: Cache, stats: Arc<StatsCollector>) -> Self {
        Self {
            cache: Arc::new(cache),
            stats,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the stats collector, then the cache engine reporting to it.
    /// Must be called inside a Tokio runtime when sweeping is enabled.
    pub fn from_config(config: &Config) -> Result<Self> {
        let stats = Arc::new(StatsCollector::new());
        let cache = Cache::with_metrics(
            config.max_entries,
            config.eviction_policy,
            config.sweep_interval(),
            stats.clone(),
        )?;
        Ok(Self::new(cache, stats))
    }
}

/// Handler for PUT /cache/:bucket/:key
///
/// Stores the raw request body under the addressed bucket and key. TTL and
/// policy assertion come from the query string.
pub async fn set_handler(
    State(state): State<AppState>,
    Path((bucket, key)): Path<(String, String)>,
    Query(query): Query<OptionsQuery>,
    body: Bytes,
) -> Result<Json<SetResponse>> {
    let opts = query.into_options()?;
    state.cache.set(&bucket, &key, body, &opts)?;

    Ok(Json(SetResponse::new(bucket, key)))
}

/// Handler for GET /cache/:bucket/:key
///
/// Returns the stored value as the raw response body.
pub async fn get_handler(
    State(state): State<AppState>,
    Path((bucket, key)): Path<(String, String)>,
    Query(query): Query<OptionsQuery>,
) -> Result<Bytes> {
    let opts = query.into_options()?;
    let value = state.cache.get(&bucket, &key, &opts)?;

    Ok(value)
}

/// Handler for DELETE /cache/:bucket/:key
///
/// Removes the addressed entry; the bucket disappears with its last key.
pub async fn delete_handler(
    State(state): State<AppState>,
    Path((bucket, key)): Path<(String, String)>,
) -> Result<Json<DeleteResponse>> {
    state.cache.delete(&bucket, &key)?;

    Ok(Json(DeleteResponse::new(bucket, key)))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let snapshot = state.stats.snapshot();

    Json(StatsResponse::new(
        snapshot,
        state.cache.policy(),
        state.cache.capacity(),
    ))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::EvictionPolicy;
    use std::time::Duration;

    fn test_state() -> AppState {
        let stats = Arc::new(StatsCollector::new());
        let cache = Cache::with_metrics(100, EvictionPolicy::Lru, Duration::ZERO, stats.clone())
            .unwrap();
        AppState::new(cache, stats)
    }

    fn path(bucket: &str, key: &str) -> Path<(String, String)> {
        Path((bucket.to_string(), key.to_string()))
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = test_state();

        let result = set_handler(
            State(state.clone()),
            path("users", "test_key"),
            Query(OptionsQuery::default()),
            Bytes::from_static(b"test_value"),
        )
        .await;
        assert!(result.is_ok());

        let result = get_handler(
            State(state),
            path("users", "test_key"),
            Query(OptionsQuery::default()),
        )
        .await;
        assert_eq!(result.unwrap(), Bytes::from_static(b"test_value"));
    }

    #[tokio::test]
    async fn test_get_missing_bucket() {
        let state = test_state();

        let result = get_handler(
            State(state),
            path("nope", "key"),
            Query(OptionsQuery::default()),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let state = test_state();

        set_handler(
            State(state.clone()),
            path("users", "to_delete"),
            Query(OptionsQuery::default()),
            Bytes::from_static(b"value"),
        )
        .await
        .unwrap();

        let result = delete_handler(State(state.clone()), path("users", "to_delete")).await;
        assert!(result.is_ok());

        let result = get_handler(
            State(state),
            path("users", "to_delete"),
            Query(OptionsQuery::default()),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_invalid_options_rejected() {
        let state = test_state();

        let query = OptionsQuery {
            ttl_ms: Some(-1),
            policy: None,
        };
        let result = set_handler(
            State(state.clone()),
            path("users", "k"),
            Query(query),
            Bytes::from_static(b"v"),
        )
        .await;
        assert!(result.is_err());

        let query = OptionsQuery {
            ttl_ms: None,
            policy: Some("fifo".to_string()),
        };
        let result = get_handler(State(state), path("users", "k"), Query(query)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = test_state();

        set_handler(
            State(state.clone()),
            path("users", "k"),
            Query(OptionsQuery::default()),
            Bytes::from_static(b"v"),
        )
        .await
        .unwrap();
        get_handler(
            State(state.clone()),
            path("users", "k"),
            Query(OptionsQuery::default()),
        )
        .await
        .unwrap();

        let response = stats_handler(State(state)).await;
        assert_eq!(response.sets, 1);
        assert_eq!(response.hits, 1);
        assert_eq!(response.size, 1);
        assert_eq!(response.policy, "lru");
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
