//! Error types for the cache server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache server.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Bucket does not exist
    #[error("Bucket not found: {0}")]
    BucketNotFound(String),

    /// Key not found in bucket
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// Key was present but its TTL elapsed
    #[error("Key expired: {0}")]
    KeyExpired(String),

    /// Rejected TTL or eviction policy options
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            CacheError::BucketNotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            CacheError::KeyNotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            CacheError::KeyExpired(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            CacheError::InvalidOptions(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache server.
pub type Result<T> = std::result::Result<T, CacheError>;
