//! Error types for the LRU store
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == LRU Error Enum ==
/// Unified error type for the store, its backends and the HTTP layer.
///
/// Backends report failures with the same type, so the store hands them
/// back to callers untouched.
#[derive(Error, Debug)]
pub enum LruError {
    /// Missing or malformed argument (empty namespace, zero capacity, bad key)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Key not present (HTTP layer only; the store itself returns `None`)
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Filesystem failure in a backing store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted sequence could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Any other backing store failure
    #[error("Backend error: {0}")]
    Backend(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for LruError {
    fn into_response(self) -> Response {
        let status = match &self {
            LruError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            LruError::NotFound(_) => StatusCode::NOT_FOUND,
            LruError::Io(_) | LruError::Serialization(_) | LruError::Backend(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the store.
pub type Result<T> = std::result::Result<T, LruError>;
