//! Error types for the cache driver
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the driver, the stores and the HTTP gateway.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Caller supplied a malformed input; raised before any store call
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Codec could not serialize a value
    #[error("Encode failed: {0}")]
    Encode(String),

    /// Codec could not reconstruct a value from its stored bytes
    #[error("Decode failed: {0}")]
    Decode(String),

    /// Store endpoint unreachable or connection dropped
    #[error("Store connection failed: {0}")]
    Connection(String),

    /// Store rejected or failed an operation
    #[error("Store operation failed: {0}")]
    Store(String),

    /// Resource not available on this gateway
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CacheError {
    /// HTTP status used when the error crosses the gateway.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CacheError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            CacheError::Encode(_) | CacheError::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CacheError::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
            CacheError::Store(_) => StatusCode::BAD_GATEWAY,
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

#[cfg(feature = "redis")]
impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_connection_refusal() || err.is_timeout() || err.is_connection_dropped() {
            CacheError::Connection(err.to_string())
        } else {
            CacheError::Store(err.to_string())
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
