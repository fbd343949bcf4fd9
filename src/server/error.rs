//! HTTP boundary error type

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::core::error::{ListingError, PathError};

/// Error type for the HTTP layer
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Listing(#[from] ListingError),

    #[error("{0}")]
    Path(#[from] PathError),

    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Not a file: {path}")]
    NotAFile { path: String },

    #[error("Server bind failed: {reason}")]
    BindFailed { reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {reason}")]
    Internal { reason: String },
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Listing(ListingError::NotFound { .. })
            | ApiError::Listing(ListingError::NotADirectory { .. }) => StatusCode::NOT_FOUND,
            ApiError::Listing(ListingError::Io { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Path(PathError::Traversal { .. }) => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } | ApiError::NotAFile { .. } => StatusCode::NOT_FOUND,
            ApiError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ApiError::Io(_) | ApiError::BindFailed { .. } | ApiError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        } else {
            tracing::warn!("request rejected: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
