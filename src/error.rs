//! Error types for the media resolver
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::media::{Phase, ResolveFailure};

// == Media Error Enum ==
/// Unified error type for the crate.
#[derive(Error, Debug)]
pub enum MediaError {
    /// No live cache entry for the key
    #[error("Media not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A descriptor was stored before resolution completed
    #[error("Cannot store descriptor while resolver is {0}")]
    InvalidStoreCall(Phase),

    /// Enrichment gave up
    #[error("Resolution failed: {0}")]
    ResolutionFailed(#[from] ResolveFailure),
}

// == IntoResponse Implementation ==
impl IntoResponse for MediaError {
    fn into_response(self) -> Response {
        let status = match &self {
            MediaError::NotFound(_) => StatusCode::NOT_FOUND,
            MediaError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            MediaError::InvalidStoreCall(_) => StatusCode::CONFLICT,
            MediaError::ResolutionFailed(_) => StatusCode::BAD_GATEWAY,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, MediaError>;
