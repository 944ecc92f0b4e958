//! Error types for the preflight cache service
//!
//! The cache itself never fails; these errors cover the HTTP surface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Preflight Error Enum ==
/// Unified error type for the preflight cache service.
#[derive(Error, Debug)]
pub enum PreflightError {
    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for PreflightError {
    fn into_response(self) -> Response {
        let status = match &self {
            PreflightError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the preflight cache service.
pub type Result<T> = std::result::Result<T, PreflightError>;
