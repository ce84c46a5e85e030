//! Service error types with HTTP status code mapping.
//!
//! [`PlaceError`] is the central error type. Each variant maps to a
//! specific HTTP status code and structured JSON error response.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::PlaceId;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "place not found: 7"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Code | Category   | HTTP Status                 |
/// |------|------------|-----------------------------|
/// | 1001 | Validation | 400 Bad Request             |
/// | 2001 | Not Found  | 404 Not Found               |
/// | 3001 | Storage    | 500 Internal Server Error   |
/// | 3002 | Publish    | 502 Bad Gateway             |
/// | 3003 | Cancelled  | 504 Gateway Timeout         |
#[derive(Debug, thiserror::Error)]
pub enum PlaceError {
    /// Malformed or missing input.
    #[error("invalid request: {0}")]
    Validation(String),

    /// No place with the given id exists.
    #[error("place not found: {0}")]
    NotFound(PlaceId),

    /// The backing store was unavailable or rejected the operation.
    #[error("storage error: {0}")]
    Storage(String),

    /// The topic was unavailable or rejected the message.
    #[error("publish to topic {topic} failed: {reason}")]
    Publish {
        /// Topic the message was addressed to.
        topic: String,
        /// Underlying failure.
        reason: String,
    },

    /// The operation did not complete before its deadline.
    #[error("{operation} cancelled: deadline exceeded")]
    Cancelled {
        /// Name of the interrupted operation.
        operation: &'static str,
    },
}

impl PlaceError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::Validation(_) => 1001,
            Self::NotFound(_) => 2001,
            Self::Storage(_) => 3001,
            Self::Publish { .. } => 3002,
            Self::Cancelled { .. } => 3003,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Publish { .. } => StatusCode::BAD_GATEWAY,
            Self::Cancelled { .. } => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl From<sqlx::Error> for PlaceError {
    fn from(err: sqlx::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<JsonRejection> for PlaceError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for PlaceError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for PlaceError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for PlaceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
