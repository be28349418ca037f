//! API error type and its JSON rendering.
//!
//! Every failure leaves the service as
//! `{"success": false, "error": {"code": "...", "message": "..."}}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use medimate_contracts::{error::TriageError, verify::VerificationReport};

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
    /// Individual rule failures, present for rejected request bodies.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication required")]
    Unauthorized,
    #[error("Invalid request: {0}")]
    BadRequest(String),
    /// The body failed verification; every failed rule is reported.
    #[error("Invalid request: {}", .0.summary())]
    Rejected(VerificationReport),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "AUTH_REQUIRED",
                "Authentication required".to_string(),
                Vec::new(),
            ),
            ApiError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail, Vec::new())
            }
            ApiError::Rejected(report) => {
                let details: Vec<String> = report.failures.iter().map(|f| f.message.clone()).collect();
                let message = details
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "Request failed verification".to_string());
                (StatusCode::BAD_REQUEST, "VALIDATION_FAILED", message, details)
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "Something went wrong, please try again".to_string(),
                    Vec::new(),
                )
            }
        };

        let body = ErrorBody {
            success: false,
            error: ErrorDetail { code, message, details },
        };
        (status, Json(body)).into_response()
    }
}

impl From<TriageError> for ApiError {
    fn from(err: TriageError) -> Self {
        match err {
            TriageError::Unauthorized => ApiError::Unauthorized,
            TriageError::Validation { reason } => ApiError::BadRequest(reason),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
