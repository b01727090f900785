use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use crate::models::ErrorBody;

/// Body text returned for every failure that is not the caller's fault.
pub const GENERIC_ERROR: &str = "Internal Server Error";

/// Top-level application error.
/// All variants carry enough detail for logging; only validation errors
/// expose their message to the caller.
#[derive(Debug, Error)]
pub enum AppError {
    // ── Configuration errors ─────────────────────────────────────────────────
    #[error("Upstream URL is not configured (set CLOUDFLARE_WORKER_URL)")]
    UpstreamNotConfigured,

    #[error("HTTP client could not be built: {0}")]
    ClientBuild(#[source] reqwest::Error),

    // ── Client input errors ──────────────────────────────────────────────────
    #[error("Malformed request body: {message}")]
    MalformedRequest { message: String },

    // ── Upstream errors ──────────────────────────────────────────────────────
    #[error("Upstream request to {url} failed: {source}")]
    UpstreamUnavailable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Upstream responded with HTTP {status}")]
    UpstreamStatus { status: u16 },

    #[error("Upstream responded with HTTP {status} and no readable body")]
    UpstreamNoBody { status: u16 },

    // ── Validation errors ────────────────────────────────────────────────────
    #[error("Field '{field_name}' cannot be empty")]
    EmptyField { field_name: String },

    #[error("Field '{field_name}' must be between {min} and {max} (actual: {actual})")]
    OutOfRange { field_name: String, min: u32, max: u32, actual: u32 },
}

impl AppError {
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::EmptyField { .. } | AppError::OutOfRange { .. })
    }

    pub fn status_code(&self) -> StatusCode {
        if self.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = if self.is_validation() {
            ErrorBody { error: self.to_string() }
        } else {
            error!("Request failed: {self}");
            ErrorBody { error: GENERIC_ERROR.to_string() }
        };
        (status, Json(body)).into_response()
    }
}
