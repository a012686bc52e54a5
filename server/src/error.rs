//! Error envelope shared by all API routes.
//!
//! Every service error carries a stable machine-readable code and a
//! retryable flag so clients can distinguish "back off and retry" from
//! "fix the request". Handlers convert errors into a single JSON shape:
//! `{ "error": { "code", "message", "retryable" } }`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Stable error metadata implemented by every service error enum.
pub trait ErrorCode {
    /// Machine-readable code, e.g. `"E_RATE_LIMITED"`.
    fn error_code(&self) -> &'static str;

    /// Whether the client may retry the same request later.
    fn retryable(&self) -> bool;
}

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub retryable: bool,
}

impl ApiError {
    /// Wrap a service error with the HTTP status it maps to.
    pub fn new<E: ErrorCode + std::fmt::Display>(status: StatusCode, err: &E) -> Self {
        Self { status, code: err.error_code(), message: err.to_string(), retryable: err.retryable() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": {
                "code": self.code,
                "message": self.message,
                "retryable": self.retryable,
            }
        });
        (self.status, Json(body)).into_response()
    }
}
