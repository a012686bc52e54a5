//! `/api/review` handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::warn;

use review::{ReviewReply, ReviewRequest};

use crate::error::ApiError;
use crate::services::review::{ReviewError, handle_review};
use crate::state::AppState;

/// POST `/api/review` — run the pair-engineer review on the posted buffer.
pub async fn post_review(
    State(state): State<AppState>,
    Json(request): Json<ReviewRequest>,
) -> Result<Json<ReviewReply>, ApiError> {
    let Some(llm) = state.llm.clone() else {
        return Err(review_error_response(&ReviewError::LlmNotConfigured));
    };

    match handle_review(&state, &llm, &request).await {
        Ok(reply) => Ok(Json(reply)),
        Err(e) => {
            warn!(error = %e, "review request failed");
            Err(review_error_response(&e))
        }
    }
}

/// Map a service error onto its HTTP status and JSON envelope.
pub(crate) fn review_error_response(error: &ReviewError) -> ApiError {
    let status = match error {
        ReviewError::EmptyCode | ReviewError::InvalidSession => StatusCode::BAD_REQUEST,
        ReviewError::CodeTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        ReviewError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
        ReviewError::LlmNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        ReviewError::LlmError(_) => StatusCode::BAD_GATEWAY,
    };
    ApiError::new(status, error)
}

#[cfg(test)]
#[path = "review_test.rs"]
mod tests;
