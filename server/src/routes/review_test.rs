use super::*;
use crate::llm::types::{ChatResponse, ContentBlock, LlmChat, LlmError, Message};
use crate::state::test_helpers;
use review::Language;
use std::sync::Arc;

struct FixedLlm {
    markdown: &'static str,
}

#[async_trait::async_trait]
impl LlmChat for FixedLlm {
    async fn chat(
        &self,
        _model: &str,
        _max_tokens: u32,
        _temperature: Option<f32>,
        _system: &str,
        _messages: &[Message],
    ) -> Result<ChatResponse, LlmError> {
        Ok(ChatResponse {
            content: vec![ContentBlock::Text { text: self.markdown.into() }],
            model: "mock".into(),
            stop_reason: "end_turn".into(),
            input_tokens: 3,
            output_tokens: 7,
        })
    }

    fn default_model(&self) -> &str {
        "mock"
    }
}

fn request() -> ReviewRequest {
    ReviewRequest {
        session_id: uuid::Uuid::new_v4().to_string(),
        language: Language::Go,
        code: "package main".into(),
        model: None,
        max_tokens: None,
        temperature: None,
    }
}

// =========================================================================
// post_review handler
// =========================================================================

#[tokio::test]
async fn handler_returns_reply_json() {
    let md = "## Tests\n- test the zero case\n";
    let state = test_helpers::test_app_state_with_llm(Arc::new(FixedLlm { markdown: md }));
    let Json(reply) = post_review(State(state), Json(request())).await.unwrap();
    assert_eq!(reply.markdown, md);
    assert_eq!(reply.tests, vec!["test the zero case"]);
}

#[tokio::test]
async fn handler_without_llm_returns_service_unavailable() {
    let state = test_helpers::test_app_state();
    let err = post_review(State(state), Json(request())).await.unwrap_err();
    assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(err.code, "E_LLM_NOT_CONFIGURED");
}

#[tokio::test]
async fn handler_rejects_empty_code_with_bad_request() {
    let state = test_helpers::test_app_state_with_llm(Arc::new(FixedLlm { markdown: "x" }));
    let mut req = request();
    req.code = String::new();
    let err = post_review(State(state), Json(req)).await.unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(err.code, "E_EMPTY_CODE");
}

// =========================================================================
// Error mapping
// =========================================================================

#[test]
fn status_mapping_covers_each_error_class() {
    let cases = [
        (ReviewError::EmptyCode, StatusCode::BAD_REQUEST),
        (ReviewError::InvalidSession, StatusCode::BAD_REQUEST),
        (ReviewError::CodeTooLarge { limit: 1 }, StatusCode::PAYLOAD_TOO_LARGE),
        (ReviewError::RateLimited("slow down".into()), StatusCode::TOO_MANY_REQUESTS),
        (ReviewError::LlmNotConfigured, StatusCode::SERVICE_UNAVAILABLE),
    ];
    for (error, expected) in cases {
        assert_eq!(review_error_response(&error).status, expected, "{error}");
    }
}

#[test]
fn upstream_errors_map_to_bad_gateway_and_keep_retryability() {
    let rate_limited_upstream = ReviewError::LlmError(LlmError::ApiResponse { status: 429, body: String::new() });
    let resp = review_error_response(&rate_limited_upstream);
    assert_eq!(resp.status, StatusCode::BAD_GATEWAY);
    assert!(resp.retryable);

    let auth_failure = ReviewError::LlmError(LlmError::ApiResponse { status: 401, body: String::new() });
    assert!(!review_error_response(&auth_failure).retryable);
}
