use super::*;
use crate::error::ErrorCode;

// =========================================================================
// ChatResponse::text
// =========================================================================

#[test]
fn text_joins_text_blocks() {
    let resp = ChatResponse {
        content: vec![
            ContentBlock::Text { text: "first".into() },
            ContentBlock::Thinking { thinking: "hidden".into() },
            ContentBlock::Text { text: "second".into() },
        ],
        model: "mock".into(),
        stop_reason: "end_turn".into(),
        input_tokens: 0,
        output_tokens: 0,
    };
    assert_eq!(resp.text().as_deref(), Some("first\nsecond"));
}

#[test]
fn text_is_none_for_thinking_only_response() {
    let resp = ChatResponse {
        content: vec![ContentBlock::Thinking { thinking: "hmm".into() }],
        model: "mock".into(),
        stop_reason: "end_turn".into(),
        input_tokens: 0,
        output_tokens: 0,
    };
    assert_eq!(resp.text(), None);
}

#[test]
fn text_is_none_for_empty_content() {
    let resp = ChatResponse {
        content: vec![],
        model: "mock".into(),
        stop_reason: "end_turn".into(),
        input_tokens: 0,
        output_tokens: 0,
    };
    assert_eq!(resp.text(), None);
}

// =========================================================================
// ContentBlock deserialization
// =========================================================================

#[test]
fn unknown_block_types_deserialize_to_unknown() {
    let block: ContentBlock = serde_json::from_str(r#"{"type":"tool_use","id":"x"}"#).unwrap();
    assert!(matches!(block, ContentBlock::Unknown));
}

#[test]
fn text_block_round_trips() {
    let block: ContentBlock = serde_json::from_str(r#"{"type":"text","text":"hi"}"#).unwrap();
    assert!(matches!(block, ContentBlock::Text { text } if text == "hi"));
}

// =========================================================================
// LlmError codes and retryability
// =========================================================================

#[test]
fn error_codes_are_stable() {
    assert_eq!(LlmError::ConfigParse("x".into()).error_code(), "E_CONFIG_PARSE");
    assert_eq!(LlmError::MissingApiKey { var: "K".into() }.error_code(), "E_MISSING_API_KEY");
    assert_eq!(LlmError::ApiParse("x".into()).error_code(), "E_API_PARSE");
}

#[test]
fn transport_and_server_errors_are_retryable() {
    assert!(LlmError::ApiRequest("timeout".into()).retryable());
    assert!(LlmError::ApiResponse { status: 429, body: String::new() }.retryable());
    assert!(LlmError::ApiResponse { status: 503, body: String::new() }.retryable());
}

#[test]
fn client_errors_are_not_retryable() {
    assert!(!LlmError::ApiResponse { status: 401, body: String::new() }.retryable());
    assert!(!LlmError::ConfigParse("bad".into()).retryable());
    assert!(!LlmError::MissingApiKey { var: "K".into() }.retryable());
}

#[test]
fn message_user_constructor_sets_role() {
    let msg = Message::user("hello");
    assert_eq!(msg.role, "user");
    assert_eq!(msg.content, "hello");
}
