use super::*;

// =============================================================
// Endpoint + error message builders
// =============================================================

#[test]
fn endpoint_is_the_review_route() {
    assert_eq!(review_endpoint(), "/api/review");
}

#[test]
fn failure_message_prefers_server_detail() {
    let msg = review_failed_message(429, Some("rate limited: slow down"));
    assert_eq!(msg, "rate limited: slow down");
}

#[test]
fn failure_message_falls_back_to_status() {
    assert_eq!(review_failed_message(502, None), "review request failed: 502");
    assert_eq!(review_failed_message(502, Some("   ")), "review request failed: 502");
}

#[test]
fn extracts_message_from_error_envelope() {
    let body = serde_json::json!({
        "error": { "code": "E_RATE_LIMITED", "message": "too many requests", "retryable": true }
    });
    assert_eq!(extract_error_message(&body).as_deref(), Some("too many requests"));
}

#[test]
fn malformed_envelope_yields_none() {
    assert_eq!(extract_error_message(&serde_json::json!({})), None);
    assert_eq!(extract_error_message(&serde_json::json!({"error": "plain"})), None);
}
