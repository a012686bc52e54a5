//! REST API helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning an error since the endpoint is only
//! meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result<_, String>` outputs instead of panics; the error
//! string is what the suggestion panel shows, so it favors the server's
//! own message over a bare status code.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use review::{ReviewReply, ReviewRequest};

#[cfg(any(test, feature = "hydrate"))]
fn review_endpoint() -> &'static str {
    "/api/review"
}

#[cfg(any(test, feature = "hydrate"))]
fn review_failed_message(status: u16, detail: Option<&str>) -> String {
    match detail {
        Some(msg) if !msg.trim().is_empty() => msg.trim().to_owned(),
        _ => format!("review request failed: {status}"),
    }
}

/// Pull the human-readable message out of the server's error envelope.
#[cfg(any(test, feature = "hydrate"))]
fn extract_error_message(body: &serde_json::Value) -> Option<String> {
    body.get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .map(str::to_owned)
}

/// POST the buffer to `/api/review` and return the sectioned reply.
///
/// # Errors
///
/// Returns a display-ready error string if the HTTP request fails or the
/// server responds with a non-OK status.
pub async fn request_review(request: &ReviewRequest) -> Result<ReviewReply, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(review_endpoint())
            .json(request)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            let status = resp.status();
            let detail = resp
                .json::<serde_json::Value>()
                .await
                .ok()
                .as_ref()
                .and_then(extract_error_message);
            return Err(review_failed_message(status, detail.as_deref()));
        }
        resp.json::<ReviewReply>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err("not available on server".to_owned())
    }
}
