//! Wire schema for the `/api/review` exchange.
//!
//! One crate owns these types so the client and server cannot drift. The
//! request carries the editor buffer plus per-call tuning; the reply
//! carries the model's Markdown together with the sections the UI panels
//! consume, pre-extracted on the server.

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};

use crate::language::Language;
use crate::markdown;

/// A review request sent by the workbench client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewRequest {
    /// Client-minted session identifier (UUID string); rate-limit key.
    pub session_id: String,
    /// Language of the code in `code`.
    pub language: Language,
    /// The editor buffer to review.
    pub code: String,
    /// Optional model override; `None` means the server's configured model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Optional max-response-tokens override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Optional sampling temperature override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// The server's answer to a review request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewReply {
    /// Full model reply, rendered by the suggestion panel.
    pub markdown: String,
    /// First fenced code block of `markdown`: the proposed refactor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refactor: Option<String>,
    /// Proposed test cases for the console panel.
    #[serde(default)]
    pub tests: Vec<String>,
    /// Model that produced the reply.
    pub model: String,
    /// Prompt tokens consumed by the call.
    pub input_tokens: u64,
    /// Completion tokens consumed by the call.
    pub output_tokens: u64,
}

impl ReviewReply {
    /// Build a reply from raw model Markdown, extracting the panel sections.
    #[must_use]
    pub fn from_markdown(markdown: String, model: String, input_tokens: u64, output_tokens: u64) -> Self {
        let refactor = markdown::extract_code_block(&markdown);
        let tests = markdown::extract_test_cases(&markdown, markdown::MAX_TEST_CASES);
        Self { markdown, refactor, tests, model, input_tokens, output_tokens }
    }
}
