//! State for the suggestion and console panels.

#[cfg(test)]
#[path = "review_test.rs"]
mod review_test;

use review::ReviewReply;

/// Outcome of the most recent review request plus in-flight bookkeeping.
#[derive(Clone, Debug)]
pub struct ReviewState {
    /// Session identifier sent with every request; the server's rate-limit key.
    pub session_id: String,
    /// Full reply Markdown for the suggestion panel.
    pub markdown: Option<String>,
    /// Proposed refactor (first fenced block of the reply).
    pub refactor: Option<String>,
    /// Proposed test cases for the console panel.
    pub tests: Vec<String>,
    /// A request is in flight.
    pub loading: bool,
    /// Error message from the last failed request.
    pub error: Option<String>,
    /// Model that produced the last reply.
    pub model_used: Option<String>,
    /// Wall-clock duration of the last round trip.
    pub round_trip_ms: Option<f64>,
    /// Token usage of the last reply.
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl ReviewState {
    /// Fresh state with a newly minted session id.
    #[must_use]
    pub fn new() -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            markdown: None,
            refactor: None,
            tests: Vec::new(),
            loading: false,
            error: None,
            model_used: None,
            round_trip_ms: None,
            input_tokens: 0,
            output_tokens: 0,
        }
    }

    /// Mark a request as in flight; clears any stale error.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Store a successful reply.
    pub fn apply_reply(&mut self, reply: &ReviewReply, round_trip_ms: f64) {
        self.loading = false;
        self.error = None;
        self.markdown = Some(reply.markdown.clone());
        self.refactor = reply.refactor.clone();
        self.tests = reply.tests.clone();
        self.model_used = Some(reply.model.clone());
        self.round_trip_ms = Some(round_trip_ms);
        self.input_tokens = reply.input_tokens;
        self.output_tokens = reply.output_tokens;
    }

    /// Store a failed request. The previous suggestion stays visible.
    pub fn fail(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    /// Drop the current suggestion and extracted sections.
    pub fn clear_suggestion(&mut self) {
        self.markdown = None;
        self.refactor = None;
        self.tests.clear();
        self.error = None;
    }

    /// First lines of the proposed refactor for the ghost preview.
    #[must_use]
    pub fn ghost_preview(&self, max_lines: usize) -> Option<String> {
        let refactor = self.refactor.as_deref()?;
        let preview: Vec<&str> = refactor.lines().take(max_lines).collect();
        if preview.is_empty() { None } else { Some(preview.join("\n")) }
    }
}

impl Default for ReviewState {
    fn default() -> Self {
        Self::new()
    }
}
