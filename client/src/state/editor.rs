//! Editor buffer state and the edit/review bookkeeping around it.
//!
//! The invariant the auto-suggest loop relies on: a given buffer content
//! is reviewed at most once. `last_reviewed` snapshots the content of the
//! most recent request; the buffer is "dirty" only when it differs.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use review::Language;

/// State for the editor panel.
#[derive(Clone, Debug)]
pub struct EditorState {
    /// Current buffer contents.
    pub content: String,
    /// Wall-clock milliseconds of the last edit (0 before any edit).
    pub last_edit_ms: f64,
    /// Buffer snapshot sent with the most recent review request.
    pub last_reviewed: Option<String>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            content: Language::default().starter_sample().to_owned(),
            last_edit_ms: 0.0,
            last_reviewed: None,
        }
    }
}

impl EditorState {
    /// Replace the buffer and stamp the edit time.
    pub fn record_edit(&mut self, content: String, now_ms: f64) {
        self.content = content;
        self.last_edit_ms = now_ms;
    }

    /// Snapshot the current buffer as reviewed.
    pub fn mark_reviewed(&mut self) {
        self.last_reviewed = Some(self.content.clone());
    }

    /// Has the buffer changed since the last review (and is non-empty)?
    #[must_use]
    pub fn dirty(&self) -> bool {
        !self.content.trim().is_empty() && self.last_reviewed.as_deref() != Some(self.content.as_str())
    }

    /// Milliseconds since the last edit.
    #[must_use]
    pub fn idle_for(&self, now_ms: f64) -> f64 {
        (now_ms - self.last_edit_ms).max(0.0)
    }

    /// Swap in the starter sample on a language switch, but only when the
    /// buffer is empty or still holds the previous language's sample — a
    /// user's own code is never overwritten.
    pub fn seed_sample(&mut self, previous: Language, next: Language, now_ms: f64) {
        let untouched = self.content.trim().is_empty() || self.content == previous.starter_sample();
        if untouched {
            self.record_edit(next.starter_sample().to_owned(), now_ms);
        }
    }
}
