//! Local UI chrome state (theme, sidebar).
//!
//! Keeps transient presentation concerns out of domain state (`editor`,
//! `review`) so rendering controls can evolve independently.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

/// UI state for the sidebar and dark mode.
#[derive(Clone, Debug)]
pub struct UiState {
    pub dark_mode: bool,
    pub settings_open: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self { dark_mode: false, settings_open: true }
    }
}
