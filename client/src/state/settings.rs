//! Review tuning settings (sidebar).

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use review::Language;

pub const TEMPERATURE_RANGE: (f32, f32) = (0.0, 1.0);
pub const MAX_TOKENS_RANGE: (u32, u32) = (128, 1500);
pub const IDLE_THRESHOLD_RANGE: (u32, u32) = (1, 6);

/// User-tunable review parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct SettingsState {
    pub language: Language,
    /// Model override sent with requests; empty string = provider default.
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Fire a review automatically after an idle pause.
    pub auto_suggest: bool,
    /// Seconds of idle time before an automatic review.
    pub idle_threshold_secs: u32,
    /// Show the ghost preview of the proposed refactor.
    pub show_preview: bool,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            language: Language::default(),
            model: String::new(),
            temperature: 0.15,
            max_tokens: 512,
            auto_suggest: true,
            idle_threshold_secs: 2,
            show_preview: true,
        }
    }
}

impl SettingsState {
    /// The model override for the wire, `None` when the default is kept.
    #[must_use]
    pub fn model_override(&self) -> Option<String> {
        let trimmed = self.model.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    }

    /// Idle threshold in milliseconds.
    #[must_use]
    pub fn idle_threshold_ms(&self) -> f64 {
        f64::from(self.idle_threshold_secs) * 1000.0
    }

    pub fn set_temperature(&mut self, value: f32) {
        self.temperature = value.clamp(TEMPERATURE_RANGE.0, TEMPERATURE_RANGE.1);
    }

    pub fn set_max_tokens(&mut self, value: u32) {
        self.max_tokens = value.clamp(MAX_TOKENS_RANGE.0, MAX_TOKENS_RANGE.1);
    }

    pub fn set_idle_threshold_secs(&mut self, value: u32) {
        self.idle_threshold_secs = value.clamp(IDLE_THRESHOLD_RANGE.0, IDLE_THRESHOLD_RANGE.1);
    }
}
