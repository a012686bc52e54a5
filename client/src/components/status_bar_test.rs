use super::*;

// =============================================================
// Formatting helpers
// =============================================================

#[test]
fn dot_class_reflects_loading() {
    assert!(status_dot_class(true).contains("--busy"));
    assert!(status_dot_class(false).contains("--idle"));
}

#[test]
fn round_trip_formats_rounded_ms() {
    assert_eq!(format_round_trip(Some(321.6)), "round trip 322ms");
    assert_eq!(format_round_trip(None), "round trip --ms");
}

#[test]
fn tokens_show_placeholder_before_first_reply() {
    assert_eq!(format_tokens(0, 0), "tokens --/--");
    assert_eq!(format_tokens(12, 34), "tokens 12/34");
}

#[test]
fn auto_label_states() {
    assert_eq!(auto_label(true), "AUTO ●");
    assert_eq!(auto_label(false), "AUTO off");
}

// =============================================================
// model_display precedence
// =============================================================

#[test]
fn model_display_prefers_last_reply() {
    let mut review = ReviewState::new();
    review.model_used = Some("gpt-4o".into());
    let mut settings = SettingsState::default();
    settings.model = "gpt-4o-mini".into();
    assert_eq!(model_display(&review, &settings), "gpt-4o");
}

#[test]
fn model_display_falls_back_to_override_then_default() {
    let review = ReviewState::new();
    let mut settings = SettingsState::default();
    settings.model = "gpt-4o-mini".into();
    assert_eq!(model_display(&review, &settings), "gpt-4o-mini");

    settings.model = String::new();
    assert_eq!(model_display(&review, &settings), "default model");
}
