use super::*;

fn fixture() -> (EditorState, ReviewState, SettingsState) {
    let mut editor = EditorState::default();
    editor.record_edit("fn main() {}".into(), 1_000.0);
    (editor, ReviewState::new(), SettingsState::default())
}

// Default settings: auto on, idle threshold 2s.

#[test]
fn due_after_idle_threshold_elapses() {
    let (editor, review, settings) = fixture();
    assert!(auto_review_due(&editor, &review, &settings, 3_001.0));
}

#[test]
fn not_due_while_still_typing() {
    let (editor, review, settings) = fixture();
    assert!(!auto_review_due(&editor, &review, &settings, 2_500.0));
}

#[test]
fn not_due_when_auto_mode_off() {
    let (editor, review, mut settings) = fixture();
    settings.auto_suggest = false;
    assert!(!auto_review_due(&editor, &review, &settings, 10_000.0));
}

#[test]
fn not_due_while_request_in_flight() {
    let (editor, mut review, settings) = fixture();
    review.begin();
    assert!(!auto_review_due(&editor, &review, &settings, 10_000.0));
}

#[test]
fn not_due_for_already_reviewed_content() {
    let (mut editor, review, settings) = fixture();
    editor.mark_reviewed();
    assert!(!auto_review_due(&editor, &review, &settings, 10_000.0));
}

#[test]
fn not_due_for_empty_buffer() {
    let (mut editor, review, settings) = fixture();
    editor.record_edit("  \n".into(), 1_000.0);
    assert!(!auto_review_due(&editor, &review, &settings, 10_000.0));
}

#[test]
fn due_again_after_further_edits() {
    let (mut editor, review, settings) = fixture();
    editor.mark_reviewed();
    editor.record_edit("fn main() { fixed() }".into(), 20_000.0);
    assert!(!auto_review_due(&editor, &review, &settings, 21_000.0));
    assert!(auto_review_due(&editor, &review, &settings, 22_100.0));
}

#[test]
fn threshold_change_takes_effect() {
    let (editor, review, mut settings) = fixture();
    settings.set_idle_threshold_secs(6);
    assert!(!auto_review_due(&editor, &review, &settings, 5_000.0));
    assert!(auto_review_due(&editor, &review, &settings, 7_001.0));
}
