//! Workbench page — editor on the left, suggestions and console on the
//! right, settings in a sidebar.
//!
//! SYSTEM CONTEXT
//! ==============
//! This page owns the review trigger shared by the "Suggest now" button
//! and the idle auto-suggest loop, so both paths go through identical
//! guards: non-empty buffer, changed since the last review, no request
//! already in flight.

#[cfg(test)]
#[path = "workbench_test.rs"]
mod workbench_test;

use leptos::prelude::*;

use review::ReviewRequest;

use crate::components::console_panel::ConsolePanel;
use crate::components::editor_panel::EditorPanel;
use crate::components::settings_panel::SettingsPanel;
use crate::components::status_bar::StatusBar;
use crate::components::suggestion_panel::SuggestionPanel;
use crate::state::editor::EditorState;
use crate::state::review::ReviewState;
use crate::state::settings::SettingsState;
use crate::state::ui::UiState;

/// Poll cadence of the idle auto-suggest loop.
#[cfg(feature = "hydrate")]
const IDLE_POLL_MS: u64 = 500;

/// The workbench — the application's single route.
#[component]
pub fn WorkbenchPage() -> impl IntoView {
    let editor = expect_context::<RwSignal<EditorState>>();
    let review_state = expect_context::<RwSignal<ReviewState>>();
    let settings = expect_context::<RwSignal<SettingsState>>();
    let ui = expect_context::<RwSignal<UiState>>();

    // Apply the stored theme once on mount.
    Effect::new(move || {
        let prefers_dark = crate::util::dark_mode::init();
        ui.update(|u| u.dark_mode = prefers_dark);
    });

    // Idle auto-suggest loop. Lives on the page so it dies with it.
    #[cfg(feature = "hydrate")]
    {
        let poll_alive = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(true));
        let poll_alive_task = poll_alive.clone();
        leptos::task::spawn_local(async move {
            loop {
                gloo_timers::future::sleep(std::time::Duration::from_millis(IDLE_POLL_MS)).await;
                if !poll_alive_task.load(std::sync::atomic::Ordering::Relaxed) {
                    break;
                }
                let due = auto_review_due(
                    &editor.get_untracked(),
                    &review_state.get_untracked(),
                    &settings.get_untracked(),
                    crate::util::time::now_ms(),
                );
                if due {
                    start_review(editor, review_state, settings);
                }
            }
        });
        on_cleanup(move || poll_alive.store(false, std::sync::atomic::Ordering::Relaxed));
    }

    let on_suggest = Callback::new(move |()| start_review(editor, review_state, settings));

    view! {
        <div class="workbench">
            <Show when=move || ui.get().settings_open>
                <SettingsPanel/>
            </Show>

            <div class="workbench__main">
                <div class="workbench__columns">
                    <EditorPanel on_suggest=on_suggest/>
                    <div class="workbench__right">
                        <SuggestionPanel/>
                        <ConsolePanel/>
                    </div>
                </div>
                <StatusBar/>
            </div>
        </div>
    }
}

/// Should the idle loop fire a review right now?
pub(crate) fn auto_review_due(
    editor: &EditorState,
    review: &ReviewState,
    settings: &SettingsState,
    now_ms: f64,
) -> bool {
    settings.auto_suggest
        && !review.loading
        && editor.dirty()
        && editor.idle_for(now_ms) >= settings.idle_threshold_ms()
}

/// Fire a review for the current buffer. Shared by the manual button and
/// the idle loop; both paths get the same guards.
pub(crate) fn start_review(
    editor: RwSignal<EditorState>,
    review_state: RwSignal<ReviewState>,
    settings: RwSignal<SettingsState>,
) {
    let code = editor.get_untracked().content.clone();
    if code.trim().is_empty() || review_state.get_untracked().loading {
        return;
    }

    let tuning = settings.get_untracked();
    let request = ReviewRequest {
        session_id: review_state.get_untracked().session_id.clone(),
        language: tuning.language,
        code,
        model: tuning.model_override(),
        max_tokens: Some(tuning.max_tokens),
        temperature: Some(tuning.temperature),
    };

    // Snapshot the buffer as reviewed up front so the idle loop does not
    // re-fire for the same content while this request is in flight.
    editor.update(EditorState::mark_reviewed);
    review_state.update(ReviewState::begin);

    #[cfg(feature = "hydrate")]
    {
        use crate::util::time;

        let started = time::now_ms();
        leptos::task::spawn_local(async move {
            match crate::net::api::request_review(&request).await {
                Ok(reply) => review_state.update(|r| {
                    r.apply_reply(&reply, time::elapsed_ms(time::now_ms(), started));
                }),
                Err(message) => review_state.update(|r| r.fail(message)),
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
    }
}
