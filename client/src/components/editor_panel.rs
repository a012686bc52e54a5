//! Editor panel — the code buffer and its action row.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every keystroke stamps `last_edit_ms` on shared editor state; the idle
//! auto-suggest loop on the workbench page watches that stamp. Actions:
//! "Suggest now" fires the shared review trigger, "Apply suggestion"
//! replaces the buffer with the proposed refactor, "Clear suggestion"
//! empties the suggestion panels.

use leptos::prelude::*;

use crate::state::editor::EditorState;
use crate::state::review::ReviewState;
use crate::state::settings::SettingsState;
use crate::util::time;

/// Editor panel with the buffer textarea and action buttons.
#[component]
pub fn EditorPanel(on_suggest: Callback<()>) -> impl IntoView {
    let editor = expect_context::<RwSignal<EditorState>>();
    let review_state = expect_context::<RwSignal<ReviewState>>();
    let settings = expect_context::<RwSignal<SettingsState>>();

    let on_input = move |ev| {
        let value = event_target_value(&ev);
        editor.update(|e| e.record_edit(value, time::now_ms()));
    };

    let on_suggest_click = move |_| on_suggest.run(());

    let on_apply = move |_| {
        let Some(code) = review_state.get_untracked().refactor.clone() else {
            return;
        };
        editor.update(|e| e.record_edit(code, time::now_ms()));
    };

    let on_clear = move |_| {
        review_state.update(ReviewState::clear_suggestion);
    };

    let can_suggest = move || {
        let state = review_state.get();
        !state.loading && !editor.get().content.trim().is_empty()
    };
    let can_apply = move || review_state.get().refactor.is_some();
    let can_clear = move || review_state.get().markdown.is_some() || review_state.get().error.is_some();

    view! {
        <section class="editor-panel">
            <h2 class="editor-panel__title">
                "Editor"
                <span class="editor-panel__language">{move || settings.get().language.label()}</span>
            </h2>

            <textarea
                class="editor-panel__buffer"
                spellcheck="false"
                prop:value=move || editor.get().content
                on:input=on_input
            ></textarea>

            <div class="editor-panel__actions">
                <button
                    class="btn btn--primary editor-panel__suggest"
                    on:click=on_suggest_click
                    disabled=move || !can_suggest()
                >
                    "Suggest now"
                </button>
                <button class="btn editor-panel__apply" on:click=on_apply disabled=move || !can_apply()>
                    "Apply suggestion"
                </button>
                <button class="btn editor-panel__clear" on:click=on_clear disabled=move || !can_clear()>
                    "Clear suggestion"
                </button>
            </div>
        </section>
    }
}
