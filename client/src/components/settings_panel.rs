//! Settings sidebar — language, model, tuning, and trigger controls.

use leptos::prelude::*;

use review::Language;

use crate::state::editor::EditorState;
use crate::state::settings::{IDLE_THRESHOLD_RANGE, MAX_TOKENS_RANGE, SettingsState};
use crate::state::ui::UiState;
use crate::util::time;

/// Models offered in the select. The empty value keeps whatever model the
/// server is configured with.
const MODEL_CHOICES: [(&str, &str); 4] = [
    ("", "Provider default"),
    ("claude-sonnet-4-5-20250929", "Claude Sonnet 4.5"),
    ("gpt-4o", "GPT-4o"),
    ("gpt-4o-mini", "GPT-4o mini"),
];

/// Sidebar with review settings.
#[component]
pub fn SettingsPanel() -> impl IntoView {
    let editor = expect_context::<RwSignal<EditorState>>();
    let settings = expect_context::<RwSignal<SettingsState>>();
    let ui = expect_context::<RwSignal<UiState>>();

    let on_language = move |ev| {
        let Some(next) = Language::from_slug(&event_target_value(&ev)) else {
            return;
        };
        let previous = settings.get_untracked().language;
        settings.update(|s| s.language = next);
        // Swap starter samples, never user code.
        editor.update(|e| e.seed_sample(previous, next, time::now_ms()));
    };

    let on_model = move |ev| {
        settings.update(|s| s.model = event_target_value(&ev));
    };

    let on_temperature = move |ev| {
        if let Ok(value) = event_target_value(&ev).parse::<f32>() {
            settings.update(|s| s.set_temperature(value));
        }
    };

    let on_max_tokens = move |ev| {
        if let Ok(value) = event_target_value(&ev).parse::<u32>() {
            settings.update(|s| s.set_max_tokens(value));
        }
    };

    let on_idle = move |ev| {
        if let Ok(value) = event_target_value(&ev).parse::<u32>() {
            settings.update(|s| s.set_idle_threshold_secs(value));
        }
    };

    let on_dark_toggle = move |_| {
        let current = ui.get().dark_mode;
        let next = crate::util::dark_mode::toggle(current);
        ui.update(|u| u.dark_mode = next);
    };

    view! {
        <aside class="settings-panel">
            <h2 class="settings-panel__title">"Settings"</h2>

            <label class="settings-panel__field">
                "Programming language"
                <select
                    class="settings-panel__select"
                    prop:value=move || settings.get().language.slug()
                    on:change=on_language
                >
                    {Language::ALL
                        .into_iter()
                        .map(|lang| {
                            view! { <option value=lang.slug()>{lang.label()}</option> }
                        })
                        .collect::<Vec<_>>()}
                </select>
            </label>

            <label class="settings-panel__field">
                "Model"
                <select class="settings-panel__select" prop:value=move || settings.get().model on:change=on_model>
                    {MODEL_CHOICES
                        .into_iter()
                        .map(|(value, label)| {
                            view! { <option value=value>{label}</option> }
                        })
                        .collect::<Vec<_>>()}
                </select>
            </label>

            <label class="settings-panel__field">
                {move || format!("Temperature: {:.2}", settings.get().temperature)}
                <input
                    type="range"
                    min="0"
                    max="1"
                    step="0.05"
                    prop:value=move || settings.get().temperature.to_string()
                    on:input=on_temperature
                />
            </label>

            <label class="settings-panel__field">
                {move || format!("Max response tokens: {}", settings.get().max_tokens)}
                <input
                    type="range"
                    min=MAX_TOKENS_RANGE.0.to_string()
                    max=MAX_TOKENS_RANGE.1.to_string()
                    step="16"
                    prop:value=move || settings.get().max_tokens.to_string()
                    on:input=on_max_tokens
                />
            </label>

            <label class="settings-panel__check">
                <input
                    type="checkbox"
                    prop:checked=move || settings.get().auto_suggest
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        settings.update(|s| s.auto_suggest = checked);
                    }
                />
                "Enable auto-suggest"
            </label>

            <label class="settings-panel__field">
                {move || format!("Idle seconds before suggestion: {}", settings.get().idle_threshold_secs)}
                <input
                    type="range"
                    min=IDLE_THRESHOLD_RANGE.0.to_string()
                    max=IDLE_THRESHOLD_RANGE.1.to_string()
                    step="1"
                    prop:value=move || settings.get().idle_threshold_secs.to_string()
                    on:input=on_idle
                />
            </label>

            <label class="settings-panel__check">
                <input
                    type="checkbox"
                    prop:checked=move || settings.get().show_preview
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        settings.update(|s| s.show_preview = checked);
                    }
                />
                "Show refactor preview"
            </label>

            <div class="settings-panel__footer">
                <button class="btn settings-panel__dark-toggle" on:click=on_dark_toggle title="Toggle dark mode">
                    {move || if ui.get().dark_mode { "☀" } else { "☾" }}
                </button>
            </div>
        </aside>
    }
}
