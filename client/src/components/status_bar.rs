//! Bottom status bar showing request state and review telemetry.
//!
//! SYSTEM CONTEXT
//! ==============
//! Renders low-frequency telemetry (model, round trip, token usage) so
//! users can monitor the review loop without opening additional panels.

#[cfg(test)]
#[path = "status_bar_test.rs"]
mod status_bar_test;

use leptos::prelude::*;

use crate::state::review::ReviewState;
use crate::state::settings::SettingsState;
use crate::state::ui::UiState;

/// Status bar at the bottom of the workbench page.
#[component]
pub fn StatusBar() -> impl IntoView {
    let review_state = expect_context::<RwSignal<ReviewState>>();
    let settings = expect_context::<RwSignal<SettingsState>>();
    let ui = expect_context::<RwSignal<UiState>>();

    let dot_class = move || status_dot_class(review_state.get().loading);
    let model = move || model_display(&review_state.get(), &settings.get());
    let round_trip = move || format_round_trip(review_state.get().round_trip_ms);
    let tokens = move || {
        let state = review_state.get();
        format_tokens(state.input_tokens, state.output_tokens)
    };
    let auto = move || auto_label(settings.get().auto_suggest);

    let on_settings_toggle = move |_| {
        ui.update(|u| u.settings_open = !u.settings_open);
    };

    view! {
        <div class="status-bar">
            <div class="status-bar__section">
                <span class="status-bar__item">
                    <span class=dot_class></span>
                </span>
                <span class="status-bar__divider"></span>
                <button class="status-bar__settings" on:click=on_settings_toggle title="Toggle settings sidebar">
                    "[=] SETTINGS"
                </button>
                <span class="status-bar__divider"></span>
                <span class="status-bar__item">{model}</span>
                <span class="status-bar__divider"></span>
                <span class="status-bar__item">{move || settings.get().language.label()}</span>
            </div>

            <div class="status-bar__section">
                <span class="status-bar__item">{round_trip}</span>
                <span class="status-bar__divider"></span>
                <span class="status-bar__item">{tokens}</span>
                <span class="status-bar__divider"></span>
                <span class="status-bar__item">{auto}</span>
            </div>
        </div>
    }
}

fn status_dot_class(loading: bool) -> &'static str {
    if loading {
        "status-bar__dot status-bar__dot--busy"
    } else {
        "status-bar__dot status-bar__dot--idle"
    }
}

/// The model shown in the bar: the last reply's model beats the pending
/// override, which beats the server default.
fn model_display(review: &ReviewState, settings: &SettingsState) -> String {
    if let Some(model) = &review.model_used {
        return model.clone();
    }
    settings
        .model_override()
        .unwrap_or_else(|| "default model".to_owned())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn format_round_trip(ms: Option<f64>) -> String {
    match ms {
        Some(value) => format!("round trip {}ms", value.round() as i64),
        None => "round trip --ms".to_owned(),
    }
}

fn format_tokens(input: u64, output: u64) -> String {
    if input == 0 && output == 0 {
        "tokens --/--".to_owned()
    } else {
        format!("tokens {input}/{output}")
    }
}

fn auto_label(enabled: bool) -> &'static str {
    if enabled { "AUTO ●" } else { "AUTO off" }
}
