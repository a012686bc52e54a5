//! Suggestion panel — the model's review rendered as Markdown.
//!
//! SYSTEM CONTEXT
//! ==============
//! Renders the latest reply from shared review state, a loading row while
//! a request is in flight, error rows for failed requests, and the ghost
//! preview of the proposed refactor.

#[cfg(test)]
#[path = "suggestion_panel_test.rs"]
mod suggestion_panel_test;

use leptos::prelude::*;
use pulldown_cmark::{Event, Options, Parser, html};

use crate::state::review::ReviewState;
use crate::state::settings::SettingsState;

/// Lines of the refactor shown in the ghost preview.
const GHOST_PREVIEW_LINES: usize = 6;

/// Suggestion panel showing the rendered review reply.
#[component]
pub fn SuggestionPanel() -> impl IntoView {
    let review_state = expect_context::<RwSignal<ReviewState>>();
    let settings = expect_context::<RwSignal<SettingsState>>();

    let ghost = move || {
        if !settings.get().show_preview {
            return None;
        }
        review_state.get().ghost_preview(GHOST_PREVIEW_LINES)
    };

    view! {
        <section class="suggestion-panel">
            <h2 class="suggestion-panel__title">"AI Suggestions"</h2>

            <div class="suggestion-panel__body">
                {move || {
                    review_state
                        .get()
                        .error
                        .map(|message| {
                            view! {
                                <div class="suggestion-panel__error">{message}</div>
                            }
                        })
                }}

                {move || {
                    let state = review_state.get();
                    match state.markdown {
                        Some(md) => {
                            let rendered = render_markdown_html(&md);
                            view! {
                                <div class="suggestion-panel__markdown" inner_html=rendered></div>
                            }
                                .into_any()
                        }
                        None => {
                            view! {
                                <div class="suggestion-panel__empty">"No suggestions yet"</div>
                            }
                                .into_any()
                        }
                    }
                }}

                {move || {
                    review_state
                        .get()
                        .loading
                        .then(|| view! { <div class="suggestion-panel__loading">"Thinking..."</div> })
                }}
            </div>

            {move || {
                ghost()
                    .map(|preview| {
                        view! {
                            <div class="suggestion-panel__ghost">
                                <span class="suggestion-panel__ghost-label">"Ghost suggestion (preview):"</span>
                                <pre class="suggestion-panel__ghost-code">
                                    <code>{preview}</code>
                                </pre>
                            </div>
                        }
                    })
            }}
        </section>
    }
}

/// Render reply Markdown to HTML with raw HTML events dropped.
fn render_markdown_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    // Safety: drop inline/block raw HTML from model output before rendering.
    let parser = Parser::new_ext(markdown, options).filter_map(|event| match event {
        Event::Html(_) | Event::InlineHtml(_) => None,
        other => Some(other),
    });

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}
