//! Console panel — proposed test cases from the latest review.

use leptos::prelude::*;

use crate::state::review::ReviewState;

/// Console panel listing the reviewer's proposed test cases.
#[component]
pub fn ConsolePanel() -> impl IntoView {
    let review_state = expect_context::<RwSignal<ReviewState>>();

    view! {
        <section class="console-panel">
            <h2 class="console-panel__title">"Console / Proposed Tests"</h2>
            <div class="console-panel__body">
                {move || {
                    let state = review_state.get();
                    if state.tests.is_empty() {
                        let placeholder = if state.markdown.is_some() {
                            "(No explicit test cases found in suggestions.)"
                        } else {
                            "(Run a suggestion to see proposed tests.)"
                        };
                        return view! {
                            <div class="console-panel__empty">{placeholder}</div>
                        }
                            .into_any();
                    }

                    state
                        .tests
                        .iter()
                        .map(|test| {
                            let test = test.clone();
                            view! { <div class="console-panel__entry">"- " {test}</div> }
                        })
                        .collect::<Vec<_>>()
                        .into_any()
                }}
            </div>
        </section>
    }
}
