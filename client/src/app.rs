//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::pages::workbench::WorkbenchPage;
use crate::state::{editor::EditorState, review::ReviewState, settings::SettingsState, ui::UiState};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides all shared state contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    // Provide reactive state contexts for all child components.
    let editor = RwSignal::new(EditorState::default());
    let review = RwSignal::new(ReviewState::new());
    let settings = RwSignal::new(SettingsState::default());
    let ui = RwSignal::new(UiState::default());

    provide_context(editor);
    provide_context(review);
    provide_context(settings);
    provide_context(ui);

    view! {
        <Stylesheet id="leptos" href="/pkg/pairbench.css"/>
        <Title text="PairBench"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=WorkbenchPage/>
            </Routes>
        </Router>
    }
}
