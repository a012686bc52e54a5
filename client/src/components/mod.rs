//! Reusable UI component modules.
//!
//! Components render workbench chrome and interaction surfaces while
//! reading/writing shared state from Leptos context providers.

pub mod console_panel;
pub mod editor_panel;
pub mod settings_panel;
pub mod status_bar;
pub mod suggestion_panel;
