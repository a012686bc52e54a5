//! Shared application state provided via Leptos context.
//!
//! DESIGN
//! ======
//! Each module owns a plain struct with pure methods; pages and components
//! read/write them through `RwSignal` contexts. Keeping the logic on plain
//! structs means it is unit-testable without a browser.

pub mod editor;
pub mod review;
pub mod settings;
pub mod ui;
