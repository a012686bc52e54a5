//! # client
//!
//! Leptos + WASM frontend for the PairBench workbench: a code editor that
//! sends the buffer to the review API and renders the model's suggestions
//! and proposed tests in adjacent panels.
//!
//! This crate contains the page, components, application state, and the
//! REST layer. It is compiled twice: as a `cdylib` for hydration in the
//! browser and as an `rlib` for SSR inside the server binary.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
