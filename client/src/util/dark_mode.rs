//! Dark mode persistence and application.
//!
//! The preference lives in `localStorage`; the active theme is a
//! `data-theme` attribute on `<html>` that the stylesheet keys off.
//! Requires a browser environment; SSR paths no-op so server rendering
//! stays deterministic.

#[cfg(feature = "hydrate")]
const STORAGE_KEY: &str = "pairbench_dark";

/// Resolve the initial theme and apply it: a stored preference wins,
/// otherwise the system color scheme decides.
pub fn init() -> bool {
    let enabled = stored_preference().unwrap_or_else(system_prefers_dark);
    apply(enabled);
    enabled
}

/// Toggle dark mode, apply it, and persist the new preference.
pub fn toggle(current: bool) -> bool {
    let next = !current;
    apply(next);
    store_preference(next);
    next
}

/// Apply the `data-theme` attribute on the `<html>` element.
pub fn apply(enabled: bool) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
        {
            let _ = el.set_attribute("data-theme", if enabled { "dark" } else { "light" });
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = enabled;
    }
}

fn stored_preference() -> Option<bool> {
    #[cfg(feature = "hydrate")]
    {
        let storage = web_sys::window()?.local_storage().ok()??;
        let value = storage.get_item(STORAGE_KEY).ok()??;
        Some(value == "true")
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

fn system_prefers_dark() -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .map_or(false, |mq| mq.matches())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

fn store_preference(enabled: bool) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.set_item(STORAGE_KEY, if enabled { "true" } else { "false" });
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = enabled;
    }
}
