//! Wall-clock helpers for edit timestamps and round-trip timing.
//!
//! `now_ms` requires a browser environment; SSR paths return 0 so server
//! rendering stays deterministic.

#[cfg(test)]
#[path = "time_test.rs"]
mod time_test;

/// Milliseconds since the Unix epoch, per the browser clock.
#[must_use]
pub fn now_ms() -> f64 {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        0.0
    }
}

/// Non-negative elapsed time between two `now_ms` readings.
#[must_use]
pub fn elapsed_ms(now: f64, earlier: f64) -> f64 {
    (now - earlier).max(0.0)
}
