use super::*;

#[test]
fn elapsed_is_difference() {
    assert_eq!(elapsed_ms(1500.0, 1000.0), 500.0);
}

#[test]
fn elapsed_clamps_clock_skew_to_zero() {
    assert_eq!(elapsed_ms(1000.0, 1500.0), 0.0);
}

#[test]
fn now_ms_is_zero_off_browser() {
    // Without the hydrate feature there is no browser clock.
    #[cfg(not(feature = "hydrate"))]
    assert_eq!(now_ms(), 0.0);
}
