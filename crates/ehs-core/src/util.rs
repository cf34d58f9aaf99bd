//! Numeric helpers shared by the calculation modules.

/// Round `value` to `places` decimal places, half away from zero.
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Round to 2 decimal places, the precision used in every report value.
#[must_use]
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Keep `value` only if it is a finite number.
#[must_use]
pub fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Treat zero as "not provided", matching how the dashboard inputs behave.
#[must_use]
pub fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}
