//! Heat index and heat-stress classification.
//!
//! The heat index ("feels like" temperature) uses the NOAA Rothfusz
//! regression, computed in °F and converted back to °C. The regression is
//! most reliable above ~27 °C and 40 % humidity, but a value is produced for
//! any finite input.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::util::round2;

/// Heat index below which conditions are comfortable, in °C.
pub const HEAT_SAFE_MAX_C: f64 = 27.0;
/// Heat index below which conditions call for caution, in °C.
pub const HEAT_CAUTION_MAX_C: f64 = 32.0;

fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

fn fahrenheit_to_celsius(f: f64) -> f64 {
    (f - 32.0) * 5.0 / 9.0
}

/// Heat index in °C, rounded to 2 decimals.
///
/// Humidity is clamped to `0..=100`. Returns `None` if either input is not
/// a finite number.
#[must_use]
pub fn heat_index(temp_c: f64, humidity: f64) -> Option<f64> {
    if !temp_c.is_finite() || !humidity.is_finite() {
        return None;
    }

    let t = celsius_to_fahrenheit(temp_c);
    let r = humidity.clamp(0.0, 100.0);

    let hi = -42.379 + 2.04901523 * t + 10.14333127 * r
        - 0.22475541 * t * r
        - 0.00683783 * t * t
        - 0.05481717 * r * r
        + 0.00122874 * t * t * r
        + 0.00085282 * t * r * r
        - 0.00000199 * t * t * r * r;

    Some(round2(fahrenheit_to_celsius(hi)))
}

/// Heat-stress category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeatLevel {
    Safe,
    Caution,
    Danger,
    Unknown,
}

impl HeatLevel {
    /// Classify a heat index in °C.
    #[must_use]
    pub fn classify(heat_index_c: Option<f64>) -> Self {
        match heat_index_c.filter(|hi| !hi.is_nan()) {
            None => HeatLevel::Unknown,
            Some(hi) if hi < HEAT_SAFE_MAX_C => HeatLevel::Safe,
            Some(hi) if hi < HEAT_CAUTION_MAX_C => HeatLevel::Caution,
            Some(_) => HeatLevel::Danger,
        }
    }

    /// Comfort advice for this level.
    #[must_use]
    pub fn comfort_message(&self) -> &'static str {
        match self {
            HeatLevel::Safe => "You are safe. Stay hydrated and enjoy your day.",
            HeatLevel::Caution => "Avoid staying in direct sunlight for long periods.",
            HeatLevel::Danger => {
                "High risk of heat stress! Stay indoors and drink plenty of water."
            }
            HeatLevel::Unknown => "Heat data unavailable.",
        }
    }
}

impl fmt::Display for HeatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HeatLevel::Safe => "Safe",
            HeatLevel::Caution => "Caution",
            HeatLevel::Danger => "Danger",
            HeatLevel::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heat_index_values() {
        assert_eq!(heat_index(30.0, 50.0), Some(31.05));
        assert_eq!(heat_index(20.0, 40.0), Some(25.2));
        assert_eq!(heat_index(35.0, 70.0), Some(50.34));
    }

    #[test]
    fn test_humidity_is_clamped() {
        assert_eq!(heat_index(30.0, 150.0), heat_index(30.0, 100.0));
        assert_eq!(heat_index(30.0, -10.0), heat_index(30.0, 0.0));
    }

    #[test]
    fn test_heat_index_rejects_non_finite() {
        assert_eq!(heat_index(f64::NAN, 50.0), None);
        assert_eq!(heat_index(30.0, f64::INFINITY), None);
    }

    #[test]
    fn test_classify() {
        assert_eq!(HeatLevel::classify(None), HeatLevel::Unknown);
        assert_eq!(HeatLevel::classify(Some(f64::NAN)), HeatLevel::Unknown);
        assert_eq!(HeatLevel::classify(Some(26.99)), HeatLevel::Safe);
        assert_eq!(HeatLevel::classify(Some(27.0)), HeatLevel::Caution);
        assert_eq!(HeatLevel::classify(Some(31.05)), HeatLevel::Caution);
        assert_eq!(HeatLevel::classify(Some(32.0)), HeatLevel::Danger);
    }

    #[test]
    fn test_comfort_messages() {
        assert!(HeatLevel::Safe.comfort_message().starts_with("You are safe"));
        assert!(HeatLevel::Danger.comfort_message().contains("heat stress"));
        assert_eq!(HeatLevel::Unknown.comfort_message(), "Heat data unavailable.");
    }
}
