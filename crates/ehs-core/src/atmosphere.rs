//! Altitude, pressure, and oxygen availability.
//!
//! Uses the international standard atmosphere approximation
//! `h = 44330 * (1 - (P / P0)^(1 / 5.255))` and a linear oxygen scaling
//! relative to 21 % at sea level. These are educational estimates, not
//! medical-grade values.

use core::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::util::round2;

/// Standard sea-level pressure in hPa.
pub const SEA_LEVEL_PRESSURE_HPA: f64 = 1013.25;
/// Oxygen availability at sea level, in percent.
pub const SEA_LEVEL_OXYGEN_PCT: f64 = 21.0;
/// Highest altitude the safe-altitude search will consider, in meters.
pub const DEFAULT_MAX_ALTITUDE_M: f64 = 6000.0;
/// Step size of the safe-altitude search, in meters.
pub const ALTITUDE_STEP_M: f64 = 100.0;

const SCALE_HEIGHT_M: f64 = 44330.0;
const EXPONENT: f64 = 5.255;

/// Oxygen level at or above which conditions are safe, in percent.
pub const OXYGEN_SAFE_MIN_PCT: f64 = 19.5;
/// Oxygen level at or above which the risk is mild, in percent.
pub const OXYGEN_MILD_RISK_MIN_PCT: f64 = 16.0;

/// Estimate altitude in meters from pressure in hPa, rounded to 2 decimals.
///
/// Returns `None` for non-positive or non-finite pressure.
#[must_use]
pub fn altitude_from_pressure(pressure_hpa: f64) -> Option<f64> {
    if !pressure_hpa.is_finite() || pressure_hpa <= 0.0 {
        return None;
    }
    let ratio = pressure_hpa / SEA_LEVEL_PRESSURE_HPA;
    Some(round2(SCALE_HEIGHT_M * (1.0 - ratio.powf(1.0 / EXPONENT))))
}

/// Estimate pressure in hPa at an altitude in meters, rounded to 2 decimals.
///
/// Returns `None` above the altitude where the approximation breaks down.
#[must_use]
pub fn pressure_from_altitude(altitude_m: f64) -> Option<f64> {
    if !altitude_m.is_finite() {
        return None;
    }
    let term = 1.0 - altitude_m / SCALE_HEIGHT_M;
    if term <= 0.0 {
        return None;
    }
    Some(round2(SEA_LEVEL_PRESSURE_HPA * term.powf(EXPONENT)))
}

/// Oxygen availability in percent at a given pressure, rounded to 2 decimals.
#[must_use]
pub fn oxygen_availability(pressure_hpa: f64) -> Option<f64> {
    if !pressure_hpa.is_finite() {
        return None;
    }
    Some(round2(SEA_LEVEL_OXYGEN_PCT * pressure_hpa / SEA_LEVEL_PRESSURE_HPA))
}

/// Highest altitude, in 100 m steps from `start_m`, at which oxygen stays at
/// or above `min_safe_oxygen`.
///
/// The search starts at `max(start_m, 0)` and never goes past `max_alt_m`.
/// The starting altitude is returned when even the first step is unsafe.
#[must_use]
pub fn safe_altitude_limit(start_m: f64, min_safe_oxygen: f64, max_alt_m: f64) -> Option<f64> {
    if !start_m.is_finite() || !min_safe_oxygen.is_finite() || !max_alt_m.is_finite() {
        return None;
    }

    let start = start_m.max(0.0);
    let max_iters = ((max_alt_m - start) / ALTITUDE_STEP_M).max(0.0) as u32 + 2;

    let mut current = start;
    let mut last_safe = start;
    let mut iters = 0;

    while current <= max_alt_m && iters < max_iters {
        let Some(oxygen) = pressure_from_altitude(current).and_then(oxygen_availability) else {
            break;
        };
        if oxygen < min_safe_oxygen {
            break;
        }
        last_safe = current;
        current += ALTITUDE_STEP_M;
        iters += 1;
    }

    debug!(start, min_safe_oxygen, last_safe, "safe altitude search finished");
    Some(round2(last_safe))
}

/// Oxygen availability category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OxygenStatus {
    Safe,
    #[serde(rename = "Mild Risk")]
    MildRisk,
    #[serde(rename = "High Risk")]
    HighRisk,
    Unknown,
}

impl OxygenStatus {
    /// Classify an oxygen percentage.
    #[must_use]
    pub fn classify(oxygen_pct: Option<f64>) -> Self {
        match oxygen_pct.filter(|o| !o.is_nan()) {
            None => OxygenStatus::Unknown,
            Some(o) if o >= OXYGEN_SAFE_MIN_PCT => OxygenStatus::Safe,
            Some(o) if o >= OXYGEN_MILD_RISK_MIN_PCT => OxygenStatus::MildRisk,
            Some(_) => OxygenStatus::HighRisk,
        }
    }
}

impl fmt::Display for OxygenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OxygenStatus::Safe => "Safe",
            OxygenStatus::MildRisk => "Mild Risk",
            OxygenStatus::HighRisk => "High Risk",
            OxygenStatus::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_altitude_from_pressure() {
        assert_eq!(altitude_from_pressure(SEA_LEVEL_PRESSURE_HPA), Some(0.0));
        assert_eq!(altitude_from_pressure(900.0), Some(988.65));
        assert_eq!(altitude_from_pressure(700.0), Some(3012.62));
        assert_eq!(altitude_from_pressure(0.0), None);
        assert_eq!(altitude_from_pressure(-5.0), None);
    }

    #[test]
    fn test_pressure_from_altitude() {
        assert_eq!(pressure_from_altitude(0.0), Some(1013.25));
        assert_eq!(pressure_from_altitude(1000.0), Some(898.76));
        assert_eq!(pressure_from_altitude(50000.0), None);
    }

    #[test]
    fn test_oxygen_availability() {
        assert_eq!(oxygen_availability(SEA_LEVEL_PRESSURE_HPA), Some(21.0));
        assert_eq!(oxygen_availability(900.0), Some(18.65));
        assert_eq!(oxygen_availability(700.0), Some(14.51));
        assert_eq!(oxygen_availability(f64::NAN), None);
    }

    #[test]
    fn test_safe_altitude_limit() {
        assert_eq!(safe_altitude_limit(0.0, 16.0, DEFAULT_MAX_ALTITUDE_M), Some(2200.0));
        assert_eq!(safe_altitude_limit(-50.0, 16.0, DEFAULT_MAX_ALTITUDE_M), Some(2200.0));
        assert_eq!(safe_altitude_limit(0.0, 10.0, DEFAULT_MAX_ALTITUDE_M), Some(5800.0));
    }

    #[test]
    fn test_safe_altitude_limit_returns_start_when_already_unsafe() {
        assert_eq!(safe_altitude_limit(1000.0, 19.0, DEFAULT_MAX_ALTITUDE_M), Some(1000.0));
    }

    #[test]
    fn test_safe_altitude_limit_capped_by_max() {
        assert_eq!(safe_altitude_limit(0.0, 1.0, 500.0), Some(500.0));
        assert_eq!(safe_altitude_limit(f64::NAN, 16.0, 500.0), None);
    }

    #[test]
    fn test_oxygen_status() {
        assert_eq!(OxygenStatus::classify(None), OxygenStatus::Unknown);
        assert_eq!(OxygenStatus::classify(Some(21.0)), OxygenStatus::Safe);
        assert_eq!(OxygenStatus::classify(Some(19.5)), OxygenStatus::Safe);
        assert_eq!(OxygenStatus::classify(Some(18.65)), OxygenStatus::MildRisk);
        assert_eq!(OxygenStatus::classify(Some(16.0)), OxygenStatus::MildRisk);
        assert_eq!(OxygenStatus::classify(Some(14.51)), OxygenStatus::HighRisk);
    }

    #[test]
    fn test_oxygen_status_names() {
        assert_eq!(OxygenStatus::MildRisk.to_string(), "Mild Risk");
        assert_eq!(
            serde_json::to_string(&OxygenStatus::HighRisk).unwrap(),
            "\"High Risk\""
        );
    }
}
