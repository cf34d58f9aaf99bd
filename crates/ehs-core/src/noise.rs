//! Noise dose and hearing-risk classification.
//!
//! Simplified exchange-rate model: 85 dB is safe for 8 hours and every
//! additional 3 dB halves the safe time.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::util::round2;

/// Sound level that is safe for [`REFERENCE_HOURS`], in dB.
pub const REFERENCE_DB: f64 = 85.0;
/// Safe exposure at [`REFERENCE_DB`], in hours.
pub const REFERENCE_HOURS: f64 = 8.0;
/// Increase in dB that halves the safe exposure time.
pub const EXCHANGE_RATE_DB: f64 = 3.0;
/// Dose reported when the safe time is effectively zero.
pub const SATURATED_DOSE_PCT: f64 = 9999.0;

/// Dose below which exposure is considered safe, in percent.
pub const DOSE_SAFE_MAX_PCT: f64 = 50.0;
/// Dose below which exposure calls for caution, in percent.
pub const DOSE_CAUTION_MAX_PCT: f64 = 100.0;

/// Hours of exposure at `db` that add up to a 100 % dose.
#[must_use]
pub fn safe_exposure_hours(db: f64) -> f64 {
    if db <= REFERENCE_DB {
        REFERENCE_HOURS
    } else {
        REFERENCE_HOURS / 2f64.powf((db - REFERENCE_DB) / EXCHANGE_RATE_DB)
    }
}

/// Daily noise dose in percent, rounded to 2 decimals.
///
/// Negative exposure is treated as zero. Returns `None` if either input is
/// not a number.
#[must_use]
pub fn noise_dose(db: f64, exposure_minutes: f64) -> Option<f64> {
    if db.is_nan() || exposure_minutes.is_nan() {
        return None;
    }

    let exposure_hours = exposure_minutes.max(0.0) / 60.0;
    let safe_hours = safe_exposure_hours(db);

    if safe_hours <= 0.0 {
        return Some(SATURATED_DOSE_PCT);
    }

    let dose = exposure_hours / safe_hours * 100.0;
    if dose.is_infinite() {
        Some(SATURATED_DOSE_PCT)
    } else {
        Some(round2(dose))
    }
}

/// Hearing-risk category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoiseRisk {
    Safe,
    Caution,
    #[serde(rename = "High Risk")]
    HighRisk,
    Unknown,
}

impl NoiseRisk {
    /// Classify an exposure by its noise dose.
    #[must_use]
    pub fn classify(db: Option<f64>, exposure_minutes: Option<f64>) -> Self {
        let dose = db
            .zip(exposure_minutes)
            .and_then(|(db, minutes)| noise_dose(db, minutes));
        Self::from_dose(dose)
    }

    /// Classify a precomputed dose percentage.
    #[must_use]
    pub fn from_dose(dose_pct: Option<f64>) -> Self {
        match dose_pct {
            None => NoiseRisk::Unknown,
            Some(d) if d < DOSE_SAFE_MAX_PCT => NoiseRisk::Safe,
            Some(d) if d < DOSE_CAUTION_MAX_PCT => NoiseRisk::Caution,
            Some(_) => NoiseRisk::HighRisk,
        }
    }

    /// Guidance for this risk level.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            NoiseRisk::Safe => "Noise exposure is within safe limits.",
            NoiseRisk::Caution => {
                "Prolonged exposure at this noise level may cause hearing strain. Consider breaks or protection."
            }
            NoiseRisk::HighRisk => {
                "High risk of hearing damage! Limit exposure and use hearing protection."
            }
            NoiseRisk::Unknown => "Noise exposure data is incomplete or unknown.",
        }
    }
}

impl fmt::Display for NoiseRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NoiseRisk::Safe => "Safe",
            NoiseRisk::Caution => "Caution",
            NoiseRisk::HighRisk => "High Risk",
            NoiseRisk::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}
