//! Core types for environmental safety readings and recommendations.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Primary action shown when no rule group fires.
pub const SAFE_PRIMARY_ACTION: &str = "No immediate action required.";

/// Secondary action shown when no rule group fires.
pub const SAFE_SECONDARY_ACTION: &str = "Environment conditions are within safe limits.";

/// Overall safety classification for a set of readings.
///
/// Variants are declared in order of increasing severity, so the derived
/// `Ord` can be used to pick the most severe of several statuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Status {
    /// All readings are within safe limits.
    #[default]
    Safe,
    /// At least one reading calls for attention.
    Caution,
    /// At least one reading calls for immediate action.
    Danger,
}

impl Status {
    /// All statuses, least severe first.
    pub const ALL: [Status; 3] = [Status::Safe, Status::Caution, Status::Danger];

    /// The upper-case name used in status text (`SAFE`, `CAUTION`, `DANGER`).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Safe => "SAFE",
            Status::Caution => "CAUTION",
            Status::Danger => "DANGER",
        }
    }

    /// The lower-case class name applied to the status element.
    #[must_use]
    pub fn css_class(&self) -> &'static str {
        match self {
            Status::Safe => "safe",
            Status::Caution => "caution",
            Status::Danger => "danger",
        }
    }

    /// Border accent color for this status, as a CSS hex color.
    #[must_use]
    pub fn accent_color(&self) -> &'static str {
        match self {
            Status::Safe => "#2ecc71",
            Status::Caution => "#f1c40f",
            Status::Danger => "#e74c3c",
        }
    }

    /// The status text written to the display, e.g. `Status: CAUTION`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("Status: {}", self.as_str())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SAFE" => Ok(Status::Safe),
            "CAUTION" => Ok(Status::Caution),
            "DANGER" => Ok(Status::Danger),
            _ => Err(ParseError::InvalidStatus(s.to_string())),
        }
    }
}

/// One set of environmental readings to evaluate.
///
/// Oxygen and air quality are optional; a missing value means the
/// corresponding rule group is skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Readings {
    /// Sound level in dB.
    pub noise_level: f64,
    /// Time spent at that sound level, in minutes.
    pub exposure_time: f64,
    /// Oxygen availability in percent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub oxygen_level: Option<f64>,
    /// Air quality index.
    #[cfg_attr(feature = "serde", serde(default))]
    pub air_quality_index: Option<f64>,
}

impl Readings {
    /// Create a reading set with only noise data.
    #[must_use]
    pub fn new(noise_level: f64, exposure_time: f64) -> Self {
        Self {
            noise_level,
            exposure_time,
            oxygen_level: None,
            air_quality_index: None,
        }
    }

    /// Set the oxygen level.
    #[must_use]
    pub fn with_oxygen(mut self, oxygen_level: impl Into<Option<f64>>) -> Self {
        self.oxygen_level = oxygen_level.into();
        self
    }

    /// Set the air quality index.
    #[must_use]
    pub fn with_air_quality(mut self, air_quality_index: impl Into<Option<f64>>) -> Self {
        self.air_quality_index = air_quality_index.into();
        self
    }
}

/// The outcome of one evaluation: a status and two actions for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Recommendation {
    /// Overall status.
    pub status: Status,
    /// What to do first.
    pub primary_action: String,
    /// Follow-up advice.
    pub secondary_action: String,
}

impl Recommendation {
    /// Create a recommendation.
    pub fn new(
        status: Status,
        primary_action: impl Into<String>,
        secondary_action: impl Into<String>,
    ) -> Self {
        Self {
            status,
            primary_action: primary_action.into(),
            secondary_action: secondary_action.into(),
        }
    }

    /// The recommendation used when no rule group fires.
    #[must_use]
    pub fn safe() -> Self {
        Self::new(Status::Safe, SAFE_PRIMARY_ACTION, SAFE_SECONDARY_ACTION)
    }
}

impl Default for Recommendation {
    fn default() -> Self {
        Self::safe()
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {}",
            self.status, self.primary_action, self.secondary_action
        )
    }
}
