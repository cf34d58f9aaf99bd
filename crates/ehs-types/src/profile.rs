//! Personal health profile used to tighten oxygen limits.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Minimum safe oxygen percentage for a person with no known conditions.
pub const BASE_MIN_OXYGEN: f64 = 16.0;

/// Age from which the minimum oxygen limit is raised.
pub const SENIOR_AGE: u32 = 60;

/// Extra oxygen margin added for seniors, in percentage points.
pub const SENIOR_OXYGEN_MARGIN: f64 = 0.5;

/// A pre-existing health condition.
///
/// Unrecognized names are kept as [`Condition::Other`] so that a profile
/// round-trips unchanged; they do not affect oxygen limits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum Condition {
    Asthma,
    Bronchitis,
    Copd,
    Other(String),
}

impl Condition {
    /// Minimum oxygen percentage this condition requires, if any.
    #[must_use]
    pub fn min_oxygen(&self) -> Option<f64> {
        match self {
            Condition::Asthma => Some(17.5),
            Condition::Bronchitis => Some(18.0),
            Condition::Copd => Some(19.0),
            Condition::Other(_) => None,
        }
    }

    /// Lower-case name of the condition.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Condition::Asthma => "asthma",
            Condition::Bronchitis => "bronchitis",
            Condition::Copd => "copd",
            Condition::Other(name) => name.as_str(),
        }
    }

    fn from_name(name: &str) -> Self {
        let lower = name.trim().to_lowercase();
        match lower.as_str() {
            "asthma" => Condition::Asthma,
            "bronchitis" => Condition::Bronchitis,
            "copd" => Condition::Copd,
            _ => Condition::Other(lower),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Condition {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ParseError::EmptyCondition);
        }
        Ok(Self::from_name(s))
    }
}

impl From<String> for Condition {
    fn from(s: String) -> Self {
        Self::from_name(&s)
    }
}

impl From<Condition> for String {
    fn from(c: Condition) -> Self {
        c.name().to_string()
    }
}

/// Age and conditions of the person the readings apply to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HealthProfile {
    /// Age in years, if known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub age: Option<u32>,
    /// Known health conditions.
    #[cfg_attr(feature = "serde", serde(default))]
    pub conditions: Vec<Condition>,
}

impl HealthProfile {
    /// Create a profile.
    #[must_use]
    pub fn new(age: Option<u32>, conditions: Vec<Condition>) -> Self {
        Self { age, conditions }
    }

    /// Parse a comma-separated condition list such as `"asthma, copd"`.
    ///
    /// Empty entries are skipped.
    #[must_use]
    pub fn parse_conditions(list: &str) -> Vec<Condition> {
        list.split(',')
            .filter_map(|c| c.parse::<Condition>().ok())
            .collect()
    }

    /// Whether the profile carries no information.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.age.is_none() && self.conditions.is_empty()
    }

    /// Minimum oxygen percentage considered safe for this person.
    ///
    /// Starts at [`BASE_MIN_OXYGEN`], is raised to the strictest condition
    /// limit, and gets [`SENIOR_OXYGEN_MARGIN`] on top from [`SENIOR_AGE`].
    #[must_use]
    pub fn min_safe_oxygen(&self) -> f64 {
        let base = self
            .conditions
            .iter()
            .filter_map(Condition::min_oxygen)
            .fold(BASE_MIN_OXYGEN, f64::max);

        match self.age {
            Some(age) if age >= SENIOR_AGE => base + SENIOR_OXYGEN_MARGIN,
            _ => base,
        }
    }
}
