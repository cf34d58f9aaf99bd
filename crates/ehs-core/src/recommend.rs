//! Safety recommendation from noise, oxygen, and air quality readings.
//!
//! Three rule groups are checked in a fixed order: noise, then oxygen, then
//! air quality. Within a group the more severe branch is checked first. A
//! group that fires replaces the whole recommendation produced so far, so
//! the result always comes from the last group that matched, even when an
//! earlier group found a more severe condition. [`evaluate_most_severe`]
//! offers severity priority for callers that want it.
//!
//! # Example
//!
//! ```
//! use ehs_core::recommend::evaluate;
//! use ehs_types::Status;
//!
//! let rec = evaluate(80.0, 35.0, None, None);
//! assert_eq!(rec.status, Status::Caution);
//! assert_eq!(rec.primary_action, "Reduce noise exposure.");
//!
//! // Air quality is checked last and wins over a noise danger.
//! let rec = evaluate(95.0, 0.0, None, Some(200.0));
//! assert_eq!(rec.status, Status::Caution);
//! assert_eq!(rec.primary_action, "Limit prolonged outdoor activity.");
//! ```

use core::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use ehs_types::{Readings, Recommendation, Status};

/// Noise level at or above which the area must be left, in dB.
pub const NOISE_DANGER_DB: f64 = 90.0;
/// Noise level at or above which long exposure needs a break, in dB.
pub const NOISE_CAUTION_DB: f64 = 75.0;
/// Exposure time from which a caution-level noise fires, in minutes.
pub const NOISE_CAUTION_MINUTES: f64 = 30.0;
/// Oxygen level at or below which descent is required, in percent.
pub const OXYGEN_DANGER_PCT: f64 = 16.0;
/// Oxygen level at or below which exertion should be avoided, in percent.
pub const OXYGEN_CAUTION_PCT: f64 = 19.0;
/// Air quality index at or above which outdoor exposure must be avoided.
pub const AQI_DANGER: f64 = 300.0;
/// Air quality index at or above which outdoor activity should be limited.
pub const AQI_CAUTION: f64 = 150.0;

/// A block of threshold checks for one kind of reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleGroup {
    Noise,
    Oxygen,
    AirQuality,
}

impl RuleGroup {
    /// Evaluation order. Later groups overwrite earlier ones.
    pub const ORDER: [RuleGroup; 3] = [RuleGroup::Noise, RuleGroup::Oxygen, RuleGroup::AirQuality];

    /// Human-readable group name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            RuleGroup::Noise => "noise",
            RuleGroup::Oxygen => "oxygen",
            RuleGroup::AirQuality => "air quality",
        }
    }

    /// Run this group's checks. Returns `None` if nothing matched or the
    /// reading the group needs is absent.
    ///
    /// Comparisons against `NaN` are false, so a `NaN` reading never fires.
    #[must_use]
    pub fn check(&self, readings: &Readings) -> Option<Recommendation> {
        match self {
            RuleGroup::Noise => check_noise(readings.noise_level, readings.exposure_time),
            RuleGroup::Oxygen => readings.oxygen_level.and_then(check_oxygen),
            RuleGroup::AirQuality => readings.air_quality_index.and_then(check_air_quality),
        }
    }
}

impl fmt::Display for RuleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn check_noise(noise_level: f64, exposure_time: f64) -> Option<Recommendation> {
    if noise_level >= NOISE_DANGER_DB {
        Some(Recommendation::new(
            Status::Danger,
            "Leave the noisy area immediately.",
            "Use ear protection if exposure continues.",
        ))
    } else if noise_level >= NOISE_CAUTION_DB && exposure_time >= NOISE_CAUTION_MINUTES {
        Some(Recommendation::new(
            Status::Caution,
            "Reduce noise exposure.",
            "Take a 10–15 minute break in a quieter area.",
        ))
    } else {
        None
    }
}

fn check_oxygen(oxygen_level: f64) -> Option<Recommendation> {
    if oxygen_level <= OXYGEN_DANGER_PCT {
        Some(Recommendation::new(
            Status::Danger,
            "Descend to a lower altitude immediately.",
            "Seek medical help if symptoms appear.",
        ))
    } else if oxygen_level <= OXYGEN_CAUTION_PCT {
        Some(Recommendation::new(
            Status::Caution,
            "Avoid physical exertion.",
            "Monitor oxygen levels closely.",
        ))
    } else {
        None
    }
}

fn check_air_quality(air_quality_index: f64) -> Option<Recommendation> {
    if air_quality_index >= AQI_DANGER {
        Some(Recommendation::new(
            Status::Danger,
            "Avoid outdoor exposure.",
            "Wear a protective mask if unavoidable.",
        ))
    } else if air_quality_index >= AQI_CAUTION {
        Some(Recommendation::new(
            Status::Caution,
            "Limit prolonged outdoor activity.",
            "Sensitive individuals should stay indoors.",
        ))
    } else {
        None
    }
}

/// A rule group that fired, with the recommendation it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub group: RuleGroup,
    pub recommendation: Recommendation,
}

/// How to combine the findings of several rule groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// The last group that fired wins.
    #[default]
    LastMatch,
    /// The most severe finding wins; ties go to the later group.
    MostSevere,
}

/// Every rule group that fires for `readings`, in evaluation order.
#[must_use]
pub fn findings(readings: &Readings) -> Vec<Finding> {
    RuleGroup::ORDER
        .iter()
        .filter_map(|group| {
            group.check(readings).map(|recommendation| {
                debug!(
                    group = group.name(),
                    status = %recommendation.status,
                    "rule group matched"
                );
                Finding {
                    group: *group,
                    recommendation,
                }
            })
        })
        .collect()
}

/// Evaluate readings with the given priority.
#[must_use]
pub fn evaluate_with(readings: &Readings, priority: Priority) -> Recommendation {
    let found = findings(readings);
    let chosen = match priority {
        Priority::LastMatch => found.into_iter().last(),
        // max_by_key returns the last of equally severe elements
        Priority::MostSevere => found
            .into_iter()
            .max_by_key(|finding| finding.recommendation.status),
    };
    chosen
        .map(|finding| finding.recommendation)
        .unwrap_or_default()
}

/// Evaluate a reading set. The last rule group that fired wins.
#[must_use]
pub fn evaluate_readings(readings: &Readings) -> Recommendation {
    evaluate_with(readings, Priority::LastMatch)
}

/// Evaluate the four readings. The last rule group that fired wins.
#[must_use]
pub fn evaluate(
    noise_level: f64,
    exposure_time: f64,
    oxygen_level: Option<f64>,
    air_quality_index: Option<f64>,
) -> Recommendation {
    let readings = Readings {
        noise_level,
        exposure_time,
        oxygen_level,
        air_quality_index,
    };
    evaluate_readings(&readings)
}

/// Evaluate a reading set, letting the most severe finding win.
#[must_use]
pub fn evaluate_most_severe(readings: &Readings) -> Recommendation {
    evaluate_with(readings, Priority::MostSevere)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_safe_readings() {
        let rec = evaluate(10.0, 0.0, Some(21.0), Some(10.0));
        assert_eq!(rec, Recommendation::safe());
    }

    #[test]
    fn test_noise_danger() {
        let rec = evaluate(95.0, 0.0, None, None);
        assert_eq!(rec.status, Status::Danger);
        assert_eq!(rec.primary_action, "Leave the noisy area immediately.");
        assert_eq!(
            rec.secondary_action,
            "Use ear protection if exposure continues."
        );
    }

    #[test]
    fn test_noise_caution_needs_exposure_time() {
        let rec = evaluate(80.0, 35.0, None, None);
        assert_eq!(rec.status, Status::Caution);
        assert_eq!(rec.primary_action, "Reduce noise exposure.");
        assert_eq!(
            rec.secondary_action,
            "Take a 10–15 minute break in a quieter area."
        );

        let rec = evaluate(80.0, 29.9, None, None);
        assert_eq!(rec.status, Status::Safe);
    }

    #[test]
    fn test_noise_boundaries() {
        assert_eq!(evaluate(90.0, 0.0, None, None).status, Status::Danger);
        assert_eq!(evaluate(89.9, 30.0, None, None).status, Status::Caution);
        assert_eq!(evaluate(75.0, 30.0, None, None).status, Status::Caution);
        assert_eq!(evaluate(74.9, 600.0, None, None).status, Status::Safe);
    }

    #[test]
    fn test_oxygen_groups() {
        let rec = evaluate(0.0, 0.0, Some(15.0), None);
        assert_eq!(rec.status, Status::Danger);
        assert_eq!(rec.primary_action, "Descend to a lower altitude immediately.");

        let rec = evaluate(0.0, 0.0, Some(16.0), None);
        assert_eq!(rec.status, Status::Danger);

        let rec = evaluate(0.0, 0.0, Some(19.0), None);
        assert_eq!(rec.status, Status::Caution);
        assert_eq!(rec.primary_action, "Avoid physical exertion.");
        assert_eq!(rec.secondary_action, "Monitor oxygen levels closely.");

        assert_eq!(evaluate(0.0, 0.0, Some(19.1), None).status, Status::Safe);
    }

    #[test]
    fn test_missing_oxygen_never_fires() {
        let readings = Readings::new(0.0, 0.0);
        assert!(RuleGroup::Oxygen.check(&readings).is_none());
        assert!(findings(&readings).is_empty());
    }

    #[test]
    fn test_air_quality_groups() {
        let rec = evaluate(0.0, 0.0, None, Some(350.0));
        assert_eq!(rec.status, Status::Danger);
        assert_eq!(rec.primary_action, "Avoid outdoor exposure.");
        assert_eq!(rec.secondary_action, "Wear a protective mask if unavoidable.");

        let rec = evaluate(0.0, 0.0, None, Some(200.0));
        assert_eq!(rec.status, Status::Caution);
        assert_eq!(rec.primary_action, "Limit prolonged outdoor activity.");
        assert_eq!(
            rec.secondary_action,
            "Sensitive individuals should stay indoors."
        );

        assert_eq!(evaluate(0.0, 0.0, None, Some(149.0)).status, Status::Safe);
    }

    #[test]
    fn test_last_match_wins_over_severity() {
        let rec = evaluate(95.0, 0.0, None, Some(200.0));
        assert_eq!(rec.status, Status::Caution);
        assert_eq!(rec.primary_action, "Limit prolonged outdoor activity.");

        // Oxygen caution overrides noise danger as well.
        let rec = evaluate(95.0, 0.0, Some(18.0), None);
        assert_eq!(rec.status, Status::Caution);
        assert_eq!(rec.primary_action, "Avoid physical exertion.");
    }

    #[test]
    fn test_later_group_not_firing_keeps_earlier_result() {
        let rec = evaluate(95.0, 0.0, Some(21.0), Some(20.0));
        assert_eq!(rec.status, Status::Danger);
        assert_eq!(rec.primary_action, "Leave the noisy area immediately.");
    }

    #[test]
    fn test_most_severe_priority() {
        let readings = Readings::new(95.0, 0.0).with_air_quality(200.0);
        let rec = evaluate_most_severe(&readings);
        assert_eq!(rec.status, Status::Danger);
        assert_eq!(rec.primary_action, "Leave the noisy area immediately.");

        // Equal severity: the later group still wins.
        let readings = Readings::new(95.0, 0.0).with_air_quality(400.0);
        let rec = evaluate_most_severe(&readings);
        assert_eq!(rec.primary_action, "Avoid outdoor exposure.");
    }

    #[test]
    fn test_findings_in_evaluation_order() {
        let readings = Readings::new(80.0, 45.0)
            .with_oxygen(15.0)
            .with_air_quality(320.0);
        let groups: Vec<RuleGroup> = findings(&readings).iter().map(|f| f.group).collect();
        assert_eq!(
            groups,
            vec![RuleGroup::Noise, RuleGroup::Oxygen, RuleGroup::AirQuality]
        );
    }

    #[test]
    fn test_nan_readings_fall_through() {
        let rec = evaluate(f64::NAN, f64::NAN, Some(f64::NAN), Some(f64::NAN));
        assert_eq!(rec, Recommendation::safe());
    }

    #[test]
    fn test_rule_group_display() {
        assert_eq!(RuleGroup::AirQuality.to_string(), "air quality");
        assert_eq!(
            serde_json::to_string(&RuleGroup::AirQuality).unwrap(),
            "\"air_quality\""
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn reading() -> impl Strategy<Value = f64> {
        prop_oneof![-50.0f64..500.0, Just(f64::NAN)]
    }

    proptest! {
        #[test]
        fn actions_are_never_empty(
            noise in reading(),
            exposure in reading(),
            oxygen in proptest::option::of(reading()),
            aqi in proptest::option::of(reading()),
        ) {
            let rec = evaluate(noise, exposure, oxygen, aqi);
            prop_assert!(Status::ALL.contains(&rec.status));
            prop_assert!(!rec.primary_action.is_empty());
            prop_assert!(!rec.secondary_action.is_empty());
        }

        #[test]
        fn result_matches_last_finding(
            noise in reading(),
            exposure in reading(),
            oxygen in proptest::option::of(reading()),
            aqi in proptest::option::of(reading()),
        ) {
            let readings = Readings { noise_level: noise, exposure_time: exposure, oxygen_level: oxygen, air_quality_index: aqi };
            let expected = findings(&readings)
                .pop()
                .map(|f| f.recommendation)
                .unwrap_or_default();
            prop_assert_eq!(evaluate_readings(&readings), expected);
        }

        #[test]
        fn most_severe_is_at_least_as_severe(
            noise in reading(),
            exposure in reading(),
            oxygen in proptest::option::of(reading()),
            aqi in proptest::option::of(reading()),
        ) {
            let readings = Readings { noise_level: noise, exposure_time: exposure, oxygen_level: oxygen, air_quality_index: aqi };
            prop_assert!(evaluate_most_severe(&readings).status >= evaluate_readings(&readings).status);
        }
    }
}
