//! Environment report combining weather, noise, and a health profile.
//!
//! This is the full dashboard payload: heat stress from temperature and
//! humidity, altitude and oxygen from pressure, how much higher the person
//! can safely go given their profile, their noise dose, and the safety
//! recommendation for the combined readings.

use serde::{Deserialize, Serialize};
use tracing::debug;

use ehs_types::{Condition, HealthProfile, Readings, Recommendation};

use crate::atmosphere::{
    DEFAULT_MAX_ALTITUDE_M, OxygenStatus, altitude_from_pressure, oxygen_availability,
    safe_altitude_limit,
};
use crate::heat::{HeatLevel, heat_index};
use crate::noise::{NoiseRisk, noise_dose};
use crate::recommend::{Priority, evaluate_with};
use crate::util::{finite, non_zero, round2};
use crate::weather::WeatherObservation;

/// Noise exposure input for a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NoiseExposure {
    /// Sound level in dB.
    pub db: Option<f64>,
    /// Exposure time in minutes.
    pub minutes: Option<f64>,
}

impl NoiseExposure {
    pub fn new(db: Option<f64>, minutes: Option<f64>) -> Self {
        Self { db, minutes }
    }
}

/// The full environment report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentReport {
    pub age: Option<u32>,
    pub conditions: Vec<Condition>,
    pub personal_min_oxygen: f64,

    pub city: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,

    pub heat_index: Option<f64>,
    pub heat_level: HeatLevel,
    pub comfort_message: String,

    pub current_altitude_m: Option<f64>,
    pub oxygen_percent: Option<f64>,
    pub oxygen_status: OxygenStatus,
    pub max_safe_altitude_m: Option<f64>,
    pub extra_safe_ascent_m: Option<f64>,

    pub noise_db: Option<f64>,
    pub noise_minutes: Option<f64>,
    pub noise_dose_percent: Option<f64>,
    pub noise_status: NoiseRisk,
    pub noise_message: String,

    pub air_quality_index: Option<f64>,
    pub recommendation: Recommendation,
}

/// Builds [`EnvironmentReport`]s.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    profile: HealthProfile,
    priority: Priority,
    max_altitude_m: f64,
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self {
            profile: HealthProfile::default(),
            priority: Priority::LastMatch,
            max_altitude_m: DEFAULT_MAX_ALTITUDE_M,
        }
    }
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this person's profile for oxygen limits.
    #[must_use]
    pub fn profile(mut self, profile: HealthProfile) -> Self {
        self.profile = profile;
        self
    }

    /// How rule groups are combined for the recommendation.
    #[must_use]
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Upper bound of the safe-altitude search, in meters.
    #[must_use]
    pub fn max_altitude(mut self, meters: f64) -> Self {
        self.max_altitude_m = meters;
        self
    }

    /// Build the report.
    pub fn build(
        &self,
        weather: &WeatherObservation,
        noise: NoiseExposure,
        air_quality_index: Option<f64>,
    ) -> EnvironmentReport {
        let min_oxygen = self.profile.min_safe_oxygen();
        let temperature = finite(Some(weather.temperature));
        let humidity = finite(Some(weather.humidity));
        let pressure = finite(Some(weather.pressure));

        let heat_index = temperature
            .zip(humidity)
            .and_then(|(t, h)| heat_index(t, h));
        let heat_level = HeatLevel::classify(heat_index);

        let altitude = pressure.and_then(altitude_from_pressure);
        let oxygen_percent = pressure.and_then(oxygen_availability);
        let oxygen_status = OxygenStatus::classify(oxygen_percent);
        let max_safe_altitude =
            altitude.and_then(|alt| safe_altitude_limit(alt, min_oxygen, self.max_altitude_m));
        let extra_safe_ascent = non_zero(max_safe_altitude)
            .zip(non_zero(altitude))
            .map(|(max, alt)| round2(max - alt));

        let noise_db = finite(noise.db);
        let noise_minutes = finite(noise.minutes);
        let noise_dose_percent = non_zero(noise_db)
            .zip(non_zero(noise_minutes))
            .and_then(|(db, minutes)| noise_dose(db, minutes));
        let noise_status = NoiseRisk::classify(noise_db, noise_minutes);

        let readings = Readings::new(noise_db.unwrap_or(0.0), noise_minutes.unwrap_or(0.0))
            .with_oxygen(oxygen_percent)
            .with_air_quality(finite(air_quality_index));
        let recommendation = evaluate_with(&readings, self.priority);

        debug!(
            heat = %heat_level,
            oxygen = %oxygen_status,
            noise = %noise_status,
            status = %recommendation.status,
            "environment report built"
        );

        EnvironmentReport {
            age: self.profile.age,
            conditions: self.profile.conditions.clone(),
            personal_min_oxygen: round2(min_oxygen),
            city: weather.city.clone(),
            lat: weather.lat,
            lon: weather.lon,
            temperature: round2(weather.temperature),
            humidity: round2(weather.humidity),
            pressure: round2(weather.pressure),
            heat_index,
            heat_level,
            comfort_message: heat_level.comfort_message().to_string(),
            current_altitude_m: altitude,
            oxygen_percent,
            oxygen_status,
            max_safe_altitude_m: max_safe_altitude,
            extra_safe_ascent_m: extra_safe_ascent,
            noise_db,
            noise_minutes,
            noise_dose_percent,
            noise_status,
            noise_message: noise_status.message().to_string(),
            air_quality_index: finite(air_quality_index),
            recommendation,
        }
    }
}
