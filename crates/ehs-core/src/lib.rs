//! Safety evaluation for environmental readings.
//!
//! This crate turns noise, oxygen, and air quality readings into a safety
//! recommendation and writes it onto a display. It also carries the
//! exposure calculations behind the environment dashboard: heat index,
//! altitude and oxygen from pressure, safe ascent, and noise dose.
//!
//! # Features
//!
//! - **Recommendations**: three rule groups, last match wins by default
//! - **Display writing**: render onto any [`DisplaySurface`]
//! - **Exposure math**: heat, atmosphere, and noise dose calculations
//! - **Reports**: combine weather, noise, and a [`HealthProfile`]
//! - **Weather**: OpenWeather client with retry (`weather-client` feature)
//!
//! # Quick Start
//!
//! ```
//! use ehs_core::{MemorySurface, UiWriter, evaluate};
//! use ehs_types::Status;
//!
//! let rec = evaluate(92.0, 10.0, Some(20.5), None);
//! assert_eq!(rec.status, Status::Danger);
//!
//! let mut surface = MemorySurface::with_standard_elements();
//! UiWriter::default().render(&mut surface, &rec);
//! assert_eq!(
//!     surface.element("primaryAction").unwrap().text,
//!     "Leave the noisy area immediately."
//! );
//! ```

pub mod atmosphere;
pub mod display;
pub mod error;
pub mod heat;
pub mod mock;
pub mod noise;
pub mod recommend;
pub mod report;
pub mod util;
pub mod weather;

#[cfg(feature = "weather-client")]
pub mod retry;
#[cfg(feature = "weather-client")]
pub mod weather_client;

pub use atmosphere::{
    OxygenStatus, altitude_from_pressure, oxygen_availability, pressure_from_altitude,
    safe_altitude_limit,
};
pub use display::{DisplaySurface, DisplayTargets, RenderOutcome, UiWriter, render};
pub use error::{Error, Result};
pub use heat::{HeatLevel, heat_index};
pub use mock::{ElementState, MemorySurface};
pub use noise::{NoiseRisk, noise_dose, safe_exposure_hours};
pub use recommend::{
    Finding, Priority, RuleGroup, evaluate, evaluate_most_severe, evaluate_readings,
    evaluate_with, findings,
};
pub use report::{EnvironmentReport, NoiseExposure, ReportBuilder};
pub use weather::{DEFAULT_CITY, Location, WeatherObservation, parse_response};

#[cfg(feature = "weather-client")]
pub use retry::{RetryConfig, with_retry};
#[cfg(feature = "weather-client")]
pub use weather_client::{StaticWeather, WeatherClient, WeatherSource};

// Re-export from ehs-types
pub use ehs_types::{Condition, HealthProfile, Readings, Recommendation, Status};
