//! REST API endpoints for the ehs-service.
//!
//! ## Error Handling
//!
//! All endpoints return structured JSON errors via [`AppError`]. Weather
//! lookup failures return HTTP 400 with `{"error": code, "details": message}`
//! where `code` is one of the stable codes from [`ehs_core::Error::code`].

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;
use tracing::{debug, warn};

use ehs_core::{
    EnvironmentReport, Error as CoreError, Location, NoiseExposure, Priority, ReportBuilder,
    RuleGroup, evaluate_with, findings,
};
use ehs_types::{HealthProfile, Readings, Recommendation};

use crate::state::AppState;

/// Create the API router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/recommendation", get(get_recommendation))
        .route("/api/metrics", get(get_metrics))
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// Whether weather-backed endpoints can answer.
    pub weather_enabled: bool,
}

/// Health check endpoint.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: OffsetDateTime::now_utc(),
        weather_enabled: state.weather.is_some(),
    })
}

/// Query parameters for a recommendation.
///
/// Blank optional readings count as absent.
#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub noise_level: f64,
    pub exposure_time: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub oxygen_level: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub air_quality_index: Option<f64>,
    #[serde(default)]
    pub priority: Priority,
}

/// A recommendation with the hints a display needs to style it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    #[serde(flatten)]
    pub recommendation: Recommendation,
    /// `Status: <STATUS>` text for the status element.
    pub label: String,
    /// Class for the status element.
    pub status_class: &'static str,
    /// Accent color for the status element.
    pub accent_color: &'static str,
    /// Every rule group that fired, in evaluation order.
    pub matched: Vec<RuleGroup>,
}

impl RecommendationResponse {
    fn new(recommendation: Recommendation, matched: Vec<RuleGroup>) -> Self {
        let status = recommendation.status;
        Self {
            recommendation,
            label: status.label(),
            status_class: status.css_class(),
            accent_color: status.accent_color(),
            matched,
        }
    }
}

/// Evaluate a set of readings.
///
/// Non-numeric values such as `NaN` are not rejected; they never satisfy a
/// threshold, so their group does not fire.
async fn get_recommendation(
    Query(query): Query<RecommendationQuery>,
) -> Json<RecommendationResponse> {
    let readings = Readings::new(query.noise_level, query.exposure_time)
        .with_oxygen(query.oxygen_level)
        .with_air_quality(query.air_quality_index);

    let matched = findings(&readings).into_iter().map(|f| f.group).collect();
    let recommendation = evaluate_with(&readings, query.priority);
    debug!(status = %recommendation.status, "recommendation evaluated");

    Json(RecommendationResponse::new(recommendation, matched))
}

/// Query parameters for the environment report.
///
/// Numeric fields are lenient: blank or unparsable values count as absent.
#[derive(Debug, Default, Deserialize)]
pub struct MetricsQuery {
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lon: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub noise_db: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub noise_minutes: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub aqi: Option<f64>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub age: Option<u32>,
    /// Comma-separated condition names.
    pub conditions: Option<String>,
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite()))
}

fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.trim().parse::<u32>().ok()))
}

impl MetricsQuery {
    fn location(&self, default_city: &str) -> Location {
        let city = self
            .city
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| default_city.to_string());
        Location::resolve(Some(city), self.lat, self.lon)
    }

    fn profile(&self) -> HealthProfile {
        let conditions = self
            .conditions
            .as_deref()
            .map(HealthProfile::parse_conditions)
            .unwrap_or_default();
        HealthProfile::new(self.age, conditions)
    }
}

/// Build an environment report from live weather.
///
/// # Errors
///
/// Returns [`AppError::Weather`] if no weather source is configured or the
/// lookup fails.
async fn get_metrics(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MetricsQuery>,
) -> Result<Json<EnvironmentReport>, AppError> {
    let source = state.weather.as_ref().ok_or(CoreError::MissingApiKey)?;
    let location = query.location(&state.config.weather.default_city);

    let weather = source.current(&location).await?;

    let report = ReportBuilder::new().profile(query.profile()).build(
        &weather,
        NoiseExposure::new(query.noise_db, query.noise_minutes),
        query.aqi,
    );
    Ok(Json(report))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    Weather(CoreError),
}

impl From<CoreError> for AppError {
    fn from(e: CoreError) -> Self {
        AppError::Weather(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = match self {
            AppError::Weather(e) => {
                warn!(code = e.code(), "weather lookup failed: {}", e);
                serde_json::json!({
                    "error": e.code(),
                    "details": e.to_string(),
                })
            }
        };

        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
