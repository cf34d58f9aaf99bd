//! Error types for ehs-core.
//!
//! The evaluator, the display writer, and the exposure calculations never
//! fail: missing or malformed inputs fall through to a default result. The
//! errors here come from the weather lookup that feeds the environment
//! report.
//!
//! # Error Recovery Strategies
//!
//! | Error Type | Strategy | Rationale |
//! |------------|----------|-----------|
//! | [`Error::Timeout`] | Retry with backoff | Transient network congestion |
//! | [`Error::Network`] | Retry with backoff | Connection may recover |
//! | [`Error::Api`] with status 429 | Retry with backoff | Rate limited |
//! | [`Error::Api`] (other) | Do not retry | Bad key, unknown city, ... |
//! | [`Error::MissingApiKey`] | Do not retry | Fix configuration |
//! | [`Error::InvalidCity`] / [`Error::InvalidCoordinates`] | Do not retry | Fix the request |
//! | [`Error::InvalidJson`] / [`Error::InvalidResponse`] | Do not retry | Upstream format problem |
//! | [`Error::MissingMain`] / [`Error::IncompleteData`] | Do not retry | Upstream format problem |

use std::time::Duration;

use thiserror::Error;

/// HTTP status the weather API uses for rate limiting.
pub const STATUS_TOO_MANY_REQUESTS: u16 = 429;

/// Errors that can occur while looking up weather data.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// No API key was configured.
    #[error("Missing API key: set OPENWEATHER_API_KEY or configure weather.api_key")]
    MissingApiKey,

    /// The city name was empty.
    #[error("Invalid city: city name is empty")]
    InvalidCity,

    /// Latitude or longitude is out of range or not a number.
    #[error("Invalid coordinates: lat={lat}, lon={lon}")]
    InvalidCoordinates { lat: f64, lon: f64 },

    /// The request did not complete in time.
    #[error("Operation '{operation}' timed out after {duration:?}")]
    Timeout {
        operation: String,
        duration: Duration,
    },

    /// The weather API could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP client error.
    #[cfg(feature = "weather-client")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The response was JSON but not the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The weather API answered with a non-success status.
    #[error("API error: {message} (status {status})")]
    Api { status: u16, message: String },

    /// The response had no `main` block.
    #[error("Weather response is missing the 'main' block")]
    MissingMain,

    /// Temperature, humidity, or pressure was missing.
    #[error("Incomplete weather data: {0}")]
    IncompleteData(String),
}

impl Error {
    /// Short machine-readable code for this error, used in API responses.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Error::MissingApiKey => "missing_api_key",
            Error::InvalidCity => "invalid_city",
            Error::InvalidCoordinates { .. } => "invalid_coords",
            Error::Timeout { .. } | Error::Network(_) => "network_error",
            #[cfg(feature = "weather-client")]
            Error::Http(_) => "network_error",
            Error::InvalidJson(_) => "invalid_json",
            Error::InvalidResponse(_) => "invalid_response",
            Error::Api { .. } => "api_error",
            Error::MissingMain => "missing_main",
            Error::IncompleteData(_) => "incomplete_weather_data",
        }
    }

    /// Whether retrying the same request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Timeout { .. } => true,
            Error::Network(_) => true,
            #[cfg(feature = "weather-client")]
            Error::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Error::Api { status, .. } => *status == STATUS_TOO_MANY_REQUESTS,
            Error::MissingApiKey
            | Error::InvalidCity
            | Error::InvalidCoordinates { .. }
            | Error::InvalidJson(_)
            | Error::InvalidResponse(_)
            | Error::MissingMain
            | Error::IncompleteData(_) => false,
        }
    }
}

/// Result type alias using ehs-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::MissingApiKey.code(), "missing_api_key");
        assert_eq!(Error::MissingMain.code(), "missing_main");
        assert_eq!(
            Error::IncompleteData("temp=None".into()).code(),
            "incomplete_weather_data"
        );
        assert_eq!(Error::Network("refused".into()).code(), "network_error");
    }

    #[test]
    fn test_retryable_classification() {
        assert!(
            Error::Timeout {
                operation: "weather".into(),
                duration: Duration::from_secs(6),
            }
            .is_retryable()
        );
        assert!(Error::Network("reset".into()).is_retryable());
        assert!(
            Error::Api {
                status: 429,
                message: "slow down".into()
            }
            .is_retryable()
        );
        assert!(
            !Error::Api {
                status: 401,
                message: "Invalid API key".into()
            }
            .is_retryable()
        );
        assert!(!Error::MissingApiKey.is_retryable());
        assert!(!Error::InvalidCity.is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = Error::Api {
            status: 404,
            message: "city not found".into(),
        };
        assert_eq!(err.to_string(), "API error: city not found (status 404)");

        let err = Error::InvalidCoordinates {
            lat: 91.0,
            lon: 0.0,
        };
        assert!(err.to_string().contains("lat=91"));
    }
}
