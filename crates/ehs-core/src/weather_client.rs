//! HTTP client for the OpenWeather current-weather API.
//!
//! # Example
//!
//! ```no_run
//! use ehs_core::weather::Location;
//! use ehs_core::weather_client::{WeatherClient, WeatherSource};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = WeatherClient::from_env()?;
//! let obs = client.current(&Location::City("Pune".into())).await?;
//! println!("{} °C, {} hPa", obs.temperature, obs.pressure);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::info;

use crate::error::{Error, Result};
use crate::retry::{RetryConfig, with_retry};
use crate::weather::{Location, WeatherObservation, error_message, parse_response};

/// OpenWeather current-weather endpoint.
pub const OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(6);

/// Anything that can report the current weather at a location.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Current weather at `location`.
    async fn current(&self, location: &Location) -> Result<WeatherObservation>;
}

/// A weather source that always returns the same observation.
///
/// Used for manual readings and in tests.
#[derive(Debug, Clone)]
pub struct StaticWeather {
    observation: WeatherObservation,
}

impl StaticWeather {
    pub fn new(observation: WeatherObservation) -> Self {
        Self { observation }
    }
}

#[async_trait]
impl WeatherSource for StaticWeather {
    async fn current(&self, location: &Location) -> Result<WeatherObservation> {
        location.validate()?;
        let mut obs = self.observation.clone();
        match location {
            Location::City(city) => obs.city = Some(city.clone()),
            Location::Coordinates { lat, lon } => {
                obs.lat = Some(*lat);
                obs.lon = Some(*lon);
            }
        }
        Ok(obs)
    }
}

/// HTTP client for OpenWeather.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
    retry: RetryConfig,
    timeout: Duration,
}

impl WeatherClient {
    /// Create a client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_timeout(api_key, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom per-request timeout.
    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::MissingApiKey);
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: OPENWEATHER_URL.to_string(),
            retry: RetryConfig::for_weather(),
            timeout,
        })
    }

    /// Create a client using the key in `OPENWEATHER_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let key = std::env::var(API_KEY_ENV).map_err(|_| Error::MissingApiKey)?;
        Self::new(key)
    }

    /// Use a different endpoint URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Use a different retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// The endpoint URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current weather by city name.
    pub async fn by_city(&self, city: &str) -> Result<WeatherObservation> {
        self.fetch(&Location::City(city.to_string())).await
    }

    /// Current weather by coordinates.
    pub async fn by_coords(&self, lat: f64, lon: f64) -> Result<WeatherObservation> {
        self.fetch(&Location::Coordinates { lat, lon }).await
    }

    async fn fetch(&self, location: &Location) -> Result<WeatherObservation> {
        location.validate()?;
        info!(?location, "requesting current weather");

        let mut params = location.query();
        params.push(("appid", self.api_key.clone()));
        params.push(("units", "metric".to_string()));

        let client = &self.client;
        let url = self.base_url.as_str();
        let params = &params;
        let timeout = self.timeout;

        let (status, body) = with_retry(&self.retry, "weather lookup", || async move {
            let response = client
                .get(url)
                .query(params)
                .send()
                .await
                .map_err(|e| transport_error(e, timeout))?;
            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| transport_error(e, timeout))?;
            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(Error::Api {
                    status: status.as_u16(),
                    message: error_message(&body).unwrap_or_else(|| "rate limited".to_string()),
                });
            }
            Ok((status, body))
        })
        .await?;

        if !status.is_success() {
            let message = error_message(&body)
                .unwrap_or_else(|| "OpenWeather returned error".to_string());
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        parse_response(&body, location)
    }
}

/// Classify a transport failure. The URL is dropped because its query
/// carries the API key.
fn transport_error(err: reqwest::Error, timeout: Duration) -> Error {
    if err.is_timeout() {
        Error::Timeout {
            operation: "weather lookup".to_string(),
            duration: timeout,
        }
    } else if err.is_connect() || err.is_request() {
        Error::Network(err.without_url().to_string())
    } else {
        Error::Http(err.without_url())
    }
}

#[async_trait]
impl WeatherSource for WeatherClient {
    async fn current(&self, location: &Location) -> Result<WeatherObservation> {
        self.fetch(location).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_key_rejected() {
        assert!(matches!(WeatherClient::new(""), Err(Error::MissingApiKey)));
        assert!(matches!(WeatherClient::new("   "), Err(Error::MissingApiKey)));
    }

    #[test]
    fn test_base_url_override() {
        let client = WeatherClient::new("key")
            .unwrap()
            .with_base_url("http://127.0.0.1:9/weather");
        assert_eq!(client.base_url(), "http://127.0.0.1:9/weather");
    }

    #[tokio::test]
    async fn test_invalid_location_fails_before_request() {
        let client = WeatherClient::new("key").unwrap();
        let err = client.by_city("").await.unwrap_err();
        assert!(matches!(err, Error::InvalidCity));

        let err = client.by_coords(200.0, 0.0).await.unwrap_err();
        assert!(matches!(err, Error::InvalidCoordinates { .. }));
    }

    #[tokio::test]
    async fn test_refused_connection_is_network_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = WeatherClient::new("secret-key")
            .unwrap()
            .with_base_url(format!("http://127.0.0.1:{port}/weather"))
            .with_retry(RetryConfig::for_weather().max_retries(0));

        let err = client.by_city("Pune").await.unwrap_err();
        assert!(matches!(err, Error::Network(_)), "got {err:?}");
        assert_eq!(err.code(), "network_error");
        assert!(!err.to_string().contains("secret-key"));
    }

    #[tokio::test]
    async fn test_slow_server_is_timeout() {
        // Accepts connections but never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let client = WeatherClient::with_timeout("key", Duration::from_millis(200))
            .unwrap()
            .with_base_url(format!("http://127.0.0.1:{port}/weather"))
            .with_retry(RetryConfig::for_weather().max_retries(0));

        let err = client.by_city("Pune").await.unwrap_err();
        match err {
            Error::Timeout { duration, .. } => assert_eq!(duration, Duration::from_millis(200)),
            other => panic!("expected timeout, got {other:?}"),
        }
        drop(listener);
    }

    #[tokio::test]
    async fn test_static_weather_applies_location() {
        let source = StaticWeather::new(WeatherObservation::new(25.0, 40.0, 1000.0));

        let obs = source.current(&Location::City("Leh".into())).await.unwrap();
        assert_eq!(obs.city.as_deref(), Some("Leh"));

        let obs = source
            .current(&Location::Coordinates { lat: 34.1, lon: 77.5 })
            .await
            .unwrap();
        assert_eq!(obs.lat, Some(34.1));
        assert_eq!(obs.pressure, 1000.0);
    }
}
