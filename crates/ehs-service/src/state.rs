//! Application state shared across handlers.

use std::sync::Arc;

use tracing::{info, warn};

use ehs_core::weather_client::API_KEY_ENV;
use ehs_core::{RetryConfig, WeatherClient, WeatherSource};

use crate::config::Config;

/// Shared application state.
pub struct AppState {
    /// Configuration.
    pub config: Config,
    /// Where weather comes from. `None` when no API key is configured;
    /// weather-backed endpoints then fail with `missing_api_key`.
    pub weather: Option<Arc<dyn WeatherSource>>,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: Config, weather: Option<Arc<dyn WeatherSource>>) -> Arc<Self> {
        Arc::new(Self { config, weather })
    }

    /// Create state with an OpenWeather client built from `config`.
    ///
    /// The key comes from `weather.api_key` or, failing that, the
    /// `OPENWEATHER_API_KEY` environment variable.
    pub fn from_config(config: Config) -> ehs_core::Result<Arc<Self>> {
        let key = config
            .weather
            .api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|k| !k.trim().is_empty());

        let weather: Option<Arc<dyn WeatherSource>> = match key {
            Some(key) => {
                let retry = RetryConfig::for_weather().max_retries(config.weather.max_retries);
                let client =
                    WeatherClient::with_timeout(key, config.weather.timeout())?.with_retry(retry);
                info!("Weather lookups enabled");
                Some(Arc::new(client))
            }
            None => {
                warn!(
                    "No OpenWeather API key configured (set weather.api_key or {}); /api/metrics will fail",
                    API_KEY_ENV
                );
                None
            }
        };

        Ok(Self::new(config, weather))
    }
}
