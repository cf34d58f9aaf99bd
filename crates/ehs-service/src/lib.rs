//! HTTP REST API for environmental safety recommendations.
//!
//! # REST API Endpoints
//!
//! - `GET /api/health` - Service health check
//! - `GET /api/recommendation` - Evaluate noise, oxygen, and air quality readings
//! - `GET /api/metrics` - Environment report from live weather and a health profile
//!
//! # Configuration
//!
//! The service reads configuration from `~/.config/ehs/server.toml`:
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:8080"
//!
//! [weather]
//! # Falls back to the OPENWEATHER_API_KEY environment variable
//! api_key = "your-openweather-key"
//! default_city = "Pune"
//! timeout_secs = 6
//! max_retries = 2
//! ```

pub mod api;
pub mod config;
pub mod state;

pub use config::{Config, ConfigError, ServerConfig, ValidationError, WeatherConfig};
pub use state::AppState;
