//! Server configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use ehs_core::DEFAULT_CITY;

/// Server configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server settings.
    pub server: ServerConfig,
    /// Weather lookup settings.
    pub weather: WeatherConfig,
}

impl Config {
    /// Load configuration from the default path.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = default_config_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Read {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.as_ref().to_path_buf(),
            source: e,
        })
    }

    /// Validate the configuration and return any errors.
    ///
    /// This checks:
    /// - Server bind address is valid (host:port format)
    /// - Default city is not blank
    /// - Timeout and retry counts are within bounds
    ///
    /// # Example
    ///
    /// ```
    /// use ehs_service::Config;
    ///
    /// let config = Config::default();
    /// config.validate().expect("Default config should be valid");
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.server.validate());
        errors.extend(self.weather.validate());

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

impl ServerConfig {
    /// Validate server configuration.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.bind.is_empty() {
            errors.push(ValidationError::new(
                "server.bind",
                "bind address cannot be empty",
            ));
            return errors;
        }

        match self.bind.rsplit_once(':') {
            None => errors.push(ValidationError::new(
                "server.bind",
                format!(
                    "invalid bind address '{}': expected format 'host:port'",
                    self.bind
                ),
            )),
            Some((_, port)) => match port.parse::<u16>() {
                Ok(0) => errors.push(ValidationError::new("server.bind", "port cannot be 0")),
                Err(_) => errors.push(ValidationError::new(
                    "server.bind",
                    format!("invalid port '{}': must be a number 1-65535", port),
                )),
                Ok(_) => {}
            },
        }

        errors
    }
}

/// Maximum request timeout in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 60;
/// Maximum number of retries for a weather lookup.
pub const MAX_RETRIES: u32 = 5;

/// Weather lookup configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// OpenWeather API key. Falls back to `OPENWEATHER_API_KEY` when unset.
    pub api_key: Option<String>,
    /// City used when a request names no location.
    pub default_city: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Retries for rate-limited or failed lookups.
    pub max_retries: u32,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_city: DEFAULT_CITY.to_string(),
            timeout_secs: 6,
            max_retries: 2,
        }
    }
}

impl WeatherConfig {
    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate weather configuration.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.default_city.trim().is_empty() {
            errors.push(ValidationError::new(
                "weather.default_city",
                "default city cannot be empty",
            ));
        }

        if let Some(key) = &self.api_key
            && key.trim().is_empty()
        {
            errors.push(ValidationError::new(
                "weather.api_key",
                "api key cannot be empty string (omit it to use OPENWEATHER_API_KEY)",
            ));
        }

        if self.timeout_secs == 0 {
            errors.push(ValidationError::new(
                "weather.timeout_secs",
                "timeout cannot be 0",
            ));
        } else if self.timeout_secs > MAX_TIMEOUT_SECS {
            errors.push(ValidationError::new(
                "weather.timeout_secs",
                format!(
                    "timeout {} is too long (maximum {} seconds)",
                    self.timeout_secs, MAX_TIMEOUT_SECS
                ),
            ));
        }

        if self.max_retries > MAX_RETRIES {
            errors.push(ValidationError::new(
                "weather.max_retries",
                format!(
                    "max retries {} is too high (maximum {})",
                    self.max_retries, MAX_RETRIES
                ),
            ));
        }

        errors
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    Validation(Vec<ValidationError>),
}

/// A single validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The field path (e.g., `server.bind`).
    pub field: String,
    /// Description of the validation failure.
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Default configuration file path.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ehs")
        .join("server.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.weather.default_city, "Pune");
        assert_eq!(config.weather.timeout(), Duration::from_secs(6));
        assert_eq!(config.weather.max_retries, 2);
        assert!(config.weather.api_key.is_none());
    }

    #[test]
    fn test_config_load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("server.toml");
        std::fs::write(
            &config_path,
            r#"
                [server]
                bind = "0.0.0.0:9090"

                [weather]
                api_key = "secret"
                default_city = "Leh"
                timeout_secs = 10
                max_retries = 1
            "#,
        )
        .unwrap();

        let loaded = Config::load(&config_path).unwrap();

        assert_eq!(loaded.server.bind, "0.0.0.0:9090");
        assert_eq!(loaded.weather.api_key.as_deref(), Some("secret"));
        assert_eq!(loaded.weather.default_city, "Leh");
        assert_eq!(loaded.weather.timeout_secs, 10);
        assert_eq!(loaded.weather.max_retries, 1);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml = r#"
            [weather]
            default_city = "Shimla"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.weather.default_city, "Shimla");
        assert_eq!(config.weather.timeout_secs, 6);
    }

    #[test]
    fn test_config_load_nonexistent() {
        let result = Config::load("/nonexistent/path/server.toml");
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_config_load_invalid_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("invalid.toml");
        std::fs::write(&config_path, "this is not valid { toml").unwrap();

        let result = Config::load(&config_path);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_loaded_file_fails_validation() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("bad.toml");
        std::fs::write(
            &config_path,
            "[server]\nbind = \"127.0.0.1:0\"\n[weather]\nmax_retries = 50\n",
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].field, "server.bind");
                assert_eq!(errors[1].field, "weather.max_retries");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_default_config_path() {
        assert!(default_config_path().ends_with("ehs/server.toml"));
    }

    #[test]
    fn test_server_bind_validation() {
        let valid = ServerConfig {
            bind: "[::1]:8080".to_string(),
        };
        assert!(valid.validate().is_empty());

        let empty = ServerConfig {
            bind: String::new(),
        };
        assert!(empty.validate()[0].message.contains("cannot be empty"));

        let no_port = ServerConfig {
            bind: "127.0.0.1".to_string(),
        };
        assert!(no_port.validate()[0].message.contains("host:port"));

        let bad_port = ServerConfig {
            bind: "127.0.0.1:abc".to_string(),
        };
        assert!(bad_port.validate()[0].message.contains("must be a number"));
    }

    #[test]
    fn test_weather_validation() {
        let config = WeatherConfig {
            api_key: Some("  ".to_string()),
            default_city: " ".to_string(),
            timeout_secs: 0,
            max_retries: 0,
        };
        let errors = config.validate();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["weather.default_city", "weather.api_key", "weather.timeout_secs"]
        );

        let slow = WeatherConfig {
            timeout_secs: 120,
            ..Default::default()
        };
        assert!(slow.validate()[0].message.contains("too long"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let error = ConfigError::Validation(vec![
            ValidationError::new("server.bind", "port cannot be 0"),
            ValidationError::new("weather.default_city", "default city cannot be empty"),
        ]);
        let display = format!("{}", error);
        assert!(display.contains("  - server.bind: port cannot be 0"));
        assert!(display.contains("weather.default_city"));
    }
}
