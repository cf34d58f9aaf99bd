//! Weather observations and OpenWeather response parsing.
//!
//! Parsing is always available. The HTTP client lives in
//! [`crate::weather_client`] behind the `weather-client` feature.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// City used when no location is given.
pub const DEFAULT_CITY: &str = "Pune";

/// Current weather at one location, in metric units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// City name, if known.
    pub city: Option<String>,
    /// Air temperature in °C.
    pub temperature: f64,
    /// Relative humidity in percent.
    pub humidity: f64,
    /// Station pressure in hPa.
    pub pressure: f64,
    /// Latitude, if known.
    pub lat: Option<f64>,
    /// Longitude, if known.
    pub lon: Option<f64>,
}

impl WeatherObservation {
    /// Create an observation from manual values.
    pub fn new(temperature: f64, humidity: f64, pressure: f64) -> Self {
        Self {
            city: None,
            temperature,
            humidity,
            pressure,
            lat: None,
            lon: None,
        }
    }

    /// Set the city name.
    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }
}

/// Where to look up the weather.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    City(String),
    Coordinates { lat: f64, lon: f64 },
}

impl Default for Location {
    fn default() -> Self {
        Location::City(DEFAULT_CITY.to_string())
    }
}

impl Location {
    /// Coordinates when both are given, otherwise the city, otherwise the
    /// default city.
    pub fn resolve(city: Option<String>, lat: Option<f64>, lon: Option<f64>) -> Self {
        match (lat, lon) {
            (Some(lat), Some(lon)) => Location::Coordinates { lat, lon },
            _ => city.map(Location::City).unwrap_or_default(),
        }
    }

    /// Check the location before sending a request.
    pub fn validate(&self) -> Result<()> {
        match self {
            Location::City(city) if city.trim().is_empty() => Err(Error::InvalidCity),
            Location::City(_) => Ok(()),
            Location::Coordinates { lat, lon } => {
                let lat_ok = lat.is_finite() && (-90.0..=90.0).contains(lat);
                let lon_ok = lon.is_finite() && (-180.0..=180.0).contains(lon);
                if lat_ok && lon_ok {
                    Ok(())
                } else {
                    Err(Error::InvalidCoordinates {
                        lat: *lat,
                        lon: *lon,
                    })
                }
            }
        }
    }

    /// Query parameters identifying this location.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Location::City(city) => vec![("q", city.clone())],
            Location::Coordinates { lat, lon } => {
                vec![("lat", lat.to_string()), ("lon", lon.to_string())]
            }
        }
    }
}

/// Accept JSON numbers and numeric strings.
fn as_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn format_field(value: Option<f64>) -> String {
    value.map_or_else(|| "None".to_string(), |v| v.to_string())
}

/// Normalize an OpenWeather current-weather response.
///
/// Coordinates in the response take precedence over the requested ones;
/// the requested city name takes precedence over the one in the response.
pub fn parse_response(body: &str, location: &Location) -> Result<WeatherObservation> {
    let raw: Value = serde_json::from_str(body)?;
    let Value::Object(raw) = raw else {
        return Err(Error::InvalidResponse(
            "weather API returned a non-object body".to_string(),
        ));
    };

    let main = match raw.get("main") {
        Some(Value::Object(main)) if !main.is_empty() => main,
        _ => return Err(Error::MissingMain),
    };

    let temperature = as_number(main.get("temp"));
    let humidity = as_number(main.get("humidity"));
    let pressure = as_number(main.get("pressure"));

    let (Some(temperature), Some(humidity), Some(pressure)) = (temperature, humidity, pressure)
    else {
        return Err(Error::IncompleteData(format!(
            "temp={},hum={},pres={}",
            format_field(temperature),
            format_field(humidity),
            format_field(pressure)
        )));
    };

    let coord = raw.get("coord");
    let (req_city, req_lat, req_lon) = match location {
        Location::City(city) => (Some(city.clone()), None, None),
        Location::Coordinates { lat, lon } => (None, Some(*lat), Some(*lon)),
    };

    Ok(WeatherObservation {
        city: req_city.or_else(|| raw.get("name").and_then(Value::as_str).map(String::from)),
        temperature,
        humidity,
        pressure,
        lat: as_number(coord.and_then(|c| c.get("lat"))).or(req_lat),
        lon: as_number(coord.and_then(|c| c.get("lon"))).or(req_lon),
    })
}

/// Extract the `message` field from an error response, if any.
pub fn error_message(body: &str) -> Option<String> {
    let raw: Value = serde_json::from_str(body).ok()?;
    raw.get("message").and_then(Value::as_str).map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "coord": {"lon": 73.8553, "lat": 18.5196},
        "main": {"temp": 31.2, "humidity": 48, "pressure": 1009},
        "name": "Pune"
    }"#;

    #[test]
    fn test_parse_city_response() {
        let obs = parse_response(SAMPLE, &Location::City("pune".into())).unwrap();
        assert_eq!(obs.city.as_deref(), Some("pune"));
        assert_eq!(obs.temperature, 31.2);
        assert_eq!(obs.humidity, 48.0);
        assert_eq!(obs.pressure, 1009.0);
        assert_eq!(obs.lat, Some(18.5196));
        assert_eq!(obs.lon, Some(73.8553));
    }

    #[test]
    fn test_parse_coordinate_response_uses_response_name() {
        let location = Location::Coordinates {
            lat: 18.5,
            lon: 73.8,
        };
        let obs = parse_response(SAMPLE, &location).unwrap();
        assert_eq!(obs.city.as_deref(), Some("Pune"));
        assert_eq!(obs.lat, Some(18.5196));
    }

    #[test]
    fn test_parse_falls_back_to_requested_coordinates() {
        let body = r#"{"main": {"temp": "20.5", "humidity": "60", "pressure": 1000}}"#;
        let location = Location::Coordinates { lat: 1.0, lon: 2.0 };
        let obs = parse_response(body, &location).unwrap();
        assert_eq!(obs.temperature, 20.5);
        assert_eq!(obs.humidity, 60.0);
        assert_eq!(obs.lat, Some(1.0));
        assert_eq!(obs.lon, Some(2.0));
        assert_eq!(obs.city, None);
    }

    #[test]
    fn test_parse_missing_main() {
        let err = parse_response(r#"{"name": "x"}"#, &Location::default()).unwrap_err();
        assert!(matches!(err, Error::MissingMain));

        let err = parse_response(r#"{"main": {}}"#, &Location::default()).unwrap_err();
        assert!(matches!(err, Error::MissingMain));
    }

    #[test]
    fn test_parse_incomplete_data() {
        let body = r#"{"main": {"temp": 20.0, "pressure": 1000}}"#;
        let err = parse_response(body, &Location::default()).unwrap_err();
        match err {
            Error::IncompleteData(details) => {
                assert_eq!(details, "temp=20,hum=None,pres=1000");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_invalid_bodies() {
        assert!(matches!(
            parse_response("not json", &Location::default()),
            Err(Error::InvalidJson(_))
        ));
        assert!(matches!(
            parse_response("[1, 2]", &Location::default()),
            Err(Error::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_location_resolve() {
        assert_eq!(Location::resolve(None, None, None), Location::City("Pune".into()));
        assert_eq!(
            Location::resolve(Some("Delhi".into()), Some(1.0), None),
            Location::City("Delhi".into())
        );
        assert_eq!(
            Location::resolve(Some("Delhi".into()), Some(1.0), Some(2.0)),
            Location::Coordinates { lat: 1.0, lon: 2.0 }
        );
    }

    #[test]
    fn test_location_validate() {
        assert!(Location::City("Pune".into()).validate().is_ok());
        assert!(matches!(
            Location::City("  ".into()).validate(),
            Err(Error::InvalidCity)
        ));
        assert!(matches!(
            Location::Coordinates { lat: 95.0, lon: 0.0 }.validate(),
            Err(Error::InvalidCoordinates { .. })
        ));
        assert!(
            Location::Coordinates {
                lat: f64::NAN,
                lon: 0.0
            }
            .validate()
            .is_err()
        );
    }

    #[test]
    fn test_location_query() {
        assert_eq!(
            Location::Coordinates { lat: 1.5, lon: -2.0 }.query(),
            vec![("lat", "1.5".to_string()), ("lon", "-2".to_string())]
        );
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(r#"{"cod": "404", "message": "city not found"}"#).as_deref(),
            Some("city not found")
        );
        assert_eq!(error_message("oops"), None);
    }
}
