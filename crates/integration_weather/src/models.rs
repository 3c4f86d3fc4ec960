//! Weather data models
//!
//! Wire types for the OpenWeatherMap `/weather` response and the parsed
//! result handed to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the response's `weather` array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Condition group keyword (e.g. "Clouds")
    pub main: String,
    /// Human-readable description (e.g. "scattered clouds")
    pub description: String,
}

/// Parsed current conditions at a coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Air temperature in Kelvin
    pub temperature_kelvin: f64,
    /// Reported weather conditions, most significant first
    pub conditions: Vec<Condition>,
    /// Name of the nearest station or city, if reported
    pub station: Option<String>,
    /// Observation time, if reported
    pub observed_at: Option<DateTime<Utc>>,
}

impl CurrentConditions {
    /// The first (primary) condition, if any
    #[must_use]
    pub fn primary_condition(&self) -> Option<&Condition> {
        self.conditions.first()
    }
}

/// Raw `/weather` response. Only the fields we use are declared.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse {
    pub main: MainData,
    pub weather: Vec<Condition>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub dt: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MainData {
    pub temp: f64,
}

/// Error body returned alongside non-success statuses
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl From<ApiResponse> for CurrentConditions {
    fn from(response: ApiResponse) -> Self {
        Self {
            temperature_kelvin: response.main.temp,
            conditions: response.weather,
            station: response.name.filter(|n| !n.is_empty()),
            observed_at: response.dt.and_then(|ts| DateTime::from_timestamp(ts, 0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_response() {
        let json = r#"{"main":{"temp":290.15},"weather":[]}"#;
        let response: ApiResponse = serde_json::from_str(json).unwrap();
        let current = CurrentConditions::from(response);

        assert!((current.temperature_kelvin - 290.15).abs() < f64::EPSILON);
        assert!(current.primary_condition().is_none());
        assert!(current.station.is_none());
        assert!(current.observed_at.is_none());
    }

    #[test]
    fn parses_full_response_and_ignores_unknown_fields() {
        let json = r#"{
            "coord": {"lon": 13.41, "lat": 52.52},
            "weather": [
                {"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"},
                {"id": 701, "main": "Mist", "description": "mist", "icon": "50d"}
            ],
            "main": {"temp": 282.55, "feels_like": 281.86, "pressure": 1023, "humidity": 100},
            "dt": 1560350645,
            "name": "Berlin",
            "cod": 200
        }"#;
        let response: ApiResponse = serde_json::from_str(json).unwrap();
        let current = CurrentConditions::from(response);

        assert_eq!(current.conditions.len(), 2);
        let primary = current.primary_condition().unwrap();
        assert_eq!(primary.main, "Clouds");
        assert_eq!(primary.description, "broken clouds");
        assert_eq!(current.station.as_deref(), Some("Berlin"));
        assert_eq!(current.observed_at.unwrap().timestamp(), 1_560_350_645);
    }

    #[test]
    fn missing_main_is_rejected() {
        let json = r#"{"weather":[]}"#;
        assert!(serde_json::from_str::<ApiResponse>(json).is_err());
    }

    #[test]
    fn missing_weather_list_is_rejected() {
        let json = r#"{"main":{"temp":280.0}}"#;
        assert!(serde_json::from_str::<ApiResponse>(json).is_err());
    }

    #[test]
    fn empty_station_name_is_dropped() {
        let json = r#"{"main":{"temp":280.0},"weather":[],"name":""}"#;
        let response: ApiResponse = serde_json::from_str(json).unwrap();
        assert!(CurrentConditions::from(response).station.is_none());
    }

    #[test]
    fn error_body_message() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"cod":401,"message":"Invalid API key"}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("Invalid API key"));
    }
}
