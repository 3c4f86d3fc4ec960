//! OpenWeatherMap client
//!
//! HTTP client for the OpenWeatherMap current weather endpoint.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{ApiErrorBody, ApiResponse, CurrentConditions};

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid coordinates provided
    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    /// The API key was missing or rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Weather service configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API base URL (default: <https://api.openweathermap.org/data/2.5>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// OpenWeatherMap API key, sent as the `APPID` query parameter
    #[serde(default, skip_serializing)]
    pub api_key: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for WeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Weather client trait for fetching current conditions
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Get current conditions for a coordinate
    async fn get_current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions, WeatherError>;
}

/// OpenWeatherMap HTTP client implementation
///
/// Every call issues one live request. Responses are never cached and the
/// request asks intermediaries not to serve cached copies either.
#[derive(Debug)]
pub struct OpenWeatherMapClient {
    client: Client,
    config: WeatherConfig,
}

impl OpenWeatherMapClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is empty or the HTTP client cannot be
    /// initialized.
    pub fn new(config: WeatherConfig) -> Result<Self, WeatherError> {
        if config.api_key.trim().is_empty() {
            return Err(WeatherError::Unauthorized("API key is not configured".into()));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Validate coordinates
    fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), WeatherError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidCoordinates);
        }
        Ok(())
    }

    /// Endpoint URL without query parameters
    fn weather_url(&self) -> String {
        format!("{}/weather", self.config.base_url.trim_end_matches('/'))
    }

    /// Map a transport-level failure
    fn map_send_error(err: &reqwest::Error) -> WeatherError {
        if err.is_timeout() {
            WeatherError::ConnectionFailed(format!("timed out: {err}"))
        } else if err.is_connect() {
            WeatherError::ConnectionFailed(err.to_string())
        } else {
            WeatherError::RequestFailed(err.to_string())
        }
    }

    /// Map a non-success status, using the API's error message when present
    fn map_status(status: reqwest::StatusCode, body: &[u8]) -> WeatherError {
        let message = serde_json::from_slice::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| format!("HTTP {status}"));

        if status == reqwest::StatusCode::UNAUTHORIZED {
            WeatherError::Unauthorized(message)
        } else if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            WeatherError::RateLimitExceeded
        } else if status.is_server_error() {
            WeatherError::ServiceUnavailable(message)
        } else {
            WeatherError::RequestFailed(message)
        }
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherMapClient {
    #[instrument(skip(self), fields(lat = %latitude, lon = %longitude))]
    async fn get_current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions, WeatherError> {
        Self::validate_coordinates(latitude, longitude)?;

        // The key travels in the query string, so the full URL is never logged.
        debug!(url = %self.weather_url(), "Fetching current weather");

        let response = self
            .client
            .get(self.weather_url())
            .query(&[("lat", latitude), ("lon", longitude)])
            .query(&[("APPID", self.config.api_key.as_str())])
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|e| Self::map_send_error(&e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| WeatherError::RequestFailed(e.to_string()))?;

        if !status.is_success() {
            return Err(Self::map_status(status, &body));
        }

        let api_response: ApiResponse =
            serde_json::from_slice(&body).map_err(|e| WeatherError::ParseError(e.to_string()))?;

        let current = CurrentConditions::from(api_response);
        debug!(
            temperature_kelvin = current.temperature_kelvin,
            conditions = current.conditions.len(),
            "Received current weather"
        );
        Ok(current)
    }
}
