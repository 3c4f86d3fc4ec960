//! ip-api.com client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{ApiResponse, IpLocation};

/// Fields requested from ip-api.com
const RESPONSE_FIELDS: &str = "status,message,lat,lon,city,country";

/// Geolocation client errors
#[derive(Debug, Error)]
pub enum GeoIpError {
    /// Connection to the lookup service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the lookup service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from the lookup service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The service could not resolve a location for this host
    #[error("Lookup failed: {0}")]
    LookupFailed(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Geolocation service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoIpConfig {
    /// Service base URL (default: <http://ip-api.com>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://ip-api.com".to_string()
}

const fn default_timeout() -> u64 {
    10
}

impl Default for GeoIpConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Client resolving the host's public location
#[async_trait]
pub trait GeoIpClient: Send + Sync {
    /// Look up the location of the caller's public IP address
    async fn lookup(&self) -> Result<IpLocation, GeoIpError>;
}

/// ip-api.com HTTP client implementation
#[derive(Debug)]
pub struct IpApiClient {
    client: Client,
    config: GeoIpConfig,
}

impl IpApiClient {
    /// Create a new client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: GeoIpConfig) -> Result<Self, GeoIpError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeoIpError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn lookup_url(&self) -> String {
        format!("{}/json/", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl GeoIpClient for IpApiClient {
    #[instrument(skip(self))]
    async fn lookup(&self) -> Result<IpLocation, GeoIpError> {
        let url = self.lookup_url();
        debug!(url = %url, "Looking up public IP location");

        let response = self
            .client
            .get(&url)
            .query(&[("fields", RESPONSE_FIELDS)])
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    GeoIpError::ConnectionFailed(e.to_string())
                } else {
                    GeoIpError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeoIpError::RateLimitExceeded);
        }
        if !status.is_success() {
            return Err(GeoIpError::RequestFailed(format!("HTTP {status}")));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| GeoIpError::ParseError(e.to_string()))?;

        if !api_response.is_success() {
            let message = api_response
                .message
                .unwrap_or_else(|| "unknown reason".to_string());
            return Err(GeoIpError::LookupFailed(message));
        }

        let (Some(latitude), Some(longitude)) = (api_response.lat, api_response.lon) else {
            return Err(GeoIpError::ParseError(
                "successful response without coordinates".to_string(),
            ));
        };

        debug!(
            city = ?api_response.city,
            country = ?api_response.country,
            "Resolved public IP location"
        );

        Ok(IpLocation {
            latitude,
            longitude,
            city: api_response.city,
            country: api_response.country,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = GeoIpConfig::default();
        assert_eq!(config.base_url, "http://ip-api.com");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_config_deserialize_with_defaults() {
        let config: GeoIpConfig =
            serde_json::from_str(r#"{"base_url":"http://localhost:9000"}"#).unwrap();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_lookup_url() {
        let client = IpApiClient::new(GeoIpConfig {
            base_url: "http://localhost:9000/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.lookup_url(), "http://localhost:9000/json/");
    }

    #[test]
    fn test_error_display() {
        let err = GeoIpError::LookupFailed("reserved range".to_string());
        assert_eq!(err.to_string(), "Lookup failed: reserved range");
    }
}
