//! Geolocation data models

use serde::{Deserialize, Serialize};

/// Location resolved for the caller's public IP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpLocation {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// City name, if known
    pub city: Option<String>,
    /// Country name, if known
    pub country: Option<String>,
}

/// Raw ip-api.com response
///
/// `lat`/`lon` are absent when `status` is `"fail"`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl ApiResponse {
    /// Whether the lookup succeeded
    pub fn is_success(&self) -> bool {
        self.status.eq_ignore_ascii_case("success")
    }
}
