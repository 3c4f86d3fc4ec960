//! Location adapters - Implement LocationPort
//!
//! `StaticLocationAdapter` always answers with a configured coordinate;
//! `GeoIpLocationAdapter` asks an IP geolocation service on every call.

use application::error::ApplicationError;
use application::ports::LocationPort;
use async_trait::async_trait;
use domain::value_objects::GeoLocation;
use integration_geoip::{GeoIpClient, GeoIpConfig, GeoIpError, IpApiClient};
use tracing::{debug, instrument};

/// Location source with a fixed coordinate
#[derive(Debug, Clone, Copy)]
pub struct StaticLocationAdapter {
    location: GeoLocation,
}

impl StaticLocationAdapter {
    /// Create an adapter that always reports `location`
    #[must_use]
    pub const fn new(location: GeoLocation) -> Self {
        Self { location }
    }
}

#[async_trait]
impl LocationPort for StaticLocationAdapter {
    async fn current_location(&self) -> Result<GeoLocation, ApplicationError> {
        Ok(self.location)
    }
}

/// Location source backed by public-IP geolocation
pub struct GeoIpLocationAdapter<C = IpApiClient> {
    client: C,
}

impl<C> std::fmt::Debug for GeoIpLocationAdapter<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoIpLocationAdapter")
            .field("client", &std::any::type_name::<C>())
            .finish()
    }
}

impl GeoIpLocationAdapter {
    /// Create an adapter backed by the ip-api.com client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: GeoIpConfig) -> Result<Self, ApplicationError> {
        let client =
            IpApiClient::new(config).map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self { client })
    }
}

impl<C: GeoIpClient> GeoIpLocationAdapter<C> {
    /// Wrap an existing client
    pub const fn with_client(client: C) -> Self {
        Self { client }
    }
}

fn map_error(err: &GeoIpError) -> ApplicationError {
    ApplicationError::LocationUnavailable(err.to_string())
}

#[async_trait]
impl<C: GeoIpClient> LocationPort for GeoIpLocationAdapter<C> {
    #[instrument(skip(self))]
    async fn current_location(&self) -> Result<GeoLocation, ApplicationError> {
        let resolved = self.client.lookup().await.map_err(|e| {
            debug!(error = %e, "IP geolocation failed");
            map_error(&e)
        })?;

        let location = GeoLocation::new(resolved.latitude, resolved.longitude)
            .map_err(|e| ApplicationError::LocationUnavailable(e.to_string()))?;

        debug!(
            location = %location,
            city = ?resolved.city,
            "Resolved location from public IP"
        );
        Ok(location)
    }
}
