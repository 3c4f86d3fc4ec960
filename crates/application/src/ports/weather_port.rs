//! Weather service port
//!
//! Defines the interface for fetching the current temperature at a
//! coordinate.

use async_trait::async_trait;
use domain::entities::TemperatureReading;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for weather lookups
///
/// Implementations perform exactly one live request per call: no retries
/// and no response caching.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Fetch the current temperature (and first weather condition) at a location
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::FetchTransport` for network failures and
    /// non-success responses, and `ApplicationError::FetchDecode` when the
    /// response body has an unexpected shape.
    async fn fetch_temperature(
        &self,
        location: &GeoLocation,
    ) -> Result<TemperatureReading, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn WeatherPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn WeatherPort>();
    }
}
