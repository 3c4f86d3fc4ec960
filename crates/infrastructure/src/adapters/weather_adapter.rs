//! Weather adapter - Implements WeatherPort using integration_weather

use application::error::ApplicationError;
use application::ports::WeatherPort;
use async_trait::async_trait;
use domain::DomainError;
use domain::entities::{TemperatureReading, WeatherSummary};
use domain::value_objects::{GeoLocation, Temperature};
use integration_weather::{
    CurrentConditions, OpenWeatherMapClient, WeatherClient, WeatherConfig, WeatherError,
};
use tracing::{debug, instrument};

/// Adapter for the OpenWeatherMap current weather API
pub struct WeatherAdapter<C = OpenWeatherMapClient> {
    client: C,
}

impl<C> std::fmt::Debug for WeatherAdapter<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherAdapter")
            .field("client", &std::any::type_name::<C>())
            .finish()
    }
}

impl WeatherAdapter {
    /// Create an adapter backed by the OpenWeatherMap HTTP client
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` if the API key is missing or
    /// the HTTP client fails to initialize.
    pub fn new(config: WeatherConfig) -> Result<Self, ApplicationError> {
        let client = OpenWeatherMapClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self { client })
    }
}

impl<C: WeatherClient> WeatherAdapter<C> {
    /// Wrap an existing client
    pub const fn with_client(client: C) -> Self {
        Self { client }
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError, location: &GeoLocation) -> ApplicationError {
        match err {
            WeatherError::ParseError(e) => ApplicationError::FetchDecode(e),
            WeatherError::InvalidCoordinates => {
                ApplicationError::Domain(DomainError::InvalidCoordinates(location.to_string()))
            },
            other @ (WeatherError::ConnectionFailed(_)
            | WeatherError::RequestFailed(_)
            | WeatherError::Unauthorized(_)
            | WeatherError::ServiceUnavailable(_)
            | WeatherError::RateLimitExceeded) => ApplicationError::FetchTransport(other.to_string()),
        }
    }

    /// Convert parsed conditions into a Kelvin reading
    fn to_reading(current: &CurrentConditions) -> Result<TemperatureReading, ApplicationError> {
        let temperature = Temperature::kelvin(current.temperature_kelvin)
            .map_err(|e| ApplicationError::FetchDecode(e.to_string()))?;
        let summary = current
            .primary_condition()
            .map(|c| WeatherSummary::new(c.main.clone(), c.description.clone()));

        let reading = TemperatureReading::new(temperature, summary);
        Ok(match current.observed_at {
            Some(observed_at) => reading.with_fetched_at(observed_at),
            None => reading,
        })
    }
}

#[async_trait]
impl<C: WeatherClient> WeatherPort for WeatherAdapter<C> {
    #[instrument(skip(self), fields(lat = location.latitude(), lon = location.longitude()))]
    async fn fetch_temperature(
        &self,
        location: &GeoLocation,
    ) -> Result<TemperatureReading, ApplicationError> {
        let current = self
            .client
            .get_current(location.latitude(), location.longitude())
            .await
            .map_err(|e| {
                debug!(error = %e, "Failed to get current weather");
                Self::map_error(e, location)
            })?;

        let reading = Self::to_reading(&current)?;
        debug!(
            temperature = %reading.temperature,
            station = ?current.station,
            "Retrieved current temperature"
        );
        Ok(reading)
    }
}
