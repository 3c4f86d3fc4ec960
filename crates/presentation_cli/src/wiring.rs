//! Builds the notifier and its adapters from configuration

use std::sync::Arc;

use application::ports::{LocationPort, WeatherPort};
use application::{ApplicationError, TemperatureNotifier};
use infrastructure::{
    AppConfig, GeoIpLocationAdapter, LocationProvider, StaticLocationAdapter, WeatherAdapter,
};
use tracing::info;

/// Construct the location source selected in configuration
pub fn location_port(config: &AppConfig) -> Result<Arc<dyn LocationPort>, ApplicationError> {
    let port: Arc<dyn LocationPort> = match config.location.provider {
        LocationProvider::Static => {
            Arc::new(StaticLocationAdapter::new(config.location.static_location()?))
        },
        LocationProvider::GeoIp => Arc::new(GeoIpLocationAdapter::new(config.location.geoip())?),
    };
    Ok(port)
}

/// Construct the weather port
pub fn weather_port(config: &AppConfig) -> Result<Arc<dyn WeatherPort>, ApplicationError> {
    Ok(Arc::new(WeatherAdapter::new((&config.weather).into())?))
}

/// Construct a stopped notifier wired to the configured adapters
pub fn build_notifier(config: &AppConfig) -> Result<TemperatureNotifier, ApplicationError> {
    let notifier = TemperatureNotifier::with_event_capacity(
        location_port(config)?,
        weather_port(config)?,
        config.refresh.event_capacity,
    );
    info!(
        provider = %config.location.provider,
        interval_secs = config.refresh.interval_secs,
        "Notifier configured"
    );
    Ok(notifier)
}
