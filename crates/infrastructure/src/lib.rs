//! Infrastructure layer - Adapters for external systems
//!
//! Implements the ports defined in the application layer on top of the
//! weather and geolocation integrations, and owns configuration loading and
//! logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AppConfig, LocationConfig, LocationProvider, LoggingConfig, RefreshConfig, WeatherAppConfig,
};
pub use telemetry::{TelemetryError, init_logging};
