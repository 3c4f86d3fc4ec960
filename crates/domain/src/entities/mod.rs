//! Domain entities - Observations produced by a refresh cycle

mod temperature_reading;
mod weather_summary;

pub use temperature_reading::TemperatureReading;
pub use weather_summary::WeatherSummary;
