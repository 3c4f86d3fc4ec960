//! Terminal formatting for readings

use domain::entities::TemperatureReading;
use domain::value_objects::TemperatureUnit;

/// One line describing a reading on the requested scale
pub fn format_reading(reading: &TemperatureReading, unit: TemperatureUnit) -> String {
    let temperature = reading.temperature.convert_to(unit);
    let timestamp = reading.fetched_at.format("%Y-%m-%d %H:%M:%S UTC");
    match &reading.summary {
        Some(summary) => format!("[{timestamp}] {temperature}, {summary}"),
        None => format!("[{timestamp}] {temperature}"),
    }
}
