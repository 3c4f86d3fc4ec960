//! Temperature reading entity
//!
//! The result of one successful refresh: a temperature, the first weather
//! condition reported alongside it, and when it was fetched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::WeatherSummary;
use crate::value_objects::Temperature;

/// A fetched temperature with optional weather summary
///
/// Equality compares only the temperature (numeric value and unit). The
/// summary and fetch time are informational and do not make two readings
/// different.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemperatureReading {
    /// The measured temperature
    pub temperature: Temperature,
    /// First weather condition reported with the temperature, if any
    pub summary: Option<WeatherSummary>,
    /// When this reading was fetched
    pub fetched_at: DateTime<Utc>,
}

impl TemperatureReading {
    /// Create a reading stamped with the current time
    #[must_use]
    pub fn new(temperature: Temperature, summary: Option<WeatherSummary>) -> Self {
        Self {
            temperature,
            summary,
            fetched_at: Utc::now(),
        }
    }

    /// Override the fetch timestamp
    #[must_use]
    pub fn with_fetched_at(mut self, fetched_at: DateTime<Utc>) -> Self {
        self.fetched_at = fetched_at;
        self
    }
}

impl PartialEq for TemperatureReading {
    fn eq(&self, other: &Self) -> bool {
        self.temperature == other.temperature
    }
}

impl fmt::Display for TemperatureReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.summary {
            Some(summary) => write!(f, "{}, {summary}", self.temperature),
            None => write!(f, "{}", self.temperature),
        }
    }
}
