//! Weather summary attached to a temperature reading

use serde::{Deserialize, Serialize};
use std::fmt;

/// Condition keyword plus a human-readable description
///
/// Mirrors one entry of the weather API's condition list, e.g.
/// `("Clouds", "broken clouds")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherSummary {
    /// Condition group keyword (e.g. "Rain", "Clear")
    pub condition: String,
    /// Human-readable description (e.g. "light rain")
    pub description: String,
}

impl WeatherSummary {
    /// Create a new weather summary
    #[must_use]
    pub fn new(condition: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            description: description.into(),
        }
    }
}

impl fmt::Display for WeatherSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.description.is_empty() {
            write!(f, "{}", self.condition)
        } else {
            write!(f, "{} ({})", self.condition, self.description)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_description() {
        let summary = WeatherSummary::new("Clouds", "broken clouds");
        assert_eq!(summary.to_string(), "Clouds (broken clouds)");
    }

    #[test]
    fn display_without_description() {
        let summary = WeatherSummary::new("Clear", "");
        assert_eq!(summary.to_string(), "Clear");
    }
}
