//! Temperature value object
//!
//! A finite numeric value tagged with its scale. Two temperatures are equal
//! only when both the number and the unit match; `290 K` and `16.85 °C` are
//! different values even though they describe the same physical state.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::{Temperature, TemperatureUnit};
//!
//! let t = Temperature::kelvin(291.15).expect("finite value");
//! assert_eq!(t.unit(), TemperatureUnit::Kelvin);
//! assert!((t.to_celsius() - 18.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Offset between the Kelvin and Celsius scales
const KELVIN_OFFSET: f64 = 273.15;

/// Temperature scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    /// Absolute scale used by the weather API
    #[default]
    Kelvin,
    /// Degrees Celsius
    Celsius,
    /// Degrees Fahrenheit
    Fahrenheit,
}

impl TemperatureUnit {
    /// Unit symbol for display
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Kelvin => "K",
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kelvin => write!(f, "kelvin"),
            Self::Celsius => write!(f, "celsius"),
            Self::Fahrenheit => write!(f, "fahrenheit"),
        }
    }
}

impl std::str::FromStr for TemperatureUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kelvin" | "k" => Ok(Self::Kelvin),
            "celsius" | "c" => Ok(Self::Celsius),
            "fahrenheit" | "f" => Ok(Self::Fahrenheit),
            _ => Err(format!(
                "Invalid temperature unit: {s}. Use 'kelvin', 'celsius' or 'fahrenheit'"
            )),
        }
    }
}

/// A temperature measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    value: f64,
    unit: TemperatureUnit,
}

impl Temperature {
    /// Create a temperature on the given scale
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if the value is NaN or infinite.
    pub fn new(value: f64, unit: TemperatureUnit) -> Result<Self, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::ValidationError(format!(
                "temperature must be finite, got {value}"
            )));
        }
        Ok(Self { value, unit })
    }

    /// Create a temperature in Kelvin
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if the value is NaN or infinite.
    pub fn kelvin(value: f64) -> Result<Self, DomainError> {
        Self::new(value, TemperatureUnit::Kelvin)
    }

    /// The numeric value on this temperature's own scale
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// The scale of this temperature
    #[must_use]
    pub const fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    /// Value in degrees Celsius
    #[must_use]
    pub fn to_celsius(&self) -> f64 {
        match self.unit {
            TemperatureUnit::Kelvin => self.value - KELVIN_OFFSET,
            TemperatureUnit::Celsius => self.value,
            TemperatureUnit::Fahrenheit => (self.value - 32.0) * 5.0 / 9.0,
        }
    }

    /// Value in Kelvin
    #[must_use]
    pub fn to_kelvin(&self) -> f64 {
        self.to_celsius() + KELVIN_OFFSET
    }

    /// Value in degrees Fahrenheit
    #[must_use]
    pub fn to_fahrenheit(&self) -> f64 {
        self.to_celsius().mul_add(9.0 / 5.0, 32.0)
    }

    /// Express this temperature on another scale
    #[must_use]
    pub fn convert_to(&self, unit: TemperatureUnit) -> Self {
        let value = match unit {
            TemperatureUnit::Kelvin => self.to_kelvin(),
            TemperatureUnit::Celsius => self.to_celsius(),
            TemperatureUnit::Fahrenheit => self.to_fahrenheit(),
        };
        Self { value, unit }
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} {}", self.value, self.unit.symbol())
    }
}
