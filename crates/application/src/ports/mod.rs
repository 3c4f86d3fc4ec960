//! Port definitions - Interfaces for external collaborators
//!
//! The refresh loop depends only on these traits; infrastructure supplies
//! the implementations.

mod location_port;
mod weather_port;

pub use location_port::LocationPort;
pub use weather_port::WeatherPort;

#[cfg(test)]
pub use location_port::MockLocationPort;
#[cfg(test)]
pub use weather_port::MockWeatherPort;
