//! Adapters implementing application ports

mod location_adapter;
mod weather_adapter;

pub use location_adapter::{GeoIpLocationAdapter, StaticLocationAdapter};
pub use weather_adapter::WeatherAdapter;
