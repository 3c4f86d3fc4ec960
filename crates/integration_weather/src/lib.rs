//! OpenWeatherMap weather integration
//!
//! Client for the OpenWeatherMap current weather endpoint
//! (<https://openweathermap.org/current>). Temperatures are returned in the
//! API's default unit, Kelvin.

pub mod client;
mod models;

pub use client::{OpenWeatherMapClient, WeatherClient, WeatherConfig, WeatherError};
pub use models::{Condition, CurrentConditions};
