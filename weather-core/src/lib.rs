//! Core library for the `weather` tools.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather provider behind a `WeatherProvider` trait
//! - The city lookup pipeline (geocode, forecast, unit conversion)
//! - The file-backed search history
//!
//! It is used by `weather-cli` and `weather-server`.

pub mod config;
pub mod error;
pub mod history;
pub mod model;
pub mod pipeline;
pub mod provider;

pub use config::{Config, OpenWeatherConfig};
pub use error::{HistoryError, INVALID_CITY_MESSAGE, WeatherError};
pub use history::HistoryStore;
pub use model::{Coordinates, HistoryEntry, WeatherReading, WeatherResult};
pub use pipeline::{celsius_to_fahrenheit, get_weather_for_city};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
