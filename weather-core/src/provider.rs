use crate::{
    Config,
    error::WeatherError,
    model::{Coordinates, ForecastPayload, GeoMatch},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// The two remote calls the lookup pipeline depends on.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Resolve a place name to at most `limit` matches. An empty vector means
    /// the provider knows no such place.
    async fn geocode(&self, city: &str, limit: u8) -> Result<Vec<GeoMatch>, WeatherError>;

    /// Fetch the 3-hour interval forecast for `coords`, temperatures in Celsius.
    async fn forecast(&self, coords: Coordinates) -> Result<ForecastPayload, WeatherError>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.require_api_key()?;

    let provider = OpenWeatherProvider::from_config(api_key.to_owned(), &config.openweather)?;
    Ok(Box::new(provider))
}
