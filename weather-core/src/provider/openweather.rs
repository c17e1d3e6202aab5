use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::{
    config::OpenWeatherConfig,
    error::WeatherError,
    model::{Coordinates, ForecastPayload, GeoMatch},
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    geo_url: String,
    data_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn from_config(api_key: String, config: &OpenWeatherConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client for OpenWeather")?;

        Ok(Self {
            api_key,
            geo_url: config.geo_url.trim_end_matches('/').to_string(),
            data_url: config.data_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        what: &str,
    ) -> Result<T, WeatherError> {
        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| WeatherError::from_transport(e, what))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| WeatherError::from_transport(e, what))?;

        if !status.is_success() {
            return Err(WeatherError::Upstream(format!(
                "Failed to fetch {what}: provider returned status {status}: {}",
                truncate_body(&body),
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            WeatherError::Upstream(format!("Failed to fetch {what}: malformed payload ({e})"))
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn geocode(&self, city: &str, limit: u8) -> Result<Vec<GeoMatch>, WeatherError> {
        let url = format!("{}/direct", self.geo_url);
        let limit = limit.to_string();

        tracing::debug!(city, "geocoding city");
        self.get_json(
            &url,
            &[("q", city), ("limit", limit.as_str()), ("appid", self.api_key.as_str())],
            "location data",
        )
        .await
    }

    async fn forecast(&self, coords: Coordinates) -> Result<ForecastPayload, WeatherError> {
        let url = format!("{}/forecast", self.data_url);
        let lat = coords.latitude.to_string();
        let lon = coords.longitude.to_string();

        tracing::debug!(lat = coords.latitude, lon = coords.longitude, "fetching forecast");
        self.get_json(
            &url,
            &[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ],
            "weather data",
        )
        .await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
