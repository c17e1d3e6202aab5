//! City weather lookup: geocode, fetch the forecast, and shape the result.

use crate::{
    error::WeatherError,
    model::{
        DEFAULT_DESCRIPTION, DEFAULT_ICON, ForecastEntry, ForecastPayload, MIDDAY_MARKER,
        WeatherReading, WeatherResult,
    },
    provider::WeatherProvider,
};

/// Convert Celsius to Fahrenheit, truncating toward zero.
pub fn celsius_to_fahrenheit(celsius: f64) -> i64 {
    (celsius * 9.0 / 5.0 + 32.0).trunc() as i64
}

/// Look up current conditions and the daily midday forecast for `city`.
///
/// Geocoding always runs before the forecast fetch, and a blank city name is
/// rejected before either call is made.
pub async fn get_weather_for_city(
    provider: &dyn WeatherProvider,
    city: &str,
) -> Result<WeatherResult, WeatherError> {
    let city = city.trim();
    if city.is_empty() {
        return Err(WeatherError::InvalidInput);
    }

    let location = provider
        .geocode(city, 1)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::NotFound(city.to_string()))?;

    let payload = provider.forecast(location.coordinates()).await?;
    let result = parse_forecast(payload)?;

    tracing::info!(
        city = %result.current.city_name,
        days = result.forecast.len(),
        "weather lookup complete"
    );
    Ok(result)
}

/// Validate a raw forecast payload and derive the current reading plus the
/// midday samples.
pub fn parse_forecast(payload: ForecastPayload) -> Result<WeatherResult, WeatherError> {
    let city_name = payload
        .city
        .and_then(|c| c.name)
        .ok_or_else(|| WeatherError::Upstream("Weather data is missing the city name.".into()))?;

    let list = payload.list.unwrap_or_default();
    let first = list
        .first()
        .ok_or_else(|| WeatherError::Upstream("Weather data contains no forecast samples.".into()))?;

    let current = to_reading(&city_name, first);
    let forecast = list
        .iter()
        .filter(|entry| entry.dt_txt.contains(MIDDAY_MARKER))
        .map(|entry| to_reading(&city_name, entry))
        .collect();

    Ok(WeatherResult { current, forecast })
}

fn to_reading(city_name: &str, entry: &ForecastEntry) -> WeatherReading {
    let condition = entry.weather.first();

    WeatherReading {
        city_name: city_name.to_string(),
        temperature: celsius_to_fahrenheit(entry.main.temp),
        icon: condition
            .and_then(|c| c.icon.clone())
            .unwrap_or_else(|| DEFAULT_ICON.to_string()),
        description: condition
            .and_then(|c| c.description.clone())
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        humidity: entry.main.humidity,
        wind_speed: entry.wind.speed,
        date_time: entry.dt_txt.clone(),
    }
}
