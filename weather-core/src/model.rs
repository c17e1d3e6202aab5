use serde::{Deserialize, Serialize};

/// Icon code used when the provider sends no condition for a sample.
pub const DEFAULT_ICON: &str = "01d";

/// Description used when the provider sends no condition for a sample.
pub const DEFAULT_DESCRIPTION: &str = "No Description";

/// Timestamp marker selecting the midday sample of each forecast day.
pub const MIDDAY_MARKER: &str = "12:00:00";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One normalized reading, serialized in the shape the web client expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    pub city_name: String,
    /// Degrees Fahrenheit, truncated toward zero.
    pub temperature: i64,
    pub icon: String,
    pub description: String,
    pub humidity: i64,
    pub wind_speed: f64,
    pub date_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub current: WeatherReading,
    pub forecast: Vec<WeatherReading>,
}

/// A single search-history record as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub city: String,
}

/// One result from the geocoding endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoMatch {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub country: Option<String>,
}

impl GeoMatch {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.lat,
            longitude: self.lon,
        }
    }
}

/// Raw forecast payload. `city` and `list` stay optional so a payload missing
/// them decodes and can be rejected by the pipeline with a precise message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastPayload {
    #[serde(default)]
    pub city: Option<ForecastCity>,
    #[serde(default)]
    pub list: Option<Vec<ForecastEntry>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastCity {
    #[serde(default)]
    pub name: Option<String>,
}

/// One 3-hour sample from the forecast endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub main: ForecastMain,
    #[serde(default)]
    pub weather: Vec<ForecastCondition>,
    pub wind: ForecastWind,
    pub dt_txt: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastMain {
    /// Celsius, since requests are made with `units=metric`.
    pub temp: f64,
    pub humidity: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastCondition {
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastWind {
    pub speed: f64,
}
