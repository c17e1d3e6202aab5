use std::path::PathBuf;

/// Message returned for blank or missing city names.
pub const INVALID_CITY_MESSAGE: &str = "City name must be a non-empty string.";

/// Failures of the weather lookup pipeline.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("{}", INVALID_CITY_MESSAGE)]
    InvalidInput,

    #[error("City not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Upstream(String),
}

impl WeatherError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, WeatherError::InvalidInput)
    }

    /// Translate a transport error, keeping apart requests that never left
    /// the process from requests that got no usable response.
    pub fn from_transport(err: reqwest::Error, what: &str) -> Self {
        let detail = if err.is_timeout() || err.is_connect() {
            "no response received"
        } else if err.is_builder() || err.is_request() {
            "request could not be sent"
        } else if err.is_decode() || err.is_body() {
            "response body could not be read"
        } else {
            "request failed"
        };

        // The URL carries the API key in its query string.
        let err = err.without_url();
        WeatherError::Upstream(format!("Failed to fetch {what}: {detail} ({err})"))
    }
}

/// Failures of the search-history store.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("Failed to access history file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("History file {} is not a valid history list: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize history: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("{}", INVALID_CITY_MESSAGE)]
    EmptyCity,
}
