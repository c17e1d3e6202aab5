//! Maps core errors onto HTTP responses of the form `{"error": "..."}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use weather_core::{HistoryError, INVALID_CITY_MESSAGE, WeatherError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{}", INVALID_CITY_MESSAGE)]
    InvalidCity,

    #[error(transparent)]
    Weather(#[from] WeatherError),

    #[error(transparent)]
    History(#[from] HistoryError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidCity => StatusCode::BAD_REQUEST,
            ApiError::Weather(err) if err.is_invalid_input() => StatusCode::BAD_REQUEST,
            ApiError::History(HistoryError::EmptyCity) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(error = %message, "request failed");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_city_uses_shared_message() {
        assert_eq!(ApiError::InvalidCity.to_string(), INVALID_CITY_MESSAGE);
        assert_eq!(
            ApiError::from(WeatherError::InvalidInput).to_string(),
            INVALID_CITY_MESSAGE
        );
    }

    #[test]
    fn invalid_input_maps_to_bad_request() {
        assert_eq!(ApiError::InvalidCity.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(WeatherError::InvalidInput).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn upstream_failures_map_to_internal_error() {
        assert_eq!(
            ApiError::from(WeatherError::NotFound("Atlantis".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(WeatherError::Upstream("boom".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
