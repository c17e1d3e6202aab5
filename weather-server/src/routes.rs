use std::path::Path;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path as UrlPath, State},
    routing::{delete, get, post},
};
use serde_json::{Value, json};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use weather_core::{HistoryEntry, WeatherResult, get_weather_for_city};

use crate::{error::ApiError, state::AppState};

pub const DELETED_MESSAGE: &str = "City deleted from history.";

/// Build the full application: the `/api` routes plus static files from
/// `public_dir`, with `index.html` served for unknown paths.
pub fn router(state: AppState, public_dir: &Path) -> Router {
    let static_files =
        ServeDir::new(public_dir).fallback(ServeFile::new(public_dir.join("index.html")));

    api_router(state)
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
}

pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/api", post(lookup_weather))
        .route("/api/", post(lookup_weather))
        .route("/api/history", get(list_history))
        .route("/api/history/{id}", delete(delete_history))
        .with_state(state)
}

/// POST `{ "cityName": "..." }`: look up the weather, then record the city.
async fn lookup_weather(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<WeatherResult>, ApiError> {
    let city = city_name_from_body(&body).ok_or(ApiError::InvalidCity)?;

    let result = get_weather_for_city(state.provider.as_ref(), &city).await?;
    state.history.append(&city).await?;

    Ok(Json(result))
}

async fn list_history(State(state): State<AppState>) -> Json<Vec<HistoryEntry>> {
    Json(state.history.list().await)
}

async fn delete_history(
    State(state): State<AppState>,
    UrlPath(id): UrlPath<String>,
) -> Result<Json<Value>, ApiError> {
    state.history.remove(&id).await?;
    Ok(Json(json!({ "message": DELETED_MESSAGE })))
}

/// The `cityName` field when the body is JSON and it holds a non-blank string.
fn city_name_from_body(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get("cityName")
        .and_then(Value::as_str)
        .filter(|city| !city.trim().is_empty())
        .map(str::to_string)
}
