use std::sync::Arc;

use weather_core::{HistoryStore, WeatherProvider};

/// Shared application state, created once at startup and cloned into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub provider: Arc<dyn WeatherProvider>,
    pub history: Arc<HistoryStore>,
}

impl AppState {
    pub fn new(provider: Arc<dyn WeatherProvider>, history: Arc<HistoryStore>) -> Self {
        Self { provider, history }
    }
}
