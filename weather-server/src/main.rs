//! Binary crate for the weather HTTP service.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use weather_core::{Config, HistoryStore, provider_from_config};
use weather_server::{AppState, Settings, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let settings = Settings::from_env()?;
    tracing_subscriber::registry()
        .with(EnvFilter::new(&settings.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    // A missing API key stops the server here rather than on the first request.
    let provider = provider_from_config(&config)?;

    let history_path = config.resolved_history_path()?;
    info!(path = %history_path.display(), "using search history file");
    let state = AppState::new(Arc::from(provider), Arc::new(HistoryStore::new(history_path)));

    let app = router(state, &settings.public_dir);

    let listener = tokio::net::TcpListener::bind(settings.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", settings.bind_address))?;
    info!("Listening on {}", settings.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {err}");
    }
    info!("Shutting down");
}
