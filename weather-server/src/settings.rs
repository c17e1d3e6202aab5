//! Server settings loaded from the environment at startup.
//!
//! Weather-provider settings (API key, history path) live in
//! `weather_core::Config`; this only covers how the HTTP service is exposed.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PUBLIC_DIR: &str = "public";
const DEFAULT_LOG_FILTER: &str = "info,tower_http=info";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub bind_address: SocketAddr,
    pub public_dir: PathBuf,
    pub log_filter: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host_str = lookup("BIND_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let host = host_str
            .parse::<IpAddr>()
            .map_err(|e| SettingsError::InvalidValue("BIND_HOST".to_string(), e.to_string()))?;

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| SettingsError::InvalidValue("PORT".to_string(), e.to_string()))?,
            None => DEFAULT_PORT,
        };

        let public_dir = lookup("PUBLIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PUBLIC_DIR));

        let log_filter = lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            bind_address: SocketAddr::new(host, port),
            public_dir,
            log_filter,
        })
    }
}
