use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

pub const API_KEY_ENV: &str = "WEATHER_API_KEY";
pub const HISTORY_PATH_ENV: &str = "WEATHER_HISTORY_PATH";

const HISTORY_FILE_NAME: &str = "searchHistory.json";

/// OpenWeather endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenWeatherConfig {
    pub geo_url: String,
    pub data_url: String,
    pub timeout_secs: u64,
}

impl Default for OpenWeatherConfig {
    fn default() -> Self {
        Self {
            geo_url: "http://api.openweathermap.org/geo/1.0".to_string(),
            data_url: "https://api.openweathermap.org/data/2.5".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// OpenWeather API key. `WEATHER_API_KEY` overrides it.
    pub api_key: Option<String>,

    /// Where the search history lives. `WEATHER_HISTORY_PATH` overrides it.
    pub history_path: Option<PathBuf>,

    /// Example TOML:
    /// [openweather]
    /// timeout_secs = 5
    pub openweather: OpenWeatherConfig,
}

impl Config {
    /// Load the config file (if any), then apply `.env` and process
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let mut cfg = Self::load_file()?;
        cfg.apply_overrides(
            std::env::var(API_KEY_ENV).ok(),
            std::env::var(HISTORY_PATH_ENV).ok(),
        );
        Ok(cfg)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load_file() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Environment values win over file values; blank values are ignored.
    pub fn apply_overrides(&mut self, api_key: Option<String>, history_path: Option<String>) {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key.trim().to_string());
        }
        if let Some(path) = history_path.filter(|p| !p.trim().is_empty()) {
            self.history_path = Some(PathBuf::from(path));
        }
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    /// The API key, or an error explaining how to provide one.
    ///
    /// Callers check this once at startup; a missing key never surfaces as a
    /// per-request failure.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No OpenWeather API key configured.\n\
                     Hint: set {API_KEY_ENV} or run `weather configure`."
                )
            })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Configured history path, falling back to the platform data directory.
    pub fn resolved_history_path(&self) -> Result<PathBuf> {
        match &self.history_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::project_dirs()?.data_dir().join(HISTORY_FILE_NAME)),
        }
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("dev", "weather-task", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_api_key_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.require_api_key().unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No OpenWeather API key configured"));
        assert!(msg.contains(API_KEY_ENV));
    }

    #[test]
    fn blank_api_key_in_file_is_not_configured() {
        let cfg = Config::from_toml("api_key = \"   \"").unwrap();
        assert!(cfg.require_api_key().is_err());

        let cfg = Config::from_toml("api_key = \"\"").unwrap();
        assert!(cfg.require_api_key().is_err());
    }

    #[test]
    fn set_api_key_makes_it_required_value() {
        let mut cfg = Config::default();
        cfg.set_api_key("OPEN_KEY".into());

        assert_eq!(cfg.require_api_key().unwrap(), "OPEN_KEY");
    }

    #[test]
    fn env_override_wins_over_file_value() {
        let mut cfg = Config::from_toml("api_key = \"FILE_KEY\"").unwrap();
        cfg.apply_overrides(Some("ENV_KEY".into()), None);

        assert_eq!(cfg.api_key.as_deref(), Some("ENV_KEY"));
    }

    #[test]
    fn blank_env_override_is_ignored() {
        let mut cfg = Config::from_toml("api_key = \"FILE_KEY\"").unwrap();
        cfg.apply_overrides(Some("   ".into()), Some(String::new()));

        assert_eq!(cfg.api_key.as_deref(), Some("FILE_KEY"));
        assert!(cfg.history_path.is_none());
    }

    #[test]
    fn history_path_override_is_used() {
        let mut cfg = Config::default();
        cfg.apply_overrides(None, Some("/tmp/history.json".into()));

        assert_eq!(
            cfg.resolved_history_path().unwrap(),
            PathBuf::from("/tmp/history.json")
        );
    }

    #[test]
    fn openweather_table_is_partially_overridable() {
        let cfg = Config::from_toml(
            r#"
            [openweather]
            timeout_secs = 3
            "#,
        )
        .unwrap();

        assert_eq!(cfg.openweather.timeout_secs, 3);
        assert_eq!(cfg.openweather.geo_url, OpenWeatherConfig::default().geo_url);
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.history_path = Some(PathBuf::from("history.json"));

        let text = toml::to_string_pretty(&cfg).unwrap();
        let parsed = Config::from_toml(&text).unwrap();

        assert_eq!(parsed.api_key.as_deref(), Some("KEY"));
        assert_eq!(parsed.history_path, Some(PathBuf::from("history.json")));
        assert_eq!(parsed.openweather, cfg.openweather);
    }
}
