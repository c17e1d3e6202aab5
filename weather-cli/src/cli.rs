use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::Password;
use weather_core::{
    Config, HistoryStore, WeatherError, get_weather_for_city, provider_from_config,
};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Show current weather and the daily forecast for a city.
    Show {
        /// City name, e.g. "Paris".
        city: String,
    },

    /// Inspect or prune the search history.
    History {
        #[command(subcommand)]
        action: HistoryCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    /// List previously searched cities.
    List,

    /// Remove one entry by id.
    Delete {
        /// Entry id as printed by `weather history list`.
        id: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => show(&city).await,
            Command::History { action } => history(action).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    // Only the file contents are persisted, never environment overrides.
    let mut cfg = Config::load_file()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    let api_key = api_key.trim();
    if api_key.is_empty() {
        anyhow::bail!("API key must not be empty.");
    }

    cfg.set_api_key(api_key.to_string());
    cfg.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(city: &str) -> anyhow::Result<()> {
    // Reject blank names before any configuration is required.
    if city.trim().is_empty() {
        return Err(WeatherError::InvalidInput.into());
    }

    let cfg = Config::load()?;
    let provider = provider_from_config(&cfg)?;
    let store = HistoryStore::new(cfg.resolved_history_path()?);

    let result = get_weather_for_city(provider.as_ref(), city).await?;
    store.append(city).await?;

    print!("{}", output::render_result(&result));
    Ok(())
}

async fn history(action: HistoryCommand) -> anyhow::Result<()> {
    let cfg = Config::load()?;
    let store = HistoryStore::new(cfg.resolved_history_path()?);

    match action {
        HistoryCommand::List => {
            print!("{}", output::render_history(&store.list().await));
        }
        HistoryCommand::Delete { id } => {
            store.remove(&id).await?;
            println!("City deleted from history.");
        }
    }

    Ok(())
}
