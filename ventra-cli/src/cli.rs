use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, Text};
use ventra_core::{
    Clock, ClockTick, Config, ProviderOverrides, SearchController, SystemClock, UiState,
    provider_from_config,
};

use crate::{render, session};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "ventra", version, about = "Ventra - current weather for any city")]
pub struct Cli {
    /// OpenWeather API key; overrides the configured one.
    #[arg(long, env = "VENTRA_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Provider base URL; overrides the configured one.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and provider endpoint.
    Configure,

    /// Show current weather for a city and exit.
    Show {
        /// City name, e.g. "London" or "Paris,FR".
        city: String,
    },

    /// Search repeatedly; the default when no command is given.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let overrides = ProviderOverrides {
            api_key: self.api_key,
            base_url: self.base_url,
        };

        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(),
            Command::Show { city } => show(&city, &overrides).await,
            Command::Interactive => {
                let config = Config::load()?;
                let provider = provider_from_config(&config, &overrides)?;
                session::run(provider).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key);
    }

    let base_url = Text::new("Provider base URL:")
        .with_default(&config.base_url)
        .prompt()
        .context("Failed to read base URL")?;
    config.set_base_url(&base_url);

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

async fn show(city: &str, overrides: &ProviderOverrides) -> anyhow::Result<()> {
    let config = Config::load()?;
    let provider = provider_from_config(&config, overrides)?;

    let mut controller = SearchController::new(provider, ClockTick::at(SystemClock.now()));
    controller.set_query(city);

    match controller.search().await {
        UiState::Idle => anyhow::bail!("City name must not be empty."),
        UiState::Error => {
            let message = controller.state().error_message().unwrap_or_default();
            anyhow::bail!(message)
        }
        _ => {
            print!("{}", render::screen(controller.state()));
            Ok(())
        }
    }
}
