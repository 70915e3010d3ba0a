use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use dashboard_core::{
    Config, Dashboard, DashboardOptions, Location, ProviderId, WeatherProvider, load_dashboard,
    provider::{default_provider_from_config, provider_from_config},
};
use inquire::{Password, Text};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dashboard", version, about = "Weather dashboard for a city")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure connection settings for a provider.
    Configure {
        /// Provider short name, "open-meteo" or "graphql".
        provider: String,
    },

    /// Render the dashboard once.
    Show {
        #[command(flatten)]
        target: Target,

        /// Print the dashboard as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Re-render the dashboard periodically until interrupted.
    Watch {
        #[command(flatten)]
        target: Target,

        /// Seconds between renders.
        #[arg(long, default_value_t = 60)]
        interval: u64,

        /// Print the dashboard as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Args)]
pub struct Target {
    /// City label shown on the dashboard.
    pub city: String,

    /// Latitude, passed to the weather source as given.
    #[arg(allow_hyphen_values = true)]
    pub lat: String,

    /// Longitude, passed to the weather source as given.
    #[arg(allow_hyphen_values = true)]
    pub long: String,

    /// Timezone for the forecast; defaults to the configured one or GMT.
    #[arg(long)]
    pub timezone: Option<String>,

    /// Provider to use instead of the configured default.
    #[arg(long)]
    pub provider: Option<String>,
}

impl Target {
    fn location(&self) -> Location {
        Location::new(&self.city, &self.lat, &self.long)
    }

    fn options(&self, config: &Config) -> DashboardOptions {
        let mut options = DashboardOptions::from_config(config);
        if let Some(tz) = &self.timezone {
            options.timezone = tz.clone();
        }
        options
    }

    fn provider(&self, config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
        match &self.provider {
            Some(name) => provider_from_config(ProviderId::try_from(name.as_str())?, config),
            None => default_provider_from_config(config),
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { provider } => configure(&provider),
            Command::Show { target, json } => {
                let config = Config::load()?;
                let provider = target.provider(&config)?;
                let dashboard =
                    load_dashboard(provider.as_ref(), &target.location(), &target.options(&config))
                        .await?;
                print_dashboard(&dashboard, json)
            }
            Command::Watch { target, interval, json } => {
                let config = Config::load()?;
                let provider = target.provider(&config)?;
                watch(provider.as_ref(), &target, &config, Duration::from_secs(interval.max(1)), json)
                    .await
            }
        }
    }
}

fn configure(provider: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;
    let mut config = Config::load()?;
    let current = config.provider_config(id).cloned().unwrap_or_default();

    let endpoint = match id {
        ProviderId::OpenMeteo => Text::new("Endpoint (leave empty for the public API):")
            .with_default(current.endpoint.as_deref().unwrap_or_default())
            .prompt()?,
        ProviderId::GraphQl => Text::new("GraphQL endpoint:")
            .with_default(current.endpoint.as_deref().unwrap_or_default())
            .prompt()?,
    };

    let api_key = match id {
        ProviderId::OpenMeteo => None,
        ProviderId::GraphQl => {
            let message = if current.api_key.is_some() {
                "API key (leave empty to keep the current one):"
            } else {
                "API key:"
            };
            let entered = Password::new(message)
                .without_confirmation()
                .prompt()
                .context("Failed to read API key")?;
            resolve_api_key(&entered, current.api_key)
        }
    };

    let endpoint = Some(endpoint.trim().to_string()).filter(|e| !e.is_empty());

    config.upsert_provider(id, endpoint, api_key);
    let path = config.save()?;

    println!("Saved settings for {id} to {}", path.display());
    Ok(())
}

/// An empty entry keeps the stored key.
fn resolve_api_key(entered: &str, existing: Option<String>) -> Option<String> {
    let entered = entered.trim();
    if entered.is_empty() { existing } else { Some(entered.to_string()) }
}

async fn watch(
    provider: &dyn WeatherProvider,
    target: &Target,
    config: &Config,
    interval: Duration,
    json: bool,
) -> anyhow::Result<()> {
    let location = target.location();
    let options = target.options(config);

    watch_until(provider, &location, &options, interval, json, tokio::signal::ctrl_c()).await
}

/// Render every `interval` until `shutdown` resolves, including mid-fetch.
async fn watch_until<F>(
    provider: &dyn WeatherProvider,
    location: &Location,
    options: &DashboardOptions,
    interval: Duration,
    json: bool,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = std::io::Result<()>>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = load_dashboard(provider, location, options) => match result {
                Ok(dashboard) => print_dashboard(&dashboard, json)?,
                Err(e) => tracing::warn!("dashboard render failed: {e:#}"),
            },
            signal = &mut shutdown => return signal.context("Failed to listen for Ctrl-C"),
        }

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            signal = &mut shutdown => return signal.context("Failed to listen for Ctrl-C"),
        }
    }
}

fn print_dashboard(dashboard: &Dashboard, json: bool) -> anyhow::Result<()> {
    if json {
        let out = serde_json::to_string_pretty(dashboard)
            .context("Failed to serialize dashboard to JSON")?;
        println!("{out}");
    } else {
        print!("{}", render::render_text(dashboard));
    }
    Ok(())
}
