use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, trace};

pub mod commands;

use crate::client::ClimateClient;
use crate::config::{ConfigOverrides, Settings};

#[derive(Parser)]
#[command(name = "climate-advisor")]
#[command(about = "Compare the climate outlook of where you live with where you might move")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigOverrides,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search the geocoder for locations matching a name
    Search {
        /// Location name, at least two characters
        query: String,

        /// Maximum number of suggestions
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Analyze the current location, and optionally a migration target
    ///
    /// Each query is resolved through the location search; `--pick` selects
    /// which suggestion to use for both.
    Analyze {
        /// Where you live now
        #[arg(short, long)]
        current: String,

        /// Where you are thinking of moving
        #[arg(short, long)]
        target: Option<String>,

        /// Suggestion number to use, as listed by `search`
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
        pick: u64,
    },
    /// Ask the backend to compare two locations by name
    Compare {
        current: String,
        target: String,
    },
    /// Look up a single city through the legacy test endpoint
    Lookup {
        city: String,
    },
    /// Check backend health
    Health,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let settings = Settings::load(&self.config).context("Invalid configuration")?;
        debug!(base_url = %settings.base_url, environment = %settings.environment, "Using backend");

        let client = ClimateClient::new(&settings)?;
        let stdout = io::stdout();
        let mut out = stdout.lock();

        trace!("Dispatching command");
        self.command.execute(&client, &settings, &mut out).await?;
        out.flush()?;
        Ok(())
    }
}

impl Commands {
    pub async fn execute(
        self,
        client: &ClimateClient,
        settings: &Settings,
        out: &mut impl Write,
    ) -> Result<()> {
        match self {
            Commands::Search { query, limit } => {
                commands::search(client, settings, &query, limit, out).await?;
            }
            Commands::Analyze { current, target, pick } => {
                let pick = usize::try_from(pick).context("--pick is out of range")?;
                commands::analyze(client, settings, &current, target.as_deref(), pick, out)
                    .await?;
            }
            Commands::Compare { current, target } => {
                commands::compare(client, &current, &target, out).await?;
            }
            Commands::Lookup { city } => {
                commands::lookup(client, &city, out).await?;
            }
            Commands::Health => {
                commands::health(client, out).await?;
            }
        }
        Ok(())
    }
}
