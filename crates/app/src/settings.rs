//! Handles settings for the application.
//!
//! Settings are layered: an optional TOML file (`config/spese.toml` unless
//! `--config` says otherwise), then `SPESE_*` environment variables, then
//! command-line flags.
use clap::{Parser, Subcommand, ValueEnum};
use engine::RemainderPolicy;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/spese.toml";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Log level for the `spese` and `engine` targets.
    pub level: String,
    /// Path of the JSON snapshot holding users, events, expenses and payments.
    pub data: String,
    pub format: OutputFormat,
    /// Who absorbs allocation residuals: `last` or `payer`.
    pub remainder: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            data: "data/spese.json".to_string(),
            format: OutputFormat::Text,
            remainder: RemainderPolicy::default().as_str().to_string(),
        }
    }
}

impl Settings {
    pub fn remainder_policy(&self) -> Result<RemainderPolicy> {
        Ok(RemainderPolicy::try_from(self.remainder.as_str())?)
    }
}

#[derive(Debug, Parser)]
#[command(name = "spese")]
#[command(about = "Split shared expenses and suggest who pays whom")]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the snapshot path.
    #[arg(long)]
    data: Option<String>,
    /// Override the output format.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
    /// Override who absorbs rounding residuals (`last` or `payer`).
    #[arg(long)]
    remainder: Option<String>,
    /// Override the log level.
    #[arg(long)]
    level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Per-participant shares of one expense.
    Expense { id: String },
    /// Balances, data warnings and suggested transfers of one event.
    Event { id: String },
    /// Balance of one participant across every event.
    User { id: String },
    /// Suggested transfers across every event, or within one event.
    Settle {
        #[arg(long)]
        event: Option<String>,
    },
    /// Validate every split and every event's participant list.
    Check,
    /// Print an equal split definition for the given participants.
    EqualSplit {
        #[arg(required = true)]
        participants: Vec<String>,
    },
}

/// Parses the process arguments and resolves the settings.
pub fn load() -> Result<(Settings, Command)> {
    let cli = Cli::parse();
    let settings = resolve(&cli)?;
    Ok((settings, cli.command))
}

/// Resolves settings from the config file, the environment and `cli`.
pub fn resolve(cli: &Cli) -> Result<Settings> {
    let config_path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("SPESE"));
    let mut settings: Settings = builder.build()?.try_deserialize()?;

    if let Some(data) = &cli.data {
        settings.data = data.clone();
    }
    if let Some(format) = cli.format {
        settings.format = format;
    }
    if let Some(remainder) = &cli.remainder {
        settings.remainder = remainder.clone();
    }
    if let Some(level) = &cli.level {
        settings.level = level.clone();
    }

    Ok(settings)
}
