//! Thermowatch CLI
//!
//! Watches the temperature at the host's location and prints every change.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod output;
mod wiring;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use application::{CycleOutcome, NotifierEvent, TemperatureNotifier};
use clap::{Parser, Subcommand};
use domain::value_objects::TemperatureUnit;
use infrastructure::{AppConfig, LoggingConfig, init_logging};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::output::format_reading;

/// Thermowatch CLI
#[derive(Parser)]
#[command(name = "thermowatch")]
#[command(author, version, about = "Temperature change notifier", long_about = None)]
struct Cli {
    /// Verbosity level (overrides the configured log filter)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: ./thermowatch.toml if present)
    #[arg(short, long, env = "THERMOWATCH_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Refresh on a schedule and print every temperature change until Ctrl+C
    Watch {
        /// Seconds between refreshes (default: refresh.interval_secs)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Display unit: kelvin, celsius or fahrenheit
        #[arg(short, long, default_value = "celsius")]
        unit: TemperatureUnit,
    },

    /// Fetch the current temperature once and print it
    Once {
        /// Display unit: kelvin, celsius or fahrenheit
        #[arg(short, long, default_value = "celsius")]
        unit: TemperatureUnit,
    },

    /// Print the effective configuration (secrets redacted)
    Config,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Logging settings after applying `-v` flags
fn effective_logging(config: &LoggingConfig, verbose: u8) -> LoggingConfig {
    if verbose == 0 {
        return config.clone();
    }
    LoggingConfig {
        filter: log_filter_from_verbosity(verbose).to_string(),
        ..config.clone()
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => AppConfig::load().context("failed to load configuration")?,
    };
    Ok(config)
}

/// Render the configuration as TOML, noting whether an API key is set
fn render_config(config: &AppConfig) -> anyhow::Result<String> {
    let mut rendered = toml::to_string_pretty(config).context("failed to render configuration")?;
    let key_state = if config.weather.has_api_key() {
        "[REDACTED]"
    } else {
        "<not set>"
    };
    rendered.push_str(&format!("\n# weather.api_key = {key_state}\n"));
    Ok(rendered)
}

async fn run_once(notifier: &TemperatureNotifier, unit: TemperatureUnit) -> anyhow::Result<()> {
    let reading = match notifier.refresh().await? {
        CycleOutcome::Changed(reading) => reading,
        CycleOutcome::Unchanged | CycleOutcome::Discarded => notifier
            .current_reading()
            .context("refresh produced no reading")?,
    };
    println!("{}", format_reading(&reading, unit));
    Ok(())
}

async fn run_watch(
    notifier: &TemperatureNotifier,
    interval: Duration,
    unit: TemperatureUnit,
) -> anyhow::Result<()> {
    let mut events = notifier.subscribe();
    notifier.start(interval);
    info!(?interval, "Watching temperature, press Ctrl+C to stop");

    loop {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result.context("failed to listen for Ctrl+C")?;
                info!("Shutdown requested");
                break;
            },
            event = events.recv() => match event {
                Ok(NotifierEvent::TemperatureChanged(reading)) => {
                    println!("{}", format_reading(&reading, unit));
                },
                Ok(NotifierEvent::CycleFailed(error)) => {
                    eprintln!("refresh failed ({}): {error}", error.kind());
                },
                Err(RecvError::Lagged(missed)) => {
                    warn!(missed, "Event receiver lagged, some changes were skipped");
                },
                Err(RecvError::Closed) => break,
            },
        }
    }

    notifier.stop();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    init_logging(&effective_logging(&config.logging, cli.verbose))?;

    match cli.command {
        Commands::Config => {
            print!("{}", render_config(&config)?);
            if let Err(e) = config.validate() {
                eprintln!("warning: {e}");
            }
        },

        Commands::Once { unit } => {
            config.validate()?;
            let notifier = wiring::build_notifier(&config)?;
            run_once(&notifier, unit).await?;
        },

        Commands::Watch { interval, unit } => {
            config.validate()?;
            let notifier = wiring::build_notifier(&config)?;
            let interval = interval.map_or_else(|| config.refresh.interval(), Duration::from_secs);
            run_watch(&notifier, interval, unit).await?;
        },
    }

    Ok(())
}
