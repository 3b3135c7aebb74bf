//! Command-line interface parsing for citywx
//!
//! This module handles parsing of CLI arguments using clap: an optional city
//! to look up at startup, the --plain text mode and the HTTP timeout.

use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::data::geocoding::OPEN_METEO_GEOCODING_URL;
use crate::data::weather::{OPEN_METEO_ARCHIVE_URL, OPEN_METEO_FORECAST_URL};

/// Accepted range for --timeout, in seconds
pub const TIMEOUT_RANGE_SECS: std::ops::RangeInclusive<u64> = 1..=120;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The timeout is outside the accepted range
    #[error("Invalid timeout: {0}s. Expected between 1 and 120 seconds")]
    InvalidTimeout(u64),
}

/// citywx - Weather for a city, compared with past forecasts and past years
#[derive(Parser, Debug)]
#[command(name = "citywx")]
#[command(about = "City weather with forecast accuracy, history and clothing advice")]
#[command(version)]
pub struct Cli {
    /// City to look up on startup (defaults to the last searched city)
    ///
    /// Examples:
    ///   citywx                  # Last searched city, or Stockholm
    ///   citywx Göteborg         # Look up Göteborg
    ///   citywx Malmö --plain    # Print the report and exit
    #[arg(value_name = "CITY")]
    pub city: Option<String>,

    /// Print the report as plain text instead of opening the interface
    #[arg(long)]
    pub plain: bool,

    /// HTTP request timeout in seconds (1-120)
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    pub timeout: u64,

    #[arg(long, hide = true, default_value = OPEN_METEO_GEOCODING_URL)]
    pub geocoding_url: String,

    #[arg(long, hide = true, default_value = OPEN_METEO_FORECAST_URL)]
    pub forecast_url: String,

    #[arg(long, hide = true, default_value = OPEN_METEO_ARCHIVE_URL)]
    pub archive_url: String,
}

/// Base URLs of the three Open-Meteo APIs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub geocoding: String,
    pub forecast: String,
    pub archive: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocoding: OPEN_METEO_GEOCODING_URL.to_string(),
            forecast: OPEN_METEO_FORECAST_URL.to_string(),
            archive: OPEN_METEO_ARCHIVE_URL.to_string(),
        }
    }
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, PartialEq)]
pub struct StartupConfig {
    /// City given on the command line, if any
    pub initial_city: Option<String>,
    /// Print a text report and exit
    pub plain: bool,
    /// Per-request HTTP timeout
    pub timeout: Duration,
    pub endpoints: Endpoints,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            initial_city: None,
            plain: false,
            timeout: Duration::from_secs(10),
            endpoints: Endpoints::default(),
        }
    }
}

/// Validates a timeout argument.
///
/// # Returns
/// * `Ok(Duration)` if the value is within [`TIMEOUT_RANGE_SECS`]
/// * `Err(CliError::InvalidTimeout)` otherwise
pub fn parse_timeout_arg(secs: u64) -> Result<Duration, CliError> {
    if TIMEOUT_RANGE_SECS.contains(&secs) {
        Ok(Duration::from_secs(secs))
    } else {
        Err(CliError::InvalidTimeout(secs))
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if the timeout is out of range
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        Ok(StartupConfig {
            initial_city: cli.city.clone(),
            plain: cli.plain,
            timeout: parse_timeout_arg(cli.timeout)?,
            endpoints: Endpoints {
                geocoding: cli.geocoding_url.clone(),
                forecast: cli.forecast_url.clone(),
                archive: cli.archive_url.clone(),
            },
        })
    }
}
