//! Helpers shared by the subcommands: locating the data directory, loading
//! configuration, opening the database, and parsing argument values.

use crate::error::CliError;
use chrono::{DateTime, Local, Utc};
use fausse::database::{default_data_dir, DATABASE_FILE};
use fausse::slot::{parse_date, parse_time};
use fausse::{BookingPolicy, Config, ConfigBuilder, Database, DatabaseConfig, PartySize};
use std::path::PathBuf;
use std::time::Duration;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output. Already applied to the logger.
    #[allow(dead_code)]
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Resolve the data directory: `--data-dir` / `FAUSSE_DATA_DIR`, else `~/.fausse`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match &global.data_dir {
        Some(dir) => Ok(dir.clone()),
        None => default_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables (highest priority)
/// 2. Project files (`fausse.local.yaml`, `fausse.yaml`)
/// 3. User configuration in the data directory
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();
    if let Ok(data_dir) = resolve_data_dir(global) {
        builder = builder.with_data_dir(&data_dir);
    }

    builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Derive the booking policy from a loaded configuration.
pub fn booking_policy(config: &Config) -> Result<BookingPolicy, CliError> {
    BookingPolicy::from_config(config).map_err(|e| CliError::Config(e.to_string()))
}

/// Build the database configuration from global options.
///
/// # Errors
///
/// With auto-init disabled by flag or config, the returned config refuses to
/// create a missing database.
pub fn database_config(
    global: &GlobalOptions,
    config: &Config,
) -> Result<DatabaseConfig, CliError> {
    let db_path = resolve_data_dir(global)?.join(DATABASE_FILE);
    let timeout_seconds = global
        .busy_timeout
        .map_or_else(|| config.lock_wait_seconds(), u64::from);

    let db_config =
        DatabaseConfig::new(db_path).with_busy_timeout(Duration::from_secs(timeout_seconds));
    if global.disable_autoinit || config.autoinit_disabled() {
        Ok(db_config.existing_only())
    } else {
        Ok(db_config)
    }
}

/// Open database with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and auto-init is disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    Database::open(database_config(global, config)?).map_err(CliError::from)
}

/// Parse a `YYYY-MM-DD` argument.
pub fn parse_date_arg(raw: &str) -> Result<chrono::NaiveDate, CliError> {
    parse_date(raw)
        .ok_or_else(|| CliError::InvalidArguments(format!("date must be YYYY-MM-DD, got '{raw}'")))
}

/// Parse an `HH:MM` argument.
pub fn parse_time_arg(raw: &str) -> Result<chrono::NaiveTime, CliError> {
    parse_time(raw)
        .ok_or_else(|| CliError::InvalidArguments(format!("time must be HH:MM, got '{raw}'")))
}

/// Parse a party size argument.
pub fn parse_party_arg(value: u32) -> Result<PartySize, CliError> {
    PartySize::try_from(value).map_err(|e| CliError::InvalidArguments(e.to_string()))
}

/// Format a timestamp for display in local time.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}
