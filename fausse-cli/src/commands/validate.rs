//! Command to validate a fausse configuration file.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use clap::Args;
use fausse::config::{BookingPolicy, Config, ConfigValidator};
use std::path::PathBuf;

/// Validate a configuration file.
#[derive(Args)]
pub struct ValidateCommand {
    /// Configuration file to validate (default: the effective configuration)
    #[arg(value_name = "CONFIG_PATH")]
    pub config_path: Option<PathBuf>,
}

fn check(config: &Config) -> Result<BookingPolicy, String> {
    ConfigValidator::validate(config).map_err(|e| e.to_string())?;
    BookingPolicy::from_config(config).map_err(|e| e.to_string())
}

impl ValidateCommand {
    /// Execute the validate command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = match &self.config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::InvalidArguments(format!(
                        "File not found: {}",
                        path.display()
                    )));
                }
                let contents = std::fs::read_to_string(path)?;
                match serde_yaml::from_str::<Config>(&contents) {
                    Ok(config) => config,
                    Err(e) => {
                        eprintln!("Parse error: {e}");
                        return Err(CliError::SemanticFailure(
                            "Configuration file is invalid".to_string(),
                        ));
                    }
                }
            }
            None => load_configuration(global)?,
        };

        match check(&config) {
            Ok(policy) => {
                println!("Configuration is valid");
                if !global.quiet {
                    eprintln!(
                        "  {} seats, seatings of {} minutes every {} minutes, {}-{}",
                        policy.seats(),
                        policy.seating_duration().num_minutes(),
                        policy.slot_interval().num_minutes(),
                        policy.open().format("%H:%M"),
                        policy.last_seating().format("%H:%M"),
                    );
                }
                Ok(())
            }
            Err(e) => {
                eprintln!("Validation error: {e}");
                Err(CliError::SemanticFailure(
                    "Configuration validation failed".to_string(),
                ))
            }
        }
    }
}
