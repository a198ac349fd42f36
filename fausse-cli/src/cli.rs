//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    AvailabilityCommand, CompletionsCommand, InitCommand, ListCommand, ReserveCommand,
    SeedCapacityCommand, SeedCommand, ServeCommand, ShowDataDirCommand, SubscribeCommand,
    ValidateCommand,
};
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Reservation server and admin tool for Cafe Fausse.
#[derive(Parser)]
#[command(name = "fausse")]
#[command(version, about = "Cafe Fausse reservation server and admin tool", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Override the data directory location
    #[arg(long, value_name = "PATH", global = true, env = "FAUSSE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the default busy timeout (in seconds)
    #[arg(long, value_name = "SECONDS", global = true, env = "FAUSSE_BUSY_TIMEOUT")]
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization
    #[arg(long, global = true, env = "FAUSSE_DISABLE_AUTOINIT")]
    pub disable_autoinit: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Initialize the data directory and database
    Init(InitCommand),

    /// Run the HTTP API
    Serve(ServeCommand),

    /// Book a table
    Reserve(ReserveCommand),

    /// Check whether a slot can take a party
    Availability(AvailabilityCommand),

    /// List reservations
    List(ListCommand),

    /// Subscribe an email to the newsletter
    Subscribe(SubscribeCommand),

    /// Fill the coming days with demo reservations
    Seed(SeedCommand),

    /// Set up a full slot and an almost full slot
    SeedCapacity(SeedCapacityCommand),

    /// Validate a configuration file
    Validate(ValidateCommand),

    /// Show the resolved data directory path
    ShowDataDir(ShowDataDirCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}

impl Cli {
    /// The global flags, detached from the subcommand.
    pub fn global_options(&self) -> GlobalOptions {
        GlobalOptions {
            verbose: self.verbose,
            quiet: self.quiet,
            data_dir: self.data_dir.clone(),
            busy_timeout: self.busy_timeout,
            disable_autoinit: self.disable_autoinit,
        }
    }
}

impl Command {
    /// Runs the selected subcommand.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        match self {
            Self::Init(cmd) => cmd.execute(global),
            Self::Serve(cmd) => cmd.execute(global),
            Self::Reserve(cmd) => cmd.execute(global),
            Self::Availability(cmd) => cmd.execute(global),
            Self::List(cmd) => cmd.execute(global),
            Self::Subscribe(cmd) => cmd.execute(global),
            Self::Seed(cmd) => cmd.execute(global),
            Self::SeedCapacity(cmd) => cmd.execute(global),
            Self::Validate(cmd) => cmd.execute(global),
            Self::ShowDataDir(cmd) => cmd.execute(global),
            Self::Completions(cmd) => cmd.execute(global),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["fausse", "list", "--quiet", "--data-dir", "/tmp/x"]).unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        assert!(matches!(cli.command, Command::List(_)));

        let global = cli.global_options();
        assert!(global.quiet);
        assert!(!global.disable_autoinit);
    }
}
