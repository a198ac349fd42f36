//! Init command implementation.
//!
//! Creates the data directory, the reservation database and, on request,
//! a commented `config.yaml` listing every setting with its default.

use crate::error::CliError;
use crate::utils::{resolve_data_dir, GlobalOptions};
use clap::Parser;
use fausse::config::loader::USER_CONFIG_FILE;
use fausse::database::DATABASE_FILE;
use fausse::operations::init::{init_database, InitOptions, InitResult};
use std::path::{Path, PathBuf};

/// Initialize the data directory and database.
#[derive(Parser)]
#[command(about = "Initialize the data directory and database")]
pub struct InitCommand {
    /// Data directory to initialize (defaults to the global --data-dir)
    #[arg(long, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Replace an existing database, discarding every reservation
    #[arg(long)]
    overwrite: bool,

    /// Write a commented default configuration file
    #[arg(long)]
    with_config: bool,

    /// Preview actions without executing
    #[arg(long)]
    dry_run: bool,
}

/// Lines describing what `init` would do in `data_dir`.
fn planned_steps(data_dir: &Path, overwrite: bool, with_config: bool) -> Vec<String> {
    let mut steps = Vec::new();

    if data_dir.exists() {
        steps.push(format!("Use existing data directory {}", data_dir.display()));
    } else {
        steps.push(format!("Create data directory {}", data_dir.display()));
    }

    let db_path = data_dir.join(DATABASE_FILE);
    match (db_path.exists(), overwrite) {
        (false, _) => steps.push(format!("Create database {}", db_path.display())),
        (true, true) => steps.push(format!("Recreate database {}", db_path.display())),
        (true, false) => steps.push(format!(
            "Refuse: database {} exists (use --overwrite)",
            db_path.display()
        )),
    }

    if with_config {
        let config_path = data_dir.join(USER_CONFIG_FILE);
        if config_path.exists() {
            steps.push(format!("Keep existing {}", config_path.display()));
        } else {
            steps.push(format!("Write default {}", config_path.display()));
        }
    }

    steps
}

fn report(result: &InitResult, overwrite: bool, with_config: bool) {
    println!("Initialized fausse in: {}", result.data_dir.display());
    if result.data_dir_created {
        println!("  - Created data directory");
    }
    if result.database_created {
        let verb = if overwrite { "Recreated" } else { "Created" };
        println!("  - {verb} {DATABASE_FILE}");
    }
    if result.reservations_discarded > 0 {
        println!(
            "  - Discarded {} confirmed reservations",
            result.reservations_discarded
        );
    }
    if result.config_created {
        println!("  - Wrote {USER_CONFIG_FILE}");
    } else if with_config {
        println!("  - Kept existing {USER_CONFIG_FILE}");
    }
}

impl InitCommand {
    /// Execute the init command.
    ///
    /// `--disable-autoinit` is ignored here: initializing is the point.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = match self.data_dir {
            Some(dir) => dir,
            None => resolve_data_dir(global)?,
        };

        if self.dry_run {
            println!("Dry-run mode: no changes will be made");
            for step in planned_steps(&data_dir, self.overwrite, self.with_config) {
                println!("  - {step}");
            }
            return Ok(());
        }

        let options = InitOptions::new(data_dir)
            .with_overwrite(self.overwrite)
            .with_create_config(self.with_config);
        let result = init_database(&options)?;

        report(&result, self.overwrite, self.with_config);
        Ok(())
    }
}
