//! `show-data-dir`: print where fausse keeps its files.

use crate::error::CliError;
use crate::utils::{resolve_data_dir, GlobalOptions};
use clap::Args;
use fausse::config::loader::USER_CONFIG_FILE;
use fausse::database::DATABASE_FILE;

/// Show the resolved data directory path.
#[derive(Args)]
pub struct ShowDataDirCommand {
    /// Also list the database and config file paths, marking missing ones
    #[arg(long)]
    files: bool,
}

impl ShowDataDirCommand {
    /// Prints the data directory, then each file when `--files` is given.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let data_dir = resolve_data_dir(global)?;
        println!("{}", data_dir.display());

        if self.files {
            for name in [DATABASE_FILE, USER_CONFIG_FILE] {
                let path = data_dir.join(name);
                let marker = if path.exists() { "" } else { " (missing)" };
                println!("{}{marker}", path.display());
            }
        }
        Ok(())
    }
}
