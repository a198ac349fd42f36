//! Serve command implementation.
//!
//! Runs the HTTP API on a tokio runtime until interrupted.

use crate::error::CliError;
use crate::utils::{database_config, load_configuration, GlobalOptions};
use clap::Args;
use fausse::server::{serve, AppState};
use fausse::Database;
use std::net::SocketAddr;

/// Run the HTTP API.
#[derive(Args)]
pub struct ServeCommand {
    /// Address to listen on (overrides `server.bind`)
    #[arg(long, value_name = "ADDR", env = "FAUSSE_BIND")]
    pub bind: Option<SocketAddr>,
}

impl ServeCommand {
    /// Execute the serve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;

        let addr = match self.bind {
            Some(addr) => addr,
            None => config.bind().parse().map_err(|e| {
                CliError::Config(format!("invalid bind address '{}': {e}", config.bind()))
            })?,
        };

        // Create or verify the database once before serving
        let db_config = database_config(global, &config)?;
        Database::open(db_config.clone())?;

        let state = AppState::new(&config, db_config)?;
        if state.admin_token().is_none() {
            log::info!("Admin routes disabled: no admin.token configured");
        }

        if !global.quiet {
            eprintln!("Serving reservations on http://{addr}");
        }

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        runtime.block_on(serve(state, addr))?;

        Ok(())
    }
}
