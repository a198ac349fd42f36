//! Command to subscribe an email to the newsletter.

use crate::error::CliError;
use crate::utils::{load_configuration, open_database, GlobalOptions};
use chrono::Utc;
use clap::Args;
use fausse::newsletter::normalize_email;
use fausse::Database;

/// Subscribe an email to the newsletter.
#[derive(Args)]
pub struct SubscribeCommand {
    /// Email address to subscribe
    #[arg(value_name = "EMAIL")]
    pub email: String,
}

impl SubscribeCommand {
    /// Execute the subscribe command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let email =
            normalize_email(&self.email).map_err(|e| CliError::InvalidArguments(e.message))?;

        let config = load_configuration(global)?;
        let mut db = open_database(global, &config)?;

        let (subscriber, created) =
            db.execute_in_transaction(|conn| Database::subscribe(conn, &email, Utc::now()))?;

        if created {
            println!("Subscribed {}", subscriber.email());
        } else {
            println!("{} is already subscribed", subscriber.email());
        }
        Ok(())
    }
}
