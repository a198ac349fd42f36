//! Reserve command implementation.
//!
//! This module implements the `reserve` command, which books a table
//! through the same validation and availability path as the HTTP API.

use crate::error::CliError;
use crate::utils::{booking_policy, load_configuration, open_database, GlobalOptions};
use clap::Args;
use fausse::{AvailabilityChecker, PlanExecutor, ReservationRequest, ReserveOptions, ReservePlan};

/// Book a table.
#[derive(Args)]
pub struct ReserveCommand {
    /// Customer name
    #[arg(long, value_name = "NAME")]
    pub name: String,

    /// Customer email
    #[arg(long, value_name = "EMAIL")]
    pub email: String,

    /// Customer phone number
    #[arg(long, value_name = "PHONE")]
    pub phone: Option<String>,

    /// Number of guests
    #[arg(long, value_name = "N")]
    pub party_size: i64,

    /// Date of the visit (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date: String,

    /// Seating time (HH:MM)
    #[arg(long, value_name = "TIME")]
    pub time: String,

    /// Also subscribe the email to the newsletter
    #[arg(long)]
    pub newsletter: bool,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl ReserveCommand {
    /// Execute the reserve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        // 1. Load configuration
        let config = load_configuration(global)?;
        let policy = booking_policy(&config)?;

        // 2. Build the request exactly as a client would send it
        let mut request =
            ReservationRequest::new(self.name, self.email, self.party_size, self.date, self.time)
                .with_newsletter_signup(self.newsletter);
        if let Some(phone) = self.phone {
            request = request.with_phone(phone);
        }

        // 3. Open database
        let mut db = open_database(global, &config)?;

        // 4. Build plan
        let plan = ReservePlan::new(ReserveOptions::now(request), &policy)
            .build_plan(db.connection())
            .map_err(CliError::from)?;

        // 5. Execute or dry-run
        if self.dry_run {
            if !global.quiet {
                eprintln!("Dry run - would perform the following actions:");
                for (i, action) in plan.actions.iter().enumerate() {
                    eprintln!("  {}. {}", i + 1, action.description());
                }
                if !plan.warnings.is_empty() {
                    eprintln!("Warnings:");
                    for warning in &plan.warnings {
                        eprintln!("  - {warning}");
                    }
                }
            }
            return Ok(());
        }

        let checker = AvailabilityChecker::new(policy);
        let result = PlanExecutor::new(&mut db, &checker)
            .execute(&plan)
            .map_err(CliError::from)?;

        // 6. Output just the reservation id (shell-friendly) to stdout
        if let Some(reservation) = &result.reservation {
            println!("{}", reservation.id());
        }

        // 7. Print details and warnings to stderr
        if !global.quiet {
            if let Some(reservation) = &result.reservation {
                match reservation.table() {
                    Some(table) => eprintln!("Booked {} at table {table}", reservation.slot()),
                    None => eprintln!("Booked {}", reservation.slot()),
                }
            }
            for warning in &result.warnings {
                eprintln!("Warning: {warning}");
            }
        }

        Ok(())
    }
}
