//! Availability command implementation.
//!
//! Prints `available REMAINING` or `unavailable REMAINING REASON` for one
//! slot, or one such line per slot of the day when no time is given.

use crate::error::CliError;
use crate::utils::{
    booking_policy, load_configuration, open_database, parse_date_arg, parse_party_arg,
    parse_time_arg, GlobalOptions,
};
use clap::Args;
use fausse::slot::TIME_FORMAT;
use fausse::{Availability, AvailabilityChecker, Slot};

/// Check whether a slot can take a party.
#[derive(Args)]
pub struct AvailabilityCommand {
    /// Date of the visit (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date: String,

    /// Seating time (HH:MM); every slot of the day when omitted
    #[arg(long, value_name = "TIME")]
    pub time: Option<String>,

    /// Number of guests
    #[arg(long, value_name = "N")]
    pub party_size: u32,
}

fn describe(availability: &Availability) -> String {
    match availability {
        Availability::Available {
            remaining_capacity, ..
        } => format!("available {remaining_capacity}"),
        Availability::Unavailable {
            remaining_capacity,
            reason,
        } => format!("unavailable {remaining_capacity} {}", reason.as_str()),
    }
}

impl AvailabilityCommand {
    /// Execute the availability command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let date = parse_date_arg(&self.date)?;
        let party = parse_party_arg(self.party_size)?;

        let config = load_configuration(global)?;
        let checker = AvailabilityChecker::new(booking_policy(&config)?);
        let db = open_database(global, &config)?;

        match self.time {
            Some(time) => {
                let slot = Slot::new(date, parse_time_arg(&time)?);
                let availability = checker.check(db.connection(), slot, party)?;
                println!("{}", describe(&availability));
            }
            None => {
                for (slot, availability) in checker.check_day(db.connection(), date, party)? {
                    println!(
                        "{}\t{}",
                        slot.time().format(TIME_FORMAT),
                        describe(&availability)
                    );
                }
            }
        }

        Ok(())
    }
}
