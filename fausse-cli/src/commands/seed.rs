//! Seed commands.
//!
//! `seed` fills the coming days with demo reservations; `seed-capacity` sets
//! up one full slot and one slot with room for a single two-seat party.
//! Both book through the normal availability checks.

use crate::error::CliError;
use crate::utils::{booking_policy, load_configuration, open_database, GlobalOptions};
use chrono::Local;
use clap::Args;
use fausse::operations::{seed_capacity_scenario, seed_demo, SeedMode, SeedOptions};

/// Fill the coming days with demo reservations.
#[derive(Args)]
pub struct SeedCommand {
    /// Number of days to seed, starting today
    #[arg(long, value_name = "DAYS", default_value_t = 7)]
    pub days: u32,

    /// First seating hour
    #[arg(long, value_name = "HOUR", default_value_t = 17)]
    pub start_hour: u32,

    /// Last seating hour
    #[arg(long, value_name = "HOUR", default_value_t = 23)]
    pub end_hour: u32,

    /// Minutes between seeded slots
    #[arg(long, value_name = "MINUTES", default_value_t = 30)]
    pub step: u32,

    /// Book only three parties per slot
    #[arg(long)]
    pub small: bool,

    /// Do not fill the 19:00 demo slot
    #[arg(long)]
    pub no_full_slot: bool,

    /// Delete every reservation first
    #[arg(long)]
    pub wipe: bool,
}

impl SeedCommand {
    fn options(&self) -> SeedOptions {
        SeedOptions {
            days: self.days,
            start_hour: self.start_hour,
            end_hour: self.end_hour,
            step_minutes: self.step,
            mode: if self.small {
                SeedMode::Small
            } else {
                SeedMode::Normal
            },
            fully_book_demo: !self.no_full_slot,
            wipe: self.wipe,
            today: Local::now().date_naive(),
        }
    }

    /// Execute the seed command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let policy = booking_policy(&config)?;
        let mut db = open_database(global, &config)?;

        let summary = seed_demo(&mut db, &policy, &self.options())?;

        println!(
            "Created {} reservations across {} slots",
            summary.created_reservations, summary.created_slots
        );
        Ok(())
    }
}

/// Set up a full slot and an almost full slot.
#[derive(Args)]
pub struct SeedCapacityCommand {
    /// Days from today
    #[arg(long, value_name = "DAYS", default_value_t = 0)]
    pub day: u32,

    /// Hour of the full slot
    #[arg(long, value_name = "HOUR", default_value_t = 19)]
    pub hour: u32,

    /// Minute of the full slot
    #[arg(long, value_name = "MINUTE", default_value_t = 0)]
    pub minute: u32,
}

impl SeedCapacityCommand {
    /// Execute the seed-capacity command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let policy = booking_policy(&config)?;
        let mut db = open_database(global, &config)?;

        let summary = seed_capacity_scenario(
            &mut db,
            &policy,
            Local::now().date_naive(),
            self.day,
            self.hour,
            self.minute,
        )?;

        println!("full\t{}\t{}", summary.slot_full, summary.created_full);
        println!("almost\t{}\t{}", summary.slot_almost, summary.created_almost);
        Ok(())
    }
}
