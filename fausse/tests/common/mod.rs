//! Common test utilities for integration tests.
//!
//! This module provides helper functions and fixtures for testing the
//! fausse library against real database files.

use chrono::{Days, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use tempfile::TempDir;

use fausse::database::DatabaseConfig;
use fausse::{Database, NewReservation, PartySize, Reservation, Slot};

/// A database file in a temporary directory.
///
/// The directory is removed when the fixture is dropped.
#[allow(dead_code)]
pub struct TestDb {
    pub dir: TempDir,
    pub config: DatabaseConfig,
}

#[allow(dead_code)]
impl TestDb {
    /// Creates the database file and its schema.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig::new(dir.path().join("fausse.db"));
        // Create the schema once before any concurrent opener races for it
        Database::open(config.clone()).unwrap();
        Self { dir, config }
    }

    /// Opens a new connection to the fixture database.
    pub fn open(&self) -> Database {
        Database::open(self.config.clone()).unwrap()
    }
}

/// A date safely in the future relative to the local clock.
#[allow(dead_code)]
pub fn future_date() -> NaiveDate {
    Local::now().date_naive().checked_add_days(Days::new(30)).unwrap()
}

/// `future_date()` as `YYYY-MM-DD`.
#[allow(dead_code)]
pub fn future_date_str() -> String {
    future_date().format("%Y-%m-%d").to_string()
}

/// A seating start on the future date.
#[allow(dead_code)]
pub fn future_at(hour: u32, minute: u32) -> NaiveDateTime {
    future_date().and_time(NaiveTime::from_hms_opt(hour, minute, 0).unwrap())
}

/// Builds a valid draft for `party` guests starting at `starts_at`.
#[allow(dead_code)]
pub fn draft(name: &str, starts_at: NaiveDateTime, party: u32) -> NewReservation {
    let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
    NewReservation::builder(
        name,
        email,
        PartySize::try_from(party).unwrap(),
        Slot::at(starts_at),
    )
    .build()
    .unwrap()
}

/// Most guests seated at any one start instant.
#[allow(dead_code)]
pub fn peak_seated(reservations: &[Reservation], duration: TimeDelta) -> u32 {
    let held: Vec<_> = reservations
        .iter()
        .filter(|r| r.counts_against_capacity())
        .collect();
    held.iter()
        .map(|start| {
            held.iter()
                .filter(|r| r.seating(duration).contains(start.slot().starts_at()))
                .map(|r| r.party_size().value())
                .sum::<u32>()
        })
        .max()
        .unwrap_or(0)
}
