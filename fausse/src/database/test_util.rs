//! Shared test utilities for database unit tests.

use chrono::{NaiveDateTime, TimeDelta};
use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::party::PartySize;
use crate::reservation::{NewReservation, Reservation};
use crate::slot::Slot;

/// Creates a file-backed test database in a temporary directory.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Keep the directory alive for the lifetime of the test process
    std::mem::forget(dir);

    db
}

/// Creates a valid draft for a guest party at `starts_at`.
///
/// # Panics
///
/// Panics if `party` is zero.
#[must_use]
pub fn draft_at(starts_at: NaiveDateTime, party: u32) -> NewReservation {
    NewReservation::builder(
        "Test Guest",
        "guest@example.com",
        PartySize::try_from(party).unwrap(),
        Slot::at(starts_at),
    )
    .build()
    .unwrap()
}

/// Most guests seated at any one moment across `reservations`.
///
/// Occupancy only changes when a seating starts, so checking every start
/// instant covers the whole timeline.
#[must_use]
pub fn peak_seated(reservations: &[Reservation], duration: TimeDelta) -> u32 {
    let held: Vec<_> = reservations
        .iter()
        .filter(|r| r.counts_against_capacity())
        .collect();
    held.iter()
        .map(|start| {
            let instant = start.slot().starts_at();
            held.iter()
                .filter(|r| r.seating(duration).contains(instant))
                .map(|r| r.party_size().value())
                .sum::<u32>()
        })
        .max()
        .unwrap_or(0)
}
