//! Database layer for persistent storage of reservations and subscribers.
//!
//! This module provides a SQLite-based store with connection management,
//! schema versioning, queries, and the transactional reserve path.
//!
//! # Examples
//!
//! ```no_run
//! use chrono::{NaiveDate, Utc};
//! use fausse::database::{Database, DatabaseConfig};
//! use fausse::{AvailabilityChecker, BookingPolicy, NewReservation, PartySize, Slot};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/fausse.db")).unwrap();
//! let checker = AvailabilityChecker::new(BookingPolicy::default());
//!
//! let slot = Slot::parse("2030-06-01", "19:00").unwrap();
//! let draft = NewReservation::builder("Riley Nguyen", "riley@example.com", PartySize::try_from(3_u32).unwrap(), slot)
//!     .build()
//!     .unwrap();
//! db.reserve_atomic(&draft, &checker, Utc::now()).unwrap();
//!
//! let date = NaiveDate::from_ymd_opt(2030, 6, 1).unwrap();
//! for reservation in Database::list_reservations_on(db.connection(), date).unwrap() {
//!     println!("{} party of {}", reservation.slot(), reservation.party_size());
//! }
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;
mod transaction;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{
    default_data_dir, resolve_database_path, DatabaseConfig, OpenMode, DATABASE_FILE, DATA_DIR_ENV,
};
pub use connection::Database;

pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
