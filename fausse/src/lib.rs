#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![warn(rustdoc::broken_intra_doc_links)]

//! # fausse
//!
//! Reservation backend for the Café Fausse restaurant.
//!
//! A reservation request travels through a fixed pipeline:
//! validation, an availability check against the seats and tables left in
//! the requested seating, and an atomic insert into SQLite. The same library
//! powers the HTTP API ([`server`]) and the `fausse` command-line tool.
//!
//! ## Core Types
//!
//! - [`ReservationRequest`]: raw client input and its validator
//! - [`AvailabilityChecker`] and [`Availability`]: capacity decisions
//! - [`Database`]: the SQLite reservation store
//! - [`BookingPolicy`]: seats, tables, seating length and service hours
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use fausse::{BookingPolicy, ReservationRequest};
//!
//! let policy = BookingPolicy::default();
//! let request = ReservationRequest::new("Avery Chen", "avery@example.com", 4, "2030-06-01", "19:00");
//! let now = NaiveDate::from_ymd_opt(2030, 5, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
//!
//! let draft = request.validate(&policy, now).unwrap();
//! assert_eq!(draft.party_size().value(), 4);
//! ```

pub mod availability;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod newsletter;
pub mod operations;
pub mod party;
pub mod reservation;
pub mod server;
pub mod slot;

pub use availability::{Availability, AvailabilityChecker, Occupancy, SlotLedger};
pub use config::{BookingPolicy, Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, Result, UnavailableReason};
pub use logging::{init_logger, LogLevel, Logger};
pub use newsletter::Subscriber;
pub use operations::{
    ExecutionResult, OperationPlan, PlanAction, PlanExecutor, ReserveOptions, ReservePlan,
};
pub use party::PartySize;
pub use reservation::request::{FieldError, ReservationRequest, TextInput, ValidationErrors};
pub use reservation::{NewReservation, Reservation, ReservationId, ReservationStatus};
pub use slot::{Slot, TimeWindow};
