//! Reservation operations using the plan-execute pattern.
//!
//! This module separates planning from execution to enable dry-run mode,
//! better testing, and clear error messages.
//!
//! # Architecture
//!
//! Operations are split into two phases:
//! 1. **Planning**: validates the request, checks availability, builds a plan
//! 2. **Execution**: applies the plan in one transaction, re-checking
//!    availability under the write lock
//!
//! # Examples
//!
//! ```no_run
//! use fausse::config::ConfigBuilder;
//! use fausse::operations::{PlanExecutor, ReserveOptions, ReservePlan};
//! use fausse::{AvailabilityChecker, BookingPolicy, Database, DatabaseConfig, ReservationRequest};
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/fausse.db")).unwrap();
//! let config = ConfigBuilder::new().build().unwrap();
//! let policy = BookingPolicy::from_config(&config).unwrap();
//!
//! let request = ReservationRequest::new("Samira Ali", "samira@example.com", 5, "2030-06-01", "18:30");
//!
//! // Generate plan
//! let plan = ReservePlan::new(ReserveOptions::now(request), &policy)
//!     .build_plan(db.connection())
//!     .unwrap();
//!
//! // Execute plan
//! let checker = AvailabilityChecker::new(policy);
//! let result = PlanExecutor::new(&mut db, &checker).execute(&plan).unwrap();
//! ```

pub mod executor;
pub mod init;
pub mod plan;
pub mod reserve;
pub mod seed;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use executor::{ExecutionResult, PlanExecutor};
pub use init::{init_database, InitOptions, InitResult};
pub use plan::{OperationPlan, PlanAction};
pub use reserve::{ReserveOptions, ReservePlan};
pub use seed::{seed_capacity_scenario, seed_demo, CapacitySummary, SeedMode, SeedOptions, SeedSummary};
