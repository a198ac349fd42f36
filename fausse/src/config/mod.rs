//! Restaurant settings: capacity, seating length, slot grid, service hours,
//! server binding and the admin token.
//!
//! Layers, lowest first; each set field overrides the layers below it:
//!
//! | layer                | source                                  |
//! |----------------------|-----------------------------------------|
//! | built-in defaults    | [`Config::builtin`]                     |
//! | user file            | `config.yaml` in the data directory     |
//! | project file         | nearest `fausse.yaml`                   |
//! | private project file | `fausse.local.yaml` beside it           |
//! | environment          | `FAUSSE_*` variables                    |
//! | programmatic         | [`ConfigBuilder::with_config`]          |
//!
//! The merged [`Config`] is validated once and then turned into a
//! [`BookingPolicy`], which is what the reservation code consumes.
//!
//! # Examples
//!
//! Loading from a specific directory:
//!
//! ```no_run
//! use fausse::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/srv/cafe"))
//!     .build()
//!     .unwrap();
//! println!("{} seats", config.seats());
//! ```
//!
//! Programmatic configuration:
//!
//! ```
//! use fausse::config::{BookingPolicy, Config, ConfigBuilder, SeatingConfig};
//!
//! let custom = Config {
//!     seating: Some(SeatingConfig { duration_minutes: Some(120), slot_interval_minutes: None }),
//!     ..Default::default()
//! };
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(custom)
//!     .build()
//!     .unwrap();
//!
//! let policy = BookingPolicy::from_config(&config).unwrap();
//! assert_eq!(policy.seating_duration().num_minutes(), 120);
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod policy;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLayer, ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use policy::BookingPolicy;
pub use schema::{
    AdminConfig, Config, RestaurantConfig, SeatingConfig, ServerConfig, ServiceHoursConfig,
};
pub use validator::ConfigValidator;
