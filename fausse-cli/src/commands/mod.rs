//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `init`: Initialize the data directory and database
//! - `serve`: Run the HTTP API
//! - `reserve`: Book a table
//! - `availability`: Check whether a slot can take a party
//! - `list`: List reservations
//! - `subscribe`: Subscribe an email to the newsletter
//! - `seed`: Fill the coming days with demo reservations
//! - `seed_capacity`: Set up a full slot and an almost full slot
//! - `validate`: Validate configuration file
//! - `show_data_dir`: Show resolved data directory path
//! - `completions`: Generate shell completion scripts

pub mod availability;
pub mod completions;
pub mod init;
pub mod list;
pub mod reserve;
pub mod seed;
pub mod serve;
pub mod show_data_dir;
pub mod subscribe;
pub mod validate;

pub use availability::AvailabilityCommand;
pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use reserve::ReserveCommand;
pub use seed::{SeedCapacityCommand, SeedCommand};
pub use serve::ServeCommand;
pub use show_data_dir::ShowDataDirCommand;
pub use subscribe::SubscribeCommand;
pub use validate::ValidateCommand;
