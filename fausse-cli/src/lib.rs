//! The `fausse` command-line definitions as a library, so the benchmark
//! and the man page build script can reach them.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
