//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers for common patterns
//! - Dates that stay in the future whenever the tests run

use assert_cmd::Command;
use chrono::{Days, Local};
use std::path::PathBuf;
use tempfile::TempDir;

/// Environment variables that would leak host settings into a test run.
const SCRUBBED_ENV: &[&str] = &[
    "FAUSSE_DATA_DIR",
    "FAUSSE_BUSY_TIMEOUT",
    "FAUSSE_DISABLE_AUTOINIT",
    "FAUSSE_LOG_MODE",
    "FAUSSE_OUTPUT_FORMAT",
    "FAUSSE_SEATS",
    "FAUSSE_TABLES",
    "FAUSSE_SEATING_MINUTES",
    "FAUSSE_SLOT_INTERVAL_MINUTES",
    "FAUSSE_OPEN",
    "FAUSSE_LAST_SEATING",
    "FAUSSE_BIND",
    "FAUSSE_ALLOWED_ORIGINS",
    "FAUSSE_ADMIN_TOKEN",
    "FAUSSE_MAXIMUM_LOCK_WAIT_SECONDS",
];

/// Test environment with isolated data directory.
///
/// Commands run from inside the temporary directory so no project
/// `fausse.yaml` from the surrounding checkout is picked up.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the fausse data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; fausse creates it on first use.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("fausse-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// Get a bare command builder without pre-configured flags.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("fausse").expect("Failed to find fausse binary");
        cmd.current_dir(&self.temp_path);
        for var in SCRUBBED_ENV {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Write a project configuration file into the working directory.
    pub fn write_project_config(&self, yaml: &str) {
        std::fs::write(self.temp_path.join("fausse.yaml"), yaml)
            .expect("Failed to write fausse.yaml");
    }

    /// Book a party at `time` on the test date and return the reservation id.
    ///
    /// # Panics
    /// Panics if the reserve command fails or doesn't print an id.
    pub fn reserve(&self, name: &str, party_size: u32, time: &str) -> i64 {
        let output = self
            .command()
            .args(["reserve", "--name", name])
            .args(["--email", &format!("{}@example.com", name.to_lowercase())])
            .args(["--party-size", &party_size.to_string()])
            .args(["--date", &future_date(), "--time", time])
            .output()
            .expect("Failed to run reserve command");

        assert!(
            output.status.success(),
            "Reserve failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout)
            .expect("Invalid UTF-8 in output")
            .trim()
            .parse()
            .expect("Output is not a reservation id")
    }
}

/// A date four weeks ahead, as `YYYY-MM-DD`.
#[allow(dead_code)]
pub fn future_date() -> String {
    Local::now()
        .date_naive()
        .checked_add_days(Days::new(28))
        .expect("date in range")
        .format("%Y-%m-%d")
        .to_string()
}
