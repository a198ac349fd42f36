//! First-run setup of the data directory.
//!
//! `init` is the only operation allowed to delete a database: with
//! `overwrite` it discards the existing file and its WAL sidecars before
//! creating a fresh schema.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::loader::USER_CONFIG_FILE;
use crate::database::{Database, DatabaseConfig, DATABASE_FILE};
use crate::error::{Error, Result};

/// Options for [`init_database`].
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Data directory to initialize.
    pub data_dir: PathBuf,
    /// Replace an existing database.
    pub overwrite: bool,
    /// Write [`DEFAULT_CONFIG_TEMPLATE`] unless a config file exists.
    pub create_config: bool,
}

impl InitOptions {
    /// Options that create the database only.
    #[must_use]
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            overwrite: false,
            create_config: false,
        }
    }

    /// Sets whether an existing database is replaced.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets whether the default configuration file is written.
    #[must_use]
    pub fn with_create_config(mut self, create_config: bool) -> Self {
        self.create_config = create_config;
        self
    }

    /// Path of the database file inside the data directory.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }
}

/// What [`init_database`] did.
#[derive(Debug)]
pub struct InitResult {
    /// The data directory did not exist before.
    pub data_dir_created: bool,
    /// A fresh database was created.
    pub database_created: bool,
    /// Confirmed reservations lost by overwriting.
    pub reservations_discarded: usize,
    /// The default configuration file was written.
    pub config_created: bool,
    /// The initialized data directory.
    pub data_dir: PathBuf,
}

/// Commented `config.yaml` written by `init`, showing each key with its default or an example.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Fausse configuration file
# Values shown are the built-in defaults. FAUSSE_* environment variables
# and fausse.yaml project files override this file.

# restaurant:
#   seats: 50           # seats shared by every overlapping seating
#   tables: 30          # 0 disables table assignment

# seating:
#   duration_minutes: 90
#   slot_interval_minutes: 30

# service_hours:
#   open: "17:00"
#   last_seating: "23:00"

# server:
#   bind: "127.0.0.1:8080"
#   allowed_origins: []  # empty allows any origin

# admin:
#   token: "change-me"   # enables /api/admin routes

# maximum_lock_wait_seconds: 5
"#;

/// Counts confirmed reservations in an existing database file.
fn confirmed_reservations(db_path: &Path) -> Result<usize> {
    let db = Database::open(DatabaseConfig::new(db_path))?;
    Ok(Database::list_all_reservations(db.connection())?
        .iter()
        .filter(|r| r.counts_against_capacity())
        .count())
}

fn remove_database(db_path: &Path) -> Result<()> {
    fs::remove_file(db_path)?;
    for suffix in ["-wal", "-shm"] {
        let mut sidecar = db_path.as_os_str().to_owned();
        sidecar.push(suffix);
        match fs::remove_file(&sidecar) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Initializes the data directory and reservation database.
///
/// The directory is created when missing. An existing database is only
/// replaced with `overwrite`; an existing configuration file is never
/// touched.
///
/// # Errors
///
/// Returns [`Error::Validation`] on field `database` if the database exists
/// and `overwrite` is false, or an I/O or database error.
///
/// # Examples
///
/// ```no_run
/// use fausse::operations::init::{init_database, InitOptions};
/// use std::path::PathBuf;
///
/// let options = InitOptions::new(PathBuf::from("/tmp/fausse-test")).with_create_config(true);
/// let result = init_database(&options).unwrap();
/// assert!(result.database_created);
/// ```
pub fn init_database(options: &InitOptions) -> Result<InitResult> {
    let data_dir_created = !options.data_dir.exists();
    if data_dir_created {
        fs::create_dir_all(&options.data_dir)?;
    }

    let db_path = options.database_path();
    let mut reservations_discarded = 0;
    if db_path.exists() {
        if !options.overwrite {
            return Err(Error::Validation {
                field: "database".into(),
                message: format!(
                    "Database already exists at {}. Use --overwrite to replace it.",
                    db_path.display()
                ),
            });
        }
        // An unreadable file is replaced all the same
        reservations_discarded = confirmed_reservations(&db_path).unwrap_or(0);
        remove_database(&db_path)?;
        log::warn!(
            "Replacing database at {} ({reservations_discarded} reservations discarded)",
            db_path.display()
        );
    }

    Database::open(DatabaseConfig::new(&db_path))?;
    log::info!("Initialized database at {}", db_path.display());

    let config_path = options.data_dir.join(USER_CONFIG_FILE);
    let config_created = options.create_config && !config_path.exists();
    if config_created {
        fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)?;
    }

    Ok(InitResult {
        data_dir_created,
        database_created: true,
        reservations_discarded,
        config_created,
        data_dir: options.data_dir.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::AvailabilityChecker;
    use crate::config::{BookingPolicy, Config, ConfigValidator};
    use crate::database::test_util::draft_at;
    use chrono::{NaiveDate, Utc};
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_directory_and_schema() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("fausse");

        let result = init_database(&InitOptions::new(data_dir.clone())).unwrap();

        assert!(result.data_dir_created);
        assert!(result.database_created);
        assert!(!result.config_created);
        let db = Database::open(DatabaseConfig::new(data_dir.join(DATABASE_FILE))).unwrap();
        assert!(Database::list_all_reservations(db.connection()).unwrap().is_empty());
    }

    #[test]
    fn test_init_refuses_existing_database() {
        let temp = TempDir::new().unwrap();
        let options = InitOptions::new(temp.path().to_path_buf());
        init_database(&options).unwrap();

        match init_database(&options) {
            Err(Error::Validation { field, message }) => {
                assert_eq!(field, "database");
                assert!(message.contains("--overwrite"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_overwrite_reports_discarded_reservations() {
        let temp = TempDir::new().unwrap();
        let options = InitOptions::new(temp.path().to_path_buf());
        init_database(&options).unwrap();

        {
            let mut db = Database::open(DatabaseConfig::new(options.database_path())).unwrap();
            let checker = AvailabilityChecker::new(BookingPolicy::default());
            let at = NaiveDate::from_ymd_opt(2030, 6, 1)
                .unwrap()
                .and_hms_opt(19, 0, 0)
                .unwrap();
            db.reserve_atomic(&draft_at(at, 2), &checker, Utc::now()).unwrap();
            db.reserve_atomic(&draft_at(at, 4), &checker, Utc::now()).unwrap();
        }

        let result = init_database(&options.clone().with_overwrite(true)).unwrap();
        assert!(!result.data_dir_created);
        assert_eq!(result.reservations_discarded, 2);

        let db = Database::open(DatabaseConfig::new(options.database_path())).unwrap();
        assert!(Database::list_all_reservations(db.connection()).unwrap().is_empty());
    }

    #[test]
    fn test_template_uncomments_to_valid_config() {
        let temp = TempDir::new().unwrap();
        let options = InitOptions::new(temp.path().to_path_buf()).with_create_config(true);
        assert!(init_database(&options).unwrap().config_created);

        let written = fs::read_to_string(temp.path().join(USER_CONFIG_FILE)).unwrap();
        assert_eq!(written, DEFAULT_CONFIG_TEMPLATE);

        // Header comments stay comments; every other "# " line is a setting
        let uncommented: String = written
            .lines()
            .skip(3)
            .filter_map(|line| line.strip_prefix("# "))
            .map(|line| format!("{line}\n"))
            .collect();
        let parsed: Config = serde_yaml::from_str(&uncommented).unwrap();
        ConfigValidator::validate(&parsed).unwrap();
        assert_eq!(parsed.seats(), 50);
    }

    #[test]
    fn test_existing_config_is_kept() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join(USER_CONFIG_FILE);
        fs::write(&config_path, "restaurant:\n  seats: 12\n").unwrap();

        let options = InitOptions::new(temp.path().to_path_buf()).with_create_config(true);
        assert!(!init_database(&options).unwrap().config_created);
        assert_eq!(
            fs::read_to_string(&config_path).unwrap(),
            "restaurant:\n  seats: 12\n"
        );
    }
}
