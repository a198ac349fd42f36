//! Where the database lives and how it is opened.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::OpenFlags;

use crate::error::{Error, Result};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "FAUSSE_DATA_DIR";

/// File name of the reservation database inside the data directory.
pub const DATABASE_FILE: &str = "fausse.db";

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// How [`Database::open`](super::Database::open) treats the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenMode {
    /// Create the file and its parent directory when missing.
    #[default]
    Create,
    /// Open read-write, failing if the file is missing.
    Existing,
    /// Open read-only, failing if the file is missing.
    ReadOnly,
}

impl OpenMode {
    /// `SQLite` flags for this mode. Connections are never shared between
    /// threads, so the mutex is always off.
    #[must_use]
    pub fn flags(self) -> OpenFlags {
        let access = match self {
            Self::Create => OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
            Self::Existing => OpenFlags::SQLITE_OPEN_READ_WRITE,
            Self::ReadOnly => OpenFlags::SQLITE_OPEN_READ_ONLY,
        };
        access | OpenFlags::SQLITE_OPEN_NO_MUTEX
    }

    /// Whether a missing file may be created.
    #[must_use]
    pub const fn creates(self) -> bool {
        matches!(self, Self::Create)
    }
}

/// Parameters for opening a [`Database`](super::Database).
///
/// # Examples
///
/// ```
/// use fausse::database::{DatabaseConfig, OpenMode};
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new("/tmp/fausse.db")
///     .with_busy_timeout(Duration::from_secs(10))
///     .existing_only();
/// assert_eq!(config.mode, OpenMode::Existing);
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// How long a writer waits on a locked database.
    pub busy_timeout: Duration,
    /// Create, open existing, or open read-only.
    pub mode: OpenMode,
}

impl DatabaseConfig {
    /// A config that creates `path` when missing and waits five seconds on locks.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            mode: OpenMode::Create,
        }
    }

    /// Sets how long to wait for a lock before giving up.
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Refuses to create the database when it is missing.
    #[must_use]
    pub fn existing_only(mut self) -> Self {
        self.mode = OpenMode::Existing;
        self
    }

    /// Opens without write access.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.mode = OpenMode::ReadOnly;
        self
    }

    /// The directory holding the database file.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Returns `~/.fausse`.
///
/// # Errors
///
/// Returns [`Error::Validation`] on field `home_directory` when no home
/// directory can be found.
pub fn default_data_dir() -> Result<PathBuf> {
    let Some(home) = home::home_dir() else {
        return Err(Error::Validation {
            field: "home_directory".into(),
            message: "Cannot determine home directory".into(),
        });
    };
    Ok(home.join(".fausse"))
}

/// Returns the database path under `$FAUSSE_DATA_DIR`, or under
/// [`default_data_dir`] when the variable is unset.
///
/// # Errors
///
/// Returns an error when the variable is unset and there is no home directory.
pub fn resolve_database_path() -> Result<PathBuf> {
    let data_dir = match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => default_data_dir()?,
    };
    Ok(data_dir.join(DATABASE_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_defaults_create_with_five_second_wait() {
        let config = DatabaseConfig::new("/srv/fausse/fausse.db");
        assert_eq!(config.busy_timeout, Duration::from_secs(5));
        assert_eq!(config.mode, OpenMode::Create);
        assert_eq!(config.data_dir(), Path::new("/srv/fausse"));
    }

    #[test]
    fn test_modes_map_to_flags() {
        assert!(OpenMode::Create.flags().contains(OpenFlags::SQLITE_OPEN_CREATE));
        assert!(!OpenMode::Existing.flags().contains(OpenFlags::SQLITE_OPEN_CREATE));
        assert!(OpenMode::ReadOnly.flags().contains(OpenFlags::SQLITE_OPEN_READ_ONLY));
        assert!(OpenMode::Create.creates());
        assert!(!DatabaseConfig::new("x.db").read_only().mode.creates());
    }

    #[test]
    #[serial]
    fn test_resolve_database_path_prefers_env() {
        let saved = std::env::var_os(DATA_DIR_ENV);

        std::env::set_var(DATA_DIR_ENV, "/custom/data");
        assert_eq!(
            resolve_database_path().unwrap(),
            PathBuf::from("/custom/data/fausse.db")
        );

        std::env::remove_var(DATA_DIR_ENV);
        if let Ok(path) = resolve_database_path() {
            assert!(path.ends_with(".fausse/fausse.db"));
        }

        match saved {
            Some(value) => std::env::set_var(DATA_DIR_ENV, value),
            None => std::env::remove_var(DATA_DIR_ENV),
        }
    }
}
