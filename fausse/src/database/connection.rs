//! Database connection management.
//!
//! This module provides the main database connection type with proper
//! initialization and PRAGMA settings for concurrent `SQLite` access.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::config::DatabaseConfig;

/// A database connection wrapper with configuration.
///
/// Every process and every HTTP request opens its own `Database`; `SQLite`
/// in WAL mode arbitrates between them.
///
/// # Examples
///
/// ```no_run
/// use fausse::database::{Database, DatabaseConfig};
///
/// let config = DatabaseConfig::new("/tmp/fausse.db");
/// let db = Database::open(config).unwrap();
/// ```
#[derive(Debug)]
pub struct Database {
    pub(super) conn: Connection,
    config: DatabaseConfig,
}

impl Database {
    /// Opens a database connection with the given configuration.
    ///
    /// This function will:
    /// - Create the parent directory when the mode allows creating the file
    /// - Open the database with appropriate flags
    /// - Set WAL mode for concurrent access
    /// - Configure busy timeout
    /// - Initialize or verify the database schema
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The database file cannot be opened
    /// - The parent directory cannot be created
    /// - PRAGMA settings cannot be applied
    /// - Schema initialization or verification fails
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        if !config.path.exists() {
            if !config.mode.creates() {
                return Err(Error::DataDirectoryNotFound {
                    path: config.data_dir().to_path_buf(),
                });
            }
            std::fs::create_dir_all(config.data_dir())?;
        }

        let conn = Connection::open_with_flags(&config.path, config.mode.flags())?;
        log::trace!("Opened database at {}", config.path.display());

        // PRAGMA journal_mode returns a row, so it goes through query_row
        let _: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
        conn.execute_batch("PRAGMA synchronous = NORMAL")?;
        conn.busy_timeout(config.busy_timeout)?;

        super::migrations::check_schema_compatibility(&conn)?;

        Ok(Self { conn, config })
    }

    /// Opens a private in-memory database with the current schema.
    ///
    /// Used by tests and benchmarks that need a store without a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    ///
    /// # Examples
    ///
    /// ```
    /// use fausse::Database;
    ///
    /// let db = Database::open_in_memory().unwrap();
    /// assert!(Database::list_all_reservations(db.connection()).unwrap().is_empty());
    /// ```
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        super::migrations::initialize_schema(&conn)?;
        Ok(Self {
            conn,
            config: DatabaseConfig::new(":memory:"),
        })
    }

    /// Returns the configuration this connection was opened with.
    #[must_use]
    pub const fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Returns a reference to the underlying `SQLite` connection.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Returns a mutable reference to the underlying `SQLite` connection.
    ///
    /// Needed for operations that open their own transaction.
    pub fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}
