//! Schema creation and version gating.
//!
//! There is a single schema version. A file without a `metadata` table is
//! treated as fresh and gets the full schema; any other recorded version is
//! refused rather than migrated.

use rusqlite::{Connection, OptionalExtension};

use crate::error::{Error, Result};

use super::schema::{
    CREATE_METADATA_TABLE, CREATE_RESERVATIONS_TABLE, CREATE_STARTS_AT_INDEX,
    CREATE_SUBSCRIBERS_TABLE, CREATE_TABLE_ASSIGNMENT_INDEX, CURRENT_SCHEMA_VERSION,
    INSERT_SCHEMA_VERSION, SELECT_SCHEMA_VERSION,
};

/// Statements creating the schema, in dependency order.
const SCHEMA_STATEMENTS: [&str; 5] = [
    CREATE_METADATA_TABLE,
    CREATE_RESERVATIONS_TABLE,
    CREATE_STARTS_AT_INDEX,
    CREATE_TABLE_ASSIGNMENT_INDEX,
    CREATE_SUBSCRIBERS_TABLE,
];

fn has_metadata_table(conn: &Connection) -> Result<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'metadata'",
            [],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Creates every table and index and records [`CURRENT_SCHEMA_VERSION`].
///
/// All statements are idempotent, so running this on an initialized
/// database only rewrites the version row.
///
/// # Errors
///
/// Returns an error if a statement fails.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use fausse::database::{get_schema_version, initialize_schema};
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// assert_eq!(get_schema_version(&conn).unwrap(), 1);
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])?;
    }
    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;
    log::debug!("Created schema version {CURRENT_SCHEMA_VERSION}");
    Ok(())
}

/// Returns the recorded schema version, or 0 for an uninitialized database.
///
/// # Errors
///
/// Returns [`Error::Database`] if the stored version is not an integer or
/// the query fails.
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    if !has_metadata_table(conn)? {
        return Ok(0);
    }

    let stored: Option<String> = conn
        .query_row(SELECT_SCHEMA_VERSION, [], |row| row.get(0))
        .optional()?;

    match stored {
        None => Ok(0),
        Some(text) => text.parse().map_err(|e| {
            Error::Database(rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(e),
            ))
        }),
    }
}

/// Initializes a fresh database and refuses one written by another version.
///
/// Called on every [`Database::open`](super::Database::open).
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] when the recorded version is
/// not [`CURRENT_SCHEMA_VERSION`], or a database error.
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    match get_schema_version(conn)? {
        0 => initialize_schema(conn),
        CURRENT_SCHEMA_VERSION => Ok(()),
        found => Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION.unsigned_abs(),
            found: found.unsigned_abs(),
        }),
    }
}
