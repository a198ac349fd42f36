//! Database schema definitions and SQL constants.
//!
//! Times are stored as integers: `starts_at` holds the seconds of the naive
//! local date-time of the seating, `created_at` holds Unix seconds in UTC.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the reservations table.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        phone TEXT,
        party_size INTEGER NOT NULL CHECK (party_size > 0),
        starts_at INTEGER NOT NULL,
        table_number INTEGER CHECK (table_number IS NULL OR table_number > 0),
        status TEXT NOT NULL DEFAULT 'confirmed'
            CHECK (status IN ('confirmed', 'cancelled')),
        created_at INTEGER NOT NULL
    )";

/// SQL statement to create an index on the `starts_at` column.
///
/// Every availability check is a range scan over this column.
pub const CREATE_STARTS_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_starts_at ON reservations(starts_at)";

/// SQL statement to create the table assignment guard.
///
/// Two confirmed reservations starting together can never hold the same table.
pub const CREATE_TABLE_ASSIGNMENT_INDEX: &str = r"
    CREATE UNIQUE INDEX IF NOT EXISTS idx_reservations_table_slot
    ON reservations(starts_at, table_number)
    WHERE status = 'confirmed' AND table_number IS NOT NULL";

/// SQL statement to create the newsletter subscribers table.
pub const CREATE_SUBSCRIBERS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS newsletter_subscribers (
        email TEXT PRIMARY KEY NOT NULL,
        created_at INTEGER NOT NULL
    )";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// Column list shared by every reservation query.
pub const RESERVATION_COLUMNS: &str =
    "id, name, email, phone, party_size, starts_at, table_number, status, created_at";

/// SQL statement to insert a confirmed reservation.
pub const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (name, email, phone, party_size, starts_at, table_number, status, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'confirmed', ?7)
";

/// SQL statement to subscribe an email, ignoring duplicates.
pub const INSERT_SUBSCRIBER: &str =
    "INSERT OR IGNORE INTO newsletter_subscribers (email, created_at) VALUES (?1, ?2)";

/// SQL statement to read a subscriber by email.
pub const SELECT_SUBSCRIBER: &str =
    "SELECT email, created_at FROM newsletter_subscribers WHERE email = ?1";
