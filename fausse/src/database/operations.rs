//! Database operations for reservations and newsletter subscribers.
//!
//! Reads and single-statement writes are associated functions taking a
//! plain [`Connection`], so they run the same inside or outside a
//! transaction. Multi-step writes live in the transaction module.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::Result;
use crate::newsletter::Subscriber;
use crate::party::PartySize;
use crate::reservation::{NewReservation, Reservation, ReservationId, ReservationStatus};
use crate::slot::{from_storage, to_storage, Slot, TimeWindow};

use super::connection::Database;
use super::schema::{
    INSERT_RESERVATION, INSERT_SUBSCRIBER, RESERVATION_COLUMNS, SELECT_SUBSCRIBER,
};

fn conversion_error(
    column: usize,
    ty: Type,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, ty, Box::new(err))
}

#[derive(Debug)]
struct InvalidTimestamp(i64);

impl std::fmt::Display for InvalidTimestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "timestamp {} is out of range", self.0)
    }
}

impl std::error::Error for InvalidTimestamp {}

fn timestamp_to_utc(column: usize, secs: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| conversion_error(column, Type::Integer, InvalidTimestamp(secs)))
}

/// Helper function to deserialize a reservation from a database row.
///
/// Expects the columns of [`RESERVATION_COLUMNS`], in order.
fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let id: i64 = row.get(0)?;
    let name: String = row.get(1)?;
    let email: String = row.get(2)?;
    let phone: Option<String> = row.get(3)?;
    let party_value: i64 = row.get(4)?;
    let starts_secs: i64 = row.get(5)?;
    let table: Option<u32> = row.get(6)?;
    let status: String = row.get(7)?;
    let created_secs: i64 = row.get(8)?;

    let party_size =
        PartySize::try_from(party_value).map_err(|e| conversion_error(4, Type::Integer, e))?;
    let starts_at = from_storage(starts_secs)
        .ok_or_else(|| conversion_error(5, Type::Integer, InvalidTimestamp(starts_secs)))?;
    let status = status
        .parse::<ReservationStatus>()
        .map_err(|e| conversion_error(7, Type::Text, e))?;

    Ok(Reservation {
        id: ReservationId::from(id),
        name,
        email,
        phone,
        party_size,
        slot: Slot::at(starts_at),
        table,
        status,
        created_at: timestamp_to_utc(8, created_secs)?,
    })
}

fn query_reservations<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> Result<Vec<Reservation>> {
    let mut stmt = conn.prepare(sql)?;
    let reservations = stmt
        .query_map(params, row_to_reservation)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(reservations)
}

impl Database {
    /// Inserts a confirmed reservation and returns the stored row.
    ///
    /// This does not check availability; callers that need the capacity
    /// guarantee go through [`Database::reserve_atomic`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Database`](crate::Error::Database) if the insert
    /// violates a constraint or the connection fails.
    pub fn insert_reservation(
        conn: &Connection,
        draft: &NewReservation,
        table: Option<u32>,
        created_at: DateTime<Utc>,
    ) -> Result<Reservation> {
        conn.execute(
            INSERT_RESERVATION,
            params![
                draft.name(),
                draft.email(),
                draft.phone(),
                draft.party_size().value(),
                to_storage(draft.slot().starts_at()),
                table,
                created_at.timestamp(),
            ],
        )?;

        let id = ReservationId::from(conn.last_insert_rowid());
        let created_at = timestamp_to_utc(8, created_at.timestamp())?;
        Ok(Reservation::accepted(id, draft, table, created_at))
    }

    /// Gets a reservation by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use fausse::database::{Database, DatabaseConfig};
    /// use fausse::ReservationId;
    ///
    /// let db = Database::open(DatabaseConfig::new("/tmp/fausse.db")).unwrap();
    /// let reservation = Database::get_reservation(db.connection(), ReservationId::from(1)).unwrap();
    /// ```
    pub fn get_reservation(conn: &Connection, id: ReservationId) -> Result<Option<Reservation>> {
        let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?1");
        let reservation = conn
            .query_row(&sql, [id.value()], row_to_reservation)
            .optional()?;
        Ok(reservation)
    }

    /// Returns confirmed reservations whose seatings overlap `window`.
    ///
    /// `seating` is the length of every stored seating. A row starting at
    /// `s` overlaps `[start, end)` when `start - seating < s < end`. Rows are
    /// ordered by start time, then identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn reservations_in_window(
        conn: &Connection,
        window: &TimeWindow,
        seating: TimeDelta,
    ) -> Result<Vec<Reservation>> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE status = 'confirmed' AND starts_at > ?1 AND starts_at < ?2 \
             ORDER BY starts_at, id"
        );
        query_reservations(
            conn,
            &sql,
            params![
                to_storage(window.start() - seating),
                to_storage(window.end())
            ],
        )
    }

    /// Lists every reservation starting on `date`, in any status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations_on(conn: &Connection, date: NaiveDate) -> Result<Vec<Reservation>> {
        let start = date.and_time(chrono::NaiveTime::MIN);
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE starts_at >= ?1 AND starts_at < ?2 \
             ORDER BY starts_at, id"
        );
        query_reservations(
            conn,
            &sql,
            params![to_storage(start), to_storage(start + TimeDelta::days(1))],
        )
    }

    /// Lists all reservations ordered by start time.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_all_reservations(conn: &Connection) -> Result<Vec<Reservation>> {
        let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations ORDER BY starts_at, id");
        query_reservations(conn, &sql, [])
    }

    /// Deletes every reservation and restarts identifiers at 1.
    ///
    /// Returns the number of rows deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if a statement fails.
    pub fn clear_reservations(conn: &Connection) -> Result<usize> {
        let deleted = conn.execute("DELETE FROM reservations", [])?;
        conn.execute(
            "DELETE FROM sqlite_sequence WHERE name = 'reservations'",
            [],
        )?;
        Ok(deleted)
    }

    /// Subscribes an already normalized email to the newsletter.
    ///
    /// Returns the stored subscriber and `true` if the row was created by
    /// this call, `false` if the email was already subscribed.
    ///
    /// # Errors
    ///
    /// Returns an error if a statement fails.
    pub fn subscribe(
        conn: &Connection,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<(Subscriber, bool)> {
        let inserted = conn.execute(INSERT_SUBSCRIBER, params![email, now.timestamp()])? > 0;
        let subscriber = Self::get_subscriber(conn, email)?.ok_or_else(|| {
            crate::Error::NotFound {
                resource: format!("newsletter subscriber {email}"),
            }
        })?;
        Ok((subscriber, inserted))
    }

    /// Gets a newsletter subscriber by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_subscriber(conn: &Connection, email: &str) -> Result<Option<Subscriber>> {
        let subscriber = conn
            .query_row(SELECT_SUBSCRIBER, [email], |row| {
                Ok(Subscriber {
                    email: row.get(0)?,
                    created_at: timestamp_to_utc(1, row.get(1)?)?,
                })
            })
            .optional()?;
        Ok(subscriber)
    }
}
