//! Transaction management utilities.
//!
//! Every write that depends on a prior read runs inside an IMMEDIATE
//! transaction, so the write lock is taken before the read and no other
//! connection can slip a booking in between.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, ErrorCode, TransactionBehavior};

use crate::availability::AvailabilityChecker;
use crate::error::{Error, Result, UnavailableReason};
use crate::reservation::{NewReservation, Reservation};

use super::connection::Database;

/// Maps a busy or locked database to [`Error::LockTimeout`].
fn lock_error(err: rusqlite::Error, seconds: u64) -> Error {
    match err.sqlite_error_code() {
        Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) => Error::LockTimeout { seconds },
        _ => err.into(),
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

impl Database {
    /// Runs `f` inside an IMMEDIATE transaction.
    ///
    /// The transaction commits when `f` returns `Ok` and rolls back
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockTimeout`] if the write lock cannot be acquired
    /// within the busy timeout, or any error returned by `f`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fausse::Database;
    ///
    /// let mut db = Database::open_in_memory().unwrap();
    /// let cleared = db
    ///     .execute_in_transaction(|conn| Database::clear_reservations(conn))
    ///     .unwrap();
    /// assert_eq!(cleared, 0);
    /// ```
    pub fn execute_in_transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let seconds = self.config().busy_timeout.as_secs();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| lock_error(e, seconds))?;

        let value = f(&tx)?;

        tx.commit().map_err(|e| lock_error(e, seconds))?;
        Ok(value)
    }

    /// Checks availability and inserts the reservation on `conn`.
    ///
    /// Must run inside a write transaction for the check to hold; use
    /// [`Database::reserve_atomic`] unless the caller already opened one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unavailable`] if the slot cannot seat the party, or
    /// a database error.
    pub fn reserve_within(
        conn: &Connection,
        draft: &NewReservation,
        checker: &AvailabilityChecker,
        created_at: DateTime<Utc>,
    ) -> Result<Reservation> {
        let availability = checker.check(conn, draft.slot(), draft.party_size())?;
        let remaining_capacity = availability.remaining_capacity();
        let table = availability.into_table(draft.slot())?;

        match Self::insert_reservation(conn, draft, table, created_at) {
            Err(Error::Database(e)) if is_unique_violation(&e) => Err(Error::Unavailable {
                slot: draft.slot(),
                reason: UnavailableReason::NoTableAvailable,
                remaining_capacity,
            }),
            result => result,
        }
    }

    /// Atomically checks availability and stores a reservation.
    ///
    /// Concurrent callers on separate connections are serialized by the
    /// database write lock, so two requests can never both take the last
    /// seats of a seating.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unavailable`] if the slot cannot seat the party,
    /// [`Error::LockTimeout`] if the write lock cannot be acquired, or a
    /// database error.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{NaiveDate, NaiveTime, Utc};
    /// use fausse::{AvailabilityChecker, BookingPolicy, Database, NewReservation, PartySize, Slot};
    ///
    /// let mut db = Database::open_in_memory().unwrap();
    /// let checker = AvailabilityChecker::new(BookingPolicy::default());
    /// let slot = Slot::new(
    ///     NaiveDate::from_ymd_opt(2030, 6, 1).unwrap(),
    ///     NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
    /// );
    /// let draft = NewReservation::builder("Avery Chen", "avery@example.com", PartySize::try_from(4_i64).unwrap(), slot)
    ///     .build()
    ///     .unwrap();
    ///
    /// let stored = db.reserve_atomic(&draft, &checker, Utc::now()).unwrap();
    /// assert_eq!(stored.table(), Some(1));
    /// ```
    pub fn reserve_atomic(
        &mut self,
        draft: &NewReservation,
        checker: &AvailabilityChecker,
        created_at: DateTime<Utc>,
    ) -> Result<Reservation> {
        self.execute_in_transaction(|conn| Self::reserve_within(conn, draft, checker, created_at))
    }
}
