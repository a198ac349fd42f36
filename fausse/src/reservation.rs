//! Reservation types.
//!
//! A [`NewReservation`] is a validated draft that has not been stored yet.
//! Once the store accepts it, it becomes a [`Reservation`] with an identifier,
//! an optional table assignment and a creation timestamp.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::party::PartySize;
use crate::reservation::request::FieldError;
use crate::slot::{Slot, TimeWindow};

pub mod request;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

/// Identifier assigned to a reservation when it is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(i64);

impl ReservationId {
    /// Returns the raw row identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for ReservationId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a stored reservation.
///
/// Only confirmed reservations count against capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    /// The booking holds seats.
    Confirmed,
    /// The booking no longer holds seats.
    Cancelled,
}

impl ReservationStatus {
    /// Returns the value stored in the `status` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(FieldError::new(
                "status",
                format!("unknown reservation status '{other}'"),
            )),
        }
    }
}

/// A validated reservation that has not been persisted yet.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use fausse::{NewReservation, PartySize, Slot};
///
/// let slot = Slot::new(
///     NaiveDate::from_ymd_opt(2030, 6, 1).unwrap(),
///     NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
/// );
/// let draft = NewReservation::builder("Avery Chen", "avery@example.com", PartySize::try_from(2_i64).unwrap(), slot)
///     .phone(Some("202-555-0101".to_string()))
///     .build()
///     .unwrap();
///
/// assert_eq!(draft.name(), "Avery Chen");
/// assert_eq!(draft.phone(), Some("202-555-0101"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReservation {
    name: String,
    email: String,
    phone: Option<String>,
    party_size: PartySize,
    slot: Slot,
}

impl NewReservation {
    /// Starts building a reservation draft.
    #[must_use]
    pub fn builder(
        name: impl Into<String>,
        email: impl Into<String>,
        party_size: PartySize,
        slot: Slot,
    ) -> NewReservationBuilder {
        NewReservationBuilder {
            name: name.into(),
            email: email.into(),
            phone: None,
            party_size,
            slot,
        }
    }

    /// Returns the customer name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the normalized customer email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the optional phone number.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Returns the party size.
    #[must_use]
    pub const fn party_size(&self) -> PartySize {
        self.party_size
    }

    /// Returns the requested slot.
    #[must_use]
    pub const fn slot(&self) -> Slot {
        self.slot
    }
}

/// Builder for [`NewReservation`].
#[derive(Debug)]
pub struct NewReservationBuilder {
    name: String,
    email: String,
    phone: Option<String>,
    party_size: PartySize,
    slot: Slot,
}

impl NewReservationBuilder {
    /// Sets the phone number. Blank values are dropped.
    #[must_use]
    pub fn phone(mut self, phone: Option<String>) -> Self {
        self.phone = phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        self
    }

    /// Builds the draft.
    ///
    /// Name and email are trimmed; the email is lower-cased.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or email is empty after trimming.
    pub fn build(self) -> Result<NewReservation, FieldError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(FieldError::new("name", "name is required"));
        }

        let email = self.email.trim().to_lowercase();
        if email.is_empty() {
            return Err(FieldError::new("email", "email is required"));
        }

        Ok(NewReservation {
            name,
            email,
            phone: self.phone,
            party_size: self.party_size,
            slot: self.slot,
        })
    }
}

/// A reservation as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub(crate) id: ReservationId,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) phone: Option<String>,
    pub(crate) party_size: PartySize,
    pub(crate) slot: Slot,
    pub(crate) table: Option<u32>,
    pub(crate) status: ReservationStatus,
    pub(crate) created_at: DateTime<Utc>,
}

impl Reservation {
    /// Combines an accepted draft with the values assigned on insert.
    pub(crate) fn accepted(
        id: ReservationId,
        draft: &NewReservation,
        table: Option<u32>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            party_size: draft.party_size,
            slot: draft.slot,
            table,
            status: ReservationStatus::Confirmed,
            created_at,
        }
    }

    /// Returns the reservation identifier.
    #[must_use]
    pub const fn id(&self) -> ReservationId {
        self.id
    }

    /// Returns the customer name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the customer email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the optional phone number.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Returns the party size.
    #[must_use]
    pub const fn party_size(&self) -> PartySize {
        self.party_size
    }

    /// Returns the booked slot.
    #[must_use]
    pub const fn slot(&self) -> Slot {
        self.slot
    }

    /// Returns the assigned table, if table assignment is enabled.
    #[must_use]
    pub const fn table(&self) -> Option<u32> {
        self.table
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ReservationStatus {
        self.status
    }

    /// Returns when the reservation was accepted.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns true if this reservation holds seats.
    #[must_use]
    pub fn counts_against_capacity(&self) -> bool {
        self.status == ReservationStatus::Confirmed
    }

    /// Returns the seating window of this reservation.
    #[must_use]
    pub fn seating(&self, duration: TimeDelta) -> TimeWindow {
        self.slot.seating(duration)
    }
}
