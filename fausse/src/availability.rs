//! Seat and table availability for a requested seating.
//!
//! The checker never touches storage directly. It reads confirmed
//! reservations through [`SlotLedger`], which the `SQLite` connection
//! implements, and decides from the [`BookingPolicy`] it was built with.

use std::collections::BTreeSet;

use chrono::{NaiveDate, TimeDelta};
use rusqlite::Connection;
use serde::Serialize;

use crate::config::BookingPolicy;
use crate::database::Database;
use crate::error::{Error, Result, UnavailableReason};
use crate::party::PartySize;
use crate::reservation::Reservation;
use crate::slot::{Slot, TimeWindow};

/// Read access to the confirmed reservations of a time range.
#[cfg_attr(test, mockall::automock)]
pub trait SlotLedger {
    /// Returns confirmed reservations whose seatings, each `seating` long,
    /// overlap `window`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be read.
    fn confirmed_in_window(&self, window: &TimeWindow, seating: TimeDelta)
        -> Result<Vec<Reservation>>;
}

impl SlotLedger for Connection {
    fn confirmed_in_window(
        &self,
        window: &TimeWindow,
        seating: TimeDelta,
    ) -> Result<Vec<Reservation>> {
        Database::reservations_in_window(self, window, seating)
    }
}

impl SlotLedger for Database {
    fn confirmed_in_window(
        &self,
        window: &TimeWindow,
        seating: TimeDelta,
    ) -> Result<Vec<Reservation>> {
        Database::reservations_in_window(self.connection(), window, seating)
    }
}

/// Seats and tables held during one seating window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupancy {
    /// Seats held by overlapping confirmed reservations.
    pub booked_seats: u32,
    /// Seats still free, saturating at zero.
    pub remaining_capacity: u32,
    /// Table numbers held by overlapping confirmed reservations.
    pub used_tables: BTreeSet<u32>,
    /// Number of tables, or `None` when tables are not assigned.
    pub table_count: Option<u32>,
}

impl Occupancy {
    /// Returns the lowest numbered table no overlapping reservation holds.
    ///
    /// Always `None` when tables are not assigned.
    #[must_use]
    pub fn lowest_free_table(&self) -> Option<u32> {
        self.table_count
            .and_then(|count| (1..=count).find(|table| !self.used_tables.contains(table)))
    }

    /// Returns how many tables are still free.
    #[must_use]
    pub fn free_table_count(&self) -> Option<u32> {
        self.table_count.map(|count| {
            let used = (1..=count)
                .filter(|table| self.used_tables.contains(table))
                .count();
            count.saturating_sub(u32::try_from(used).unwrap_or(u32::MAX))
        })
    }
}

/// Outcome of an availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Availability {
    /// The party can be seated.
    Available {
        /// Seats free before this party is seated.
        remaining_capacity: u32,
        /// Table the party would get, when tables are assigned.
        table: Option<u32>,
    },
    /// The party cannot be seated.
    Unavailable {
        /// Seats free across the seating.
        remaining_capacity: u32,
        /// Why the party cannot be seated.
        reason: UnavailableReason,
    },
}

impl Availability {
    /// Returns true if the party can be seated.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available { .. })
    }

    /// Returns the seats free across the seating.
    #[must_use]
    pub const fn remaining_capacity(&self) -> u32 {
        match self {
            Self::Available {
                remaining_capacity, ..
            }
            | Self::Unavailable {
                remaining_capacity, ..
            } => *remaining_capacity,
        }
    }

    /// Converts the outcome into the table to book at `slot`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unavailable`] when the party cannot be seated.
    pub fn into_table(self, slot: Slot) -> Result<Option<u32>> {
        match self {
            Self::Available { table, .. } => Ok(table),
            Self::Unavailable {
                remaining_capacity,
                reason,
            } => Err(Error::Unavailable {
                slot,
                reason,
                remaining_capacity,
            }),
        }
    }
}

/// Decides whether a party fits into a seating.
///
/// # Examples
///
/// ```
/// use fausse::{AvailabilityChecker, BookingPolicy, Database, PartySize, Slot};
///
/// let db = Database::open_in_memory().unwrap();
/// let checker = AvailabilityChecker::new(BookingPolicy::new(50));
/// let slot = Slot::parse("2030-06-01", "19:00").unwrap();
///
/// let availability = checker.check(&db, slot, PartySize::try_from(4_u32).unwrap()).unwrap();
/// assert!(availability.is_available());
/// assert_eq!(availability.remaining_capacity(), 50);
/// ```
#[derive(Debug, Clone)]
pub struct AvailabilityChecker {
    policy: BookingPolicy,
}

impl AvailabilityChecker {
    /// Creates a checker for the given policy.
    #[must_use]
    pub const fn new(policy: BookingPolicy) -> Self {
        Self { policy }
    }

    /// Returns the policy this checker decides with.
    #[must_use]
    pub const fn policy(&self) -> &BookingPolicy {
        &self.policy
    }

    /// Computes seats and tables held during the seating starting at `slot`.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    pub fn occupancy<L>(&self, ledger: &L, slot: Slot) -> Result<Occupancy>
    where
        L: SlotLedger + ?Sized,
    {
        let duration = self.policy.seating_duration();
        let window = self.policy.seating(slot);

        let mut booked: u64 = 0;
        let mut used_tables = BTreeSet::new();
        for reservation in ledger.confirmed_in_window(&window, duration)? {
            if !reservation.counts_against_capacity()
                || !reservation.seating(duration).overlaps(&window)
            {
                continue;
            }
            booked += u64::from(reservation.party_size().value());
            if let Some(table) = reservation.table() {
                used_tables.insert(table);
            }
        }

        let booked_seats = u32::try_from(booked).unwrap_or(u32::MAX);
        Ok(Occupancy {
            booked_seats,
            remaining_capacity: self.policy.seats().saturating_sub(booked_seats),
            used_tables,
            table_count: self.policy.tables(),
        })
    }

    /// Checks whether `party` can be seated at `slot`.
    ///
    /// Reasons are decided in order: a party larger than the room, then
    /// too few free seats, then no free table.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    pub fn check<L>(&self, ledger: &L, slot: Slot, party: PartySize) -> Result<Availability>
    where
        L: SlotLedger + ?Sized,
    {
        let occupancy = self.occupancy(ledger, slot)?;
        let remaining_capacity = occupancy.remaining_capacity;
        let unavailable = |reason| Availability::Unavailable {
            remaining_capacity,
            reason,
        };

        let availability = if party.value() > self.policy.seats() {
            unavailable(UnavailableReason::PartyTooLarge)
        } else if remaining_capacity < party.value() {
            unavailable(UnavailableReason::FullyBooked)
        } else if occupancy.table_count.is_none() {
            Availability::Available {
                remaining_capacity,
                table: None,
            }
        } else {
            match occupancy.lowest_free_table() {
                Some(table) => Availability::Available {
                    remaining_capacity,
                    table: Some(table),
                },
                None => unavailable(UnavailableReason::NoTableAvailable),
            }
        };

        log::trace!("Availability at {slot} for {party}: {availability:?}");
        Ok(availability)
    }

    /// Checks every slot of `date` for `party`.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    pub fn check_day<L>(
        &self,
        ledger: &L,
        date: NaiveDate,
        party: PartySize,
    ) -> Result<Vec<(Slot, Availability)>>
    where
        L: SlotLedger + ?Sized,
    {
        self.policy
            .slots_on(date)
            .into_iter()
            .map(|slot| Ok((slot, self.check(ledger, slot, party)?)))
            .collect()
    }
}
