//! Demo data for staging and local development.
//!
//! Seeding books through the same availability check as real requests, so
//! seeded data never exceeds capacity. Each seeding runs in a single
//! transaction.

use chrono::{Days, Local, NaiveDate, NaiveDateTime, TimeDelta, Timelike, Utc};
use rusqlite::Connection;
use serde::Serialize;

use crate::availability::AvailabilityChecker;
use crate::config::BookingPolicy;
use crate::database::Database;
use crate::error::{Error, Result};
use crate::party::PartySize;
use crate::reservation::{NewReservation, Reservation};
use crate::slot::{hm, Slot};

/// Demo customers: name, email, phone, newsletter opt-in.
const DEMO_CUSTOMERS: [(&str, &str, &str, bool); 10] = [
    ("Avery Chen", "avery.chen@example.com", "202-555-0101", true),
    ("Jordan Patel", "jordan.patel@example.com", "202-555-0102", false),
    ("Riley Nguyen", "riley.nguyen@example.com", "202-555-0103", true),
    ("Samira Ali", "samira.ali@example.com", "202-555-0104", false),
    ("Diego Romero", "diego.romero@example.com", "202-555-0105", false),
    ("Priya Shah", "priya.shah@example.com", "202-555-0106", true),
    ("Maya Thompson", "maya.thompson@example.com", "202-555-0107", true),
    ("Ethan Rivera", "ethan.rivera@example.com", "202-555-0108", false),
    ("Zoe Park", "zoe.park@example.com", "202-555-0109", true),
    ("Leo Carter", "leo.carter@example.com", "202-555-0110", false),
];

/// Party sizes cycled through when seeding a slot.
const PARTY_PATTERN: [u32; 6] = [2, 4, 3, 5, 2, 6];

/// Bookings per slot in [`SeedMode::Small`].
const SMALL_TARGET: usize = 3;

/// Longest demo range; the whole range is seeded under one write lock.
pub const MAX_SEED_DAYS: u32 = 90;

/// How densely to seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedMode {
    /// Dinner load curve peaking at 19:00.
    #[default]
    Normal,
    /// A few bookings per slot.
    Small,
}

/// Options for [`seed_demo`].
#[derive(Debug, Clone)]
pub struct SeedOptions {
    /// Number of days to seed, starting with `today`.
    pub days: u32,
    /// First seeded hour.
    pub start_hour: u32,
    /// Last seeded hour, inclusive.
    pub end_hour: u32,
    /// Minutes between seeded slots.
    pub step_minutes: u32,
    /// Seeding density.
    pub mode: SeedMode,
    /// Fill the 19:00 slot two days out until it is unavailable.
    pub fully_book_demo: bool,
    /// Delete every reservation first.
    pub wipe: bool,
    /// First seeded day.
    pub today: NaiveDate,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            days: 7,
            start_hour: 17,
            end_hour: 23,
            step_minutes: 30,
            mode: SeedMode::Normal,
            fully_book_demo: true,
            wipe: false,
            today: Local::now().date_naive(),
        }
    }
}

impl SeedOptions {
    /// Options for a light seed of a single day.
    #[must_use]
    pub fn small() -> Self {
        Self {
            days: 1,
            mode: SeedMode::Small,
            fully_book_demo: false,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if self.days > MAX_SEED_DAYS {
            return Err(Error::Validation {
                field: "days".into(),
                message: format!("days must be at most {MAX_SEED_DAYS}"),
            });
        }
        // The day after the range must exist for the last seatings to end
        offset_day(self.today, self.days, "days")?;
        if self.start_hour > 23 || self.end_hour > 23 {
            return Err(Error::Validation {
                field: "hour".into(),
                message: "hours must be between 0 and 23".into(),
            });
        }
        if self.start_hour > self.end_hour {
            return Err(Error::Validation {
                field: "start_hour".into(),
                message: "start_hour must not be after end_hour".into(),
            });
        }
        if self.step_minutes == 0 {
            return Err(Error::Validation {
                field: "step".into(),
                message: "step must be at least one minute".into(),
            });
        }
        Ok(())
    }

    fn slots_for(&self, day: NaiveDate) -> Vec<NaiveDateTime> {
        let end = day.and_time(hm(self.end_hour, 0));
        let step = TimeDelta::minutes(i64::from(self.step_minutes));
        std::iter::successors(Some(day.and_time(hm(self.start_hour, 0))), |t| Some(*t + step))
            .take_while(|t| *t <= end)
            .collect()
    }

    /// Bookings to attempt at `starts_at`; `None` means until unavailable.
    fn target(&self, day_index: u32, starts_at: NaiveDateTime) -> Option<usize> {
        if self.mode == SeedMode::Small {
            return Some(SMALL_TARGET);
        }
        let full_day = self.days.saturating_sub(1).min(2);
        if self.fully_book_demo && day_index == full_day && starts_at.time() == hm(19, 0) {
            return None;
        }
        Some(match starts_at.hour() {
            h if h < 18 => 8,
            18 => 12,
            19 => 18,
            20 => 16,
            _ => 10,
        })
    }
}

/// Counts reported by [`seed_demo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SeedSummary {
    /// Slots that received at least one booking.
    pub created_slots: usize,
    /// Reservations created.
    pub created_reservations: usize,
}

/// Counts reported by [`seed_capacity_scenario`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapacitySummary {
    /// Slot filled until a single seat cannot be booked.
    pub slot_full: String,
    /// Slot left with room for exactly one two-seat party.
    pub slot_almost: String,
    /// Reservations created at `slot_full`.
    pub created_full: usize,
    /// Reservations created at `slot_almost`.
    pub created_almost: usize,
}

fn demo_draft(index: usize, party: u32, slot: Slot) -> Result<NewReservation> {
    let (name, email, phone, _) = DEMO_CUSTOMERS[index % DEMO_CUSTOMERS.len()];
    let party = PartySize::try_from(party).map_err(|e| Error::Validation {
        field: "party_size".into(),
        message: e.to_string(),
    })?;
    Ok(NewReservation::builder(name, email, party, slot)
        .phone(Some(phone.to_string()))
        .build()?)
}

/// `today` plus `offset` days, or a validation error on `field` past the
/// end of the calendar.
fn offset_day(today: NaiveDate, offset: u32, field: &str) -> Result<NaiveDate> {
    today
        .checked_add_days(Days::new(u64::from(offset)))
        .ok_or_else(|| Error::Validation {
            field: field.into(),
            message: format!("{offset} days after {today} is out of range"),
        })
}

/// Books `draft`, returning `None` once the slot cannot take it.
fn try_book(
    conn: &Connection,
    draft: &NewReservation,
    checker: &AvailabilityChecker,
) -> Result<Option<Reservation>> {
    match Database::reserve_within(conn, draft, checker, Utc::now()) {
        Ok(reservation) => Ok(Some(reservation)),
        Err(Error::Unavailable { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Books demo parties into `slot` until `target` bookings or unavailability.
fn fill_slot(
    conn: &Connection,
    checker: &AvailabilityChecker,
    slot: Slot,
    target: Option<usize>,
) -> Result<usize> {
    // Every booking takes at least one seat, so this bounds the open-ended case
    let limit = target.unwrap_or(checker.policy().seats() as usize);
    let mut created = 0;
    for index in 0..limit {
        let party = PARTY_PATTERN[index % PARTY_PATTERN.len()];
        if try_book(conn, &demo_draft(index, party, slot)?, checker)?.is_none() {
            break;
        }
        created += 1;
    }
    Ok(created)
}

fn subscribe_demo_customers(conn: &Connection) -> Result<()> {
    let now = Utc::now();
    for (_, email, _, newsletter) in DEMO_CUSTOMERS {
        if newsletter {
            Database::subscribe(conn, email, now)?;
        }
    }
    Ok(())
}

/// Seeds demo reservations for the next `options.days` days.
///
/// # Errors
///
/// Returns [`Error::Validation`] for an inverted or out-of-range hour window,
/// a zero step, more than [`MAX_SEED_DAYS`] days or a range running past
/// the end of the calendar, or a database error. Nothing is written on error.
///
/// # Examples
///
/// ```
/// use fausse::operations::seed::{seed_demo, SeedOptions};
/// use fausse::{BookingPolicy, Database};
///
/// let mut db = Database::open_in_memory().unwrap();
/// let summary = seed_demo(&mut db, &BookingPolicy::default(), &SeedOptions::small()).unwrap();
/// assert_eq!(summary.created_slots, 13);
/// assert_eq!(summary.created_reservations, 39);
/// ```
pub fn seed_demo(
    db: &mut Database,
    policy: &BookingPolicy,
    options: &SeedOptions,
) -> Result<SeedSummary> {
    options.validate()?;
    let checker = AvailabilityChecker::new(policy.clone());

    let summary = db.execute_in_transaction(|conn| {
        if options.wipe {
            let deleted = Database::clear_reservations(conn)?;
            log::info!("Wiped {deleted} reservations before seeding");
        }
        subscribe_demo_customers(conn)?;

        let mut summary = SeedSummary::default();
        for day_index in 0..options.days {
            let day = offset_day(options.today, day_index, "days")?;
            for starts_at in options.slots_for(day) {
                let target = options.target(day_index, starts_at);
                let created = fill_slot(conn, &checker, Slot::at(starts_at), target)?;
                if created > 0 {
                    summary.created_slots += 1;
                    summary.created_reservations += created;
                }
            }
        }
        Ok(summary)
    })?;

    log::info!(
        "Seeded {} reservations across {} slots",
        summary.created_reservations,
        summary.created_slots
    );
    Ok(summary)
}

/// Seeds two slots for exercising capacity handling.
///
/// Deletes every reservation, then fills the slot `day_offset` days after
/// `today` at `hour:minute` until not even one seat can be booked. The slot
/// one seating duration later is filled with two-seat parties until it can
/// take exactly one more two-seat party.
///
/// # Errors
///
/// Returns [`Error::Validation`] for an invalid time of day or a day past
/// the end of the calendar, or a database error.
pub fn seed_capacity_scenario(
    db: &mut Database,
    policy: &BookingPolicy,
    today: NaiveDate,
    day_offset: u32,
    hour: u32,
    minute: u32,
) -> Result<CapacitySummary> {
    let time = chrono::NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
        Error::Validation {
            field: "hour".into(),
            message: format!("{hour:02}:{minute:02} is not a time of day"),
        }
    })?;
    let checker = AvailabilityChecker::new(policy.clone());
    offset_day(today, day_offset.saturating_add(1), "day")?;
    let full = Slot::new(offset_day(today, day_offset, "day")?, time);
    let almost = full
        .starts_at()
        .checked_add_signed(policy.seating_duration())
        .map(Slot::at)
        .ok_or_else(|| Error::Validation {
            field: "day".into(),
            message: format!("{full} is too close to the end of the calendar"),
        })?;

    let (created_full, created_almost) = db.execute_in_transaction(|conn| {
        Database::clear_reservations(conn)?;
        subscribe_demo_customers(conn)?;

        let mut created_full = fill_slot(conn, &checker, full, None)?;
        for index in created_full.. {
            if try_book(conn, &demo_draft(index, 1, full)?, &checker)?.is_none() {
                break;
            }
            created_full += 1;
        }

        let mut created_almost = 0;
        loop {
            let occupancy = checker.occupancy(conn, almost)?;
            let tables_left = occupancy.free_table_count().unwrap_or(u32::MAX);
            if occupancy.remaining_capacity < 4 || tables_left < 2 {
                break;
            }
            if try_book(conn, &demo_draft(created_almost, 2, almost)?, &checker)?.is_none() {
                break;
            }
            created_almost += 1;
        }

        Ok((created_full, created_almost))
    })?;

    log::info!("Seeded capacity scenario at {full} and {almost}");
    Ok(CapacitySummary {
        slot_full: full.to_string(),
        slot_almost: almost.to_string(),
        created_full,
        created_almost,
    })
}
