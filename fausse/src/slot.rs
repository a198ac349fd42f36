//! Slots and seating windows.
//!
//! A [`Slot`] is the date and time a party asks to be seated. Capacity is
//! tracked over the party's *seating*: the half-open [`TimeWindow`] starting
//! at the slot and lasting the configured seating duration. Windows are plain
//! naive local date-times, so seatings that run past midnight need no special
//! handling.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// Accepted date format for client input.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Canonical time format used in responses.
pub const TIME_FORMAT: &str = "%H:%M";

/// Parses a `YYYY-MM-DD` date.
///
/// # Examples
///
/// ```
/// use fausse::slot::parse_date;
///
/// assert!(parse_date("2030-02-28").is_some());
/// assert!(parse_date("2030-02-30").is_none());
/// assert!(parse_date("28/02/2030").is_none());
/// ```
#[must_use]
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// Parses an `HH:MM` or `HH:MM:SS` time of day.
///
/// # Examples
///
/// ```
/// use fausse::slot::parse_time;
///
/// assert!(parse_time("19:30").is_some());
/// assert!(parse_time("19:30:00").is_some());
/// assert!(parse_time("7pm").is_none());
/// ```
#[must_use]
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

/// Builds a time of day from constant hour and minute values.
///
/// Out-of-range input yields midnight.
#[must_use]
pub fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

/// Encodes a naive local date-time as the integer stored in the database.
#[must_use]
pub fn to_storage(value: NaiveDateTime) -> i64 {
    value.and_utc().timestamp()
}

/// Decodes an integer written by [`to_storage`].
#[must_use]
pub fn from_storage(secs: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(secs, 0).map(|dt| dt.naive_utc())
}

/// A requested (date, time) pair.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use fausse::Slot;
///
/// let slot = Slot::new(
///     NaiveDate::from_ymd_opt(2030, 6, 1).unwrap(),
///     NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
/// );
/// assert_eq!(slot.to_string(), "2030-06-01 19:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Slot {
    date: NaiveDate,
    time: NaiveTime,
}

impl Slot {
    /// Creates a slot from a date and a time of day.
    #[must_use]
    pub const fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self { date, time }
    }

    /// Creates the slot starting at the given local date-time.
    #[must_use]
    pub fn at(starts_at: NaiveDateTime) -> Self {
        Self::new(starts_at.date(), starts_at.time())
    }

    /// Parses a slot from client strings.
    ///
    /// Returns `None` if either part is malformed.
    #[must_use]
    pub fn parse(date: &str, time: &str) -> Option<Self> {
        Some(Self::new(parse_date(date)?, parse_time(time)?))
    }

    /// Returns the requested date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the requested time of day.
    #[must_use]
    pub const fn time(&self) -> NaiveTime {
        self.time
    }

    /// Returns the local date-time at which the seating begins.
    #[must_use]
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Returns the seating window for a party seated at this slot.
    #[must_use]
    pub fn seating(&self, duration: TimeDelta) -> TimeWindow {
        TimeWindow::starting_at(self.starts_at(), duration)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.date.format(DATE_FORMAT),
            self.time.format(TIME_FORMAT)
        )
    }
}

/// A half-open interval `[start, end)` of local time.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, TimeDelta};
/// use fausse::TimeWindow;
///
/// let seven = NaiveDate::from_ymd_opt(2030, 6, 1).unwrap().and_hms_opt(19, 0, 0).unwrap();
/// let first = TimeWindow::starting_at(seven, TimeDelta::minutes(90));
/// let second = TimeWindow::starting_at(seven + TimeDelta::minutes(90), TimeDelta::minutes(90));
///
/// assert!(!first.overlaps(&second));
/// assert!(first.overlaps(&TimeWindow::starting_at(seven + TimeDelta::minutes(60), TimeDelta::minutes(90))));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeWindow {
    /// Creates a window from explicit bounds.
    ///
    /// Returns `None` when `end` is not after `start`.
    #[must_use]
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Option<Self> {
        (end > start).then_some(Self { start, end })
    }

    /// Creates a window beginning at `start` and lasting `duration`.
    ///
    /// Non-positive durations are widened to one second.
    #[must_use]
    pub fn starting_at(start: NaiveDateTime, duration: TimeDelta) -> Self {
        let duration = duration.max(TimeDelta::seconds(1));
        Self {
            start,
            end: start + duration,
        }
    }

    /// Returns the inclusive start of the window.
    #[must_use]
    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Returns the exclusive end of the window.
    #[must_use]
    pub const fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Returns the window length.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Returns true if the two windows share at least one instant.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Returns true if `instant` lies inside the window.
    #[must_use]
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant < self.end
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {})",
            self.start.format("%Y-%m-%d %H:%M"),
            self.end.format("%Y-%m-%d %H:%M")
        )
    }
}
