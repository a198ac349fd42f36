//! The typed booking policy.
//!
//! [`BookingPolicy`] is what the validator and the availability checker
//! consume: plain numbers and times, already parsed and checked. It is built
//! from a [`Config`] once at startup and passed in explicitly.

use chrono::{NaiveDate, NaiveTime, TimeDelta, Timelike};

use crate::config::schema::{
    Config, DEFAULT_SEATING_MINUTES, DEFAULT_SEATS, DEFAULT_SLOT_INTERVAL_MINUTES, DEFAULT_TABLES,
};
use crate::config::validator::ConfigValidator;
use crate::error::{Error, Result};
use crate::slot::{hm, parse_time, Slot, TimeWindow};

/// Seats, tables, seating length and service hours.
///
/// # Examples
///
/// ```
/// use chrono::NaiveTime;
/// use fausse::BookingPolicy;
///
/// let policy = BookingPolicy::new(20)
///     .with_tables(None)
///     .with_seating_minutes(120);
///
/// assert_eq!(policy.seats(), 20);
/// assert_eq!(policy.tables(), None);
/// assert!(policy.is_within_service_hours(NaiveTime::from_hms_opt(18, 0, 0).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingPolicy {
    seats: u32,
    tables: Option<u32>,
    seating_duration: TimeDelta,
    slot_interval: TimeDelta,
    open: NaiveTime,
    last_seating: NaiveTime,
}

impl BookingPolicy {
    /// Creates a policy with the given seat capacity and default everything else.
    #[must_use]
    pub fn new(seats: u32) -> Self {
        Self {
            seats,
            ..Self::default()
        }
    }

    /// Sets the number of tables; `None` or `Some(0)` disables table assignment.
    #[must_use]
    pub fn with_tables(mut self, tables: Option<u32>) -> Self {
        self.tables = tables.filter(|&t| t > 0);
        self
    }

    /// Sets how long a party occupies its seats.
    #[must_use]
    pub fn with_seating_minutes(mut self, minutes: u32) -> Self {
        self.seating_duration = TimeDelta::minutes(i64::from(minutes.max(1)));
        self
    }

    /// Sets the spacing between bookable start times.
    #[must_use]
    pub fn with_slot_interval_minutes(mut self, minutes: u32) -> Self {
        self.slot_interval = TimeDelta::minutes(i64::from(minutes.max(1)));
        self
    }

    /// Sets the first and last seating of the evening.
    #[must_use]
    pub fn with_service_hours(mut self, open: NaiveTime, last_seating: NaiveTime) -> Self {
        self.open = open;
        self.last_seating = last_seating;
        self
    }

    /// Builds the policy from a merged configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the configuration is inconsistent.
    pub fn from_config(config: &Config) -> Result<Self> {
        ConfigValidator::validate(config)?;

        let open = parse_time(config.open()).ok_or_else(|| Error::Validation {
            field: "service_hours.open".into(),
            message: format!("Invalid time '{}'", config.open()),
        })?;
        let last_seating = parse_time(config.last_seating()).ok_or_else(|| Error::Validation {
            field: "service_hours.last_seating".into(),
            message: format!("Invalid time '{}'", config.last_seating()),
        })?;

        Ok(Self::new(config.seats())
            .with_tables(config.tables())
            .with_seating_minutes(config.seating_minutes())
            .with_slot_interval_minutes(config.slot_interval_minutes())
            .with_service_hours(open, last_seating))
    }

    /// Total seats available across overlapping seatings.
    #[must_use]
    pub const fn seats(&self) -> u32 {
        self.seats
    }

    /// Number of tables, when table assignment is enabled.
    #[must_use]
    pub const fn tables(&self) -> Option<u32> {
        self.tables
    }

    /// How long a party occupies its seats.
    #[must_use]
    pub const fn seating_duration(&self) -> TimeDelta {
        self.seating_duration
    }

    /// Spacing between bookable start times.
    #[must_use]
    pub const fn slot_interval(&self) -> TimeDelta {
        self.slot_interval
    }

    /// First bookable start time.
    #[must_use]
    pub const fn open(&self) -> NaiveTime {
        self.open
    }

    /// Last bookable start time.
    #[must_use]
    pub const fn last_seating(&self) -> NaiveTime {
        self.last_seating
    }

    /// Returns true if a party may be seated at `time`.
    #[must_use]
    pub fn is_within_service_hours(&self, time: NaiveTime) -> bool {
        self.open <= time && time <= self.last_seating
    }

    /// Returns true if `time` is a whole number of slot intervals after opening.
    #[must_use]
    pub fn is_slot_boundary(&self, time: NaiveTime) -> bool {
        if time < self.open || time.second() != 0 || time.nanosecond() != 0 {
            return false;
        }
        let offset = (time - self.open).num_minutes();
        offset % self.slot_interval.num_minutes().max(1) == 0
    }

    /// Lists every bookable slot on `date`, in order.
    #[must_use]
    pub fn slots_on(&self, date: NaiveDate) -> Vec<Slot> {
        let mut slots = Vec::new();
        let mut current = date.and_time(self.open);
        let last = date.and_time(self.last_seating);
        while current <= last {
            slots.push(Slot::at(current));
            current += self.slot_interval;
        }
        slots
    }

    /// Returns the seating window of a party seated at `slot`.
    #[must_use]
    pub fn seating(&self, slot: Slot) -> TimeWindow {
        slot.seating(self.seating_duration)
    }
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            seats: DEFAULT_SEATS,
            tables: Some(DEFAULT_TABLES),
            seating_duration: TimeDelta::minutes(i64::from(DEFAULT_SEATING_MINUTES)),
            slot_interval: TimeDelta::minutes(i64::from(DEFAULT_SLOT_INTERVAL_MINUTES)),
            open: hm(17, 0),
            last_seating: hm(23, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{RestaurantConfig, SeatingConfig, ServiceHoursConfig};

    #[test]
    fn test_default_matches_builtin_config() {
        let from_config = BookingPolicy::from_config(&Config::builtin()).unwrap();
        assert_eq!(from_config, BookingPolicy::default());
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            restaurant: Some(RestaurantConfig {
                seats: Some(24),
                tables: Some(0),
            }),
            seating: Some(SeatingConfig {
                duration_minutes: Some(120),
                slot_interval_minutes: Some(15),
            }),
            service_hours: Some(ServiceHoursConfig {
                open: Some("18:00".into()),
                last_seating: Some("21:45".into()),
            }),
            ..Default::default()
        };
        let policy = BookingPolicy::from_config(&config).unwrap();

        assert_eq!(policy.seats(), 24);
        assert_eq!(policy.tables(), None);
        assert_eq!(policy.seating_duration(), TimeDelta::minutes(120));
        assert_eq!(policy.slot_interval(), TimeDelta::minutes(15));
        assert_eq!(policy.open(), hm(18, 0));
        assert_eq!(policy.last_seating(), hm(21, 45));
    }

    #[test]
    fn test_from_invalid_config() {
        let config = Config {
            restaurant: Some(RestaurantConfig {
                seats: Some(0),
                tables: None,
            }),
            ..Default::default()
        };
        assert!(BookingPolicy::from_config(&config).is_err());
    }

    #[test]
    fn test_service_hours_inclusive() {
        let policy = BookingPolicy::default();
        assert!(policy.is_within_service_hours(hm(17, 0)));
        assert!(policy.is_within_service_hours(hm(23, 0)));
        assert!(!policy.is_within_service_hours(hm(16, 59)));
        assert!(!policy.is_within_service_hours(hm(23, 1)));
    }

    #[test]
    fn test_slot_boundaries() {
        let policy = BookingPolicy::default();
        assert!(policy.is_slot_boundary(hm(17, 30)));
        assert!(policy.is_slot_boundary(hm(21, 0)));
        assert!(!policy.is_slot_boundary(hm(17, 45)));
        assert!(!policy.is_slot_boundary(NaiveTime::from_hms_opt(17, 30, 5).unwrap()));
        assert!(!policy.is_slot_boundary(hm(16, 30)));
    }

    #[test]
    fn test_slots_on() {
        let date = NaiveDate::from_ymd_opt(2030, 6, 1).unwrap();
        let slots = BookingPolicy::default().slots_on(date);
        assert_eq!(slots.len(), 13);
        assert_eq!(slots[0].to_string(), "2030-06-01 17:00");
        assert_eq!(slots[12].to_string(), "2030-06-01 23:00");
    }

    #[test]
    fn test_builder_clamps_zero_minutes() {
        let policy = BookingPolicy::new(10)
            .with_seating_minutes(0)
            .with_slot_interval_minutes(0)
            .with_tables(Some(0));
        assert_eq!(policy.seating_duration(), TimeDelta::minutes(1));
        assert_eq!(policy.slot_interval(), TimeDelta::minutes(1));
        assert_eq!(policy.tables(), None);
    }
}
