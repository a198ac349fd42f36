//! Configuration schema definitions.
//!
//! Every field is optional so that partial files can be layered. Built-in
//! values come from [`Config::builtin`] and sit at the bottom of the stack.

use serde::{Deserialize, Serialize};

/// Default seat capacity.
pub const DEFAULT_SEATS: u32 = 50;
/// Default number of tables.
pub const DEFAULT_TABLES: u32 = 30;
/// Default seating length in minutes.
pub const DEFAULT_SEATING_MINUTES: u32 = 90;
/// Default spacing between bookable slots in minutes.
pub const DEFAULT_SLOT_INTERVAL_MINUTES: u32 = 30;
/// Default first seating.
pub const DEFAULT_OPEN: &str = "17:00";
/// Default last seating.
pub const DEFAULT_LAST_SEATING: &str = "23:00";
/// Default HTTP bind address.
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
/// Default lock wait in seconds.
pub const DEFAULT_LOCK_WAIT_SECONDS: u64 = 5;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use fausse::config::{Config, RestaurantConfig};
///
/// let config = Config {
///     restaurant: Some(RestaurantConfig { seats: Some(40), tables: None }),
///     ..Default::default()
/// };
/// assert_eq!(config.restaurant.unwrap().seats, Some(40));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Dining room size.
    pub restaurant: Option<RestaurantConfig>,

    /// Seating length and slot spacing.
    pub seating: Option<SeatingConfig>,

    /// First and last seating of the evening.
    pub service_hours: Option<ServiceHoursConfig>,

    /// HTTP listener settings.
    pub server: Option<ServerConfig>,

    /// Administrative routes.
    pub admin: Option<AdminConfig>,

    /// Disable automatic database initialization.
    pub disable_autoinit: Option<bool>,

    /// Maximum time to wait for database lock acquisition (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,
}

impl Config {
    /// Returns the built-in configuration.
    ///
    /// ```
    /// use fausse::config::Config;
    ///
    /// let config = Config::builtin();
    /// assert_eq!(config.seats(), 50);
    /// assert_eq!(config.tables(), Some(30));
    /// ```
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            restaurant: Some(RestaurantConfig {
                seats: Some(DEFAULT_SEATS),
                tables: Some(DEFAULT_TABLES),
            }),
            seating: Some(SeatingConfig {
                duration_minutes: Some(DEFAULT_SEATING_MINUTES),
                slot_interval_minutes: Some(DEFAULT_SLOT_INTERVAL_MINUTES),
            }),
            service_hours: Some(ServiceHoursConfig {
                open: Some(DEFAULT_OPEN.to_string()),
                last_seating: Some(DEFAULT_LAST_SEATING.to_string()),
            }),
            server: Some(ServerConfig {
                bind: Some(DEFAULT_BIND.to_string()),
                allowed_origins: Some(Vec::new()),
            }),
            admin: None,
            disable_autoinit: Some(false),
            maximum_lock_wait_seconds: Some(DEFAULT_LOCK_WAIT_SECONDS),
        }
    }

    /// Whether a missing database must not be created implicitly.
    #[must_use]
    pub fn autoinit_disabled(&self) -> bool {
        self.disable_autoinit.unwrap_or(false)
    }

    /// Effective seat capacity.
    #[must_use]
    pub fn seats(&self) -> u32 {
        self.restaurant
            .as_ref()
            .and_then(|r| r.seats)
            .unwrap_or(DEFAULT_SEATS)
    }

    /// Effective table count; `None` when table assignment is disabled.
    #[must_use]
    pub fn tables(&self) -> Option<u32> {
        self.restaurant
            .as_ref()
            .map_or(Some(DEFAULT_TABLES), |r| r.tables)
            .filter(|&t| t > 0)
    }

    /// Effective seating length in minutes.
    #[must_use]
    pub fn seating_minutes(&self) -> u32 {
        self.seating
            .as_ref()
            .and_then(|s| s.duration_minutes)
            .unwrap_or(DEFAULT_SEATING_MINUTES)
    }

    /// Effective slot spacing in minutes.
    #[must_use]
    pub fn slot_interval_minutes(&self) -> u32 {
        self.seating
            .as_ref()
            .and_then(|s| s.slot_interval_minutes)
            .unwrap_or(DEFAULT_SLOT_INTERVAL_MINUTES)
    }

    /// Effective first seating, as written in the file.
    #[must_use]
    pub fn open(&self) -> &str {
        self.service_hours
            .as_ref()
            .and_then(|h| h.open.as_deref())
            .unwrap_or(DEFAULT_OPEN)
    }

    /// Effective last seating, as written in the file.
    #[must_use]
    pub fn last_seating(&self) -> &str {
        self.service_hours
            .as_ref()
            .and_then(|h| h.last_seating.as_deref())
            .unwrap_or(DEFAULT_LAST_SEATING)
    }

    /// Effective bind address.
    #[must_use]
    pub fn bind(&self) -> &str {
        self.server
            .as_ref()
            .and_then(|s| s.bind.as_deref())
            .unwrap_or(DEFAULT_BIND)
    }

    /// Origins allowed by CORS; empty means any origin.
    #[must_use]
    pub fn allowed_origins(&self) -> &[String] {
        self.server
            .as_ref()
            .and_then(|s| s.allowed_origins.as_deref())
            .unwrap_or(&[])
    }

    /// Admin token, if administrative routes are enabled.
    #[must_use]
    pub fn admin_token(&self) -> Option<&str> {
        self.admin
            .as_ref()
            .and_then(|a| a.token.as_deref())
            .filter(|t| !t.is_empty())
    }

    /// Effective lock wait in seconds.
    #[must_use]
    pub fn lock_wait_seconds(&self) -> u64 {
        self.maximum_lock_wait_seconds
            .unwrap_or(DEFAULT_LOCK_WAIT_SECONDS)
    }
}

/// Dining room size.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RestaurantConfig {
    /// Total seats available across overlapping seatings.
    pub seats: Option<u32>,

    /// Number of tables; `0` disables table assignment.
    pub tables: Option<u32>,
}

/// Seating length and slot spacing.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SeatingConfig {
    /// How long a party occupies its seats.
    pub duration_minutes: Option<u32>,

    /// Spacing between bookable start times.
    pub slot_interval_minutes: Option<u32>,
}

/// First and last seating of the evening, as `HH:MM`.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServiceHoursConfig {
    /// Earliest bookable start time.
    pub open: Option<String>,

    /// Latest bookable start time.
    pub last_seating: Option<String>,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: Option<String>,

    /// Origins allowed by CORS.
    pub allowed_origins: Option<Vec<String>>,
}

/// Administrative routes.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AdminConfig {
    /// Shared secret expected in the `X-Admin-Token` header.
    pub token: Option<String>,
}
