//! Configuration validation.
//!
//! Checks that a merged configuration describes a workable dining room and
//! service before it is turned into a [`BookingPolicy`](crate::BookingPolicy).

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::slot::parse_time;
use std::net::SocketAddr;

/// Longest seating or slot interval accepted, in minutes.
pub const MAX_MINUTES: u32 = 24 * 60;

/// Validates configuration values and their consistency.
///
/// # Examples
///
/// ```
/// use fausse::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
/// ConfigValidator::validate(&Config::builtin()).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// Unset fields are checked through their built-in values.
    ///
    /// # Errors
    ///
    /// Returns an [`Error::Validation`] naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if config.seats() == 0 {
            return Err(invalid("restaurant.seats", "Seat capacity must be greater than 0"));
        }

        Self::validate_minutes("seating.duration_minutes", config.seating_minutes())?;
        Self::validate_minutes(
            "seating.slot_interval_minutes",
            config.slot_interval_minutes(),
        )?;
        Self::validate_service_hours(config)?;

        config.bind().parse::<SocketAddr>().map_err(|e| {
            invalid(
                "server.bind",
                format!("Invalid socket address '{}': {e}", config.bind()),
            )
        })?;

        for origin in config.allowed_origins() {
            Self::validate_origin(origin)?;
        }

        if let Some(token) = config.admin.as_ref().and_then(|a| a.token.as_deref()) {
            if !token.is_empty() && token.trim() != token {
                return Err(invalid(
                    "admin.token",
                    "Token cannot start or end with whitespace",
                ));
            }
        }

        if config.lock_wait_seconds() == 0 {
            return Err(invalid(
                "maximum_lock_wait_seconds",
                "Timeout must be greater than 0",
            ));
        }

        Ok(())
    }

    fn validate_minutes(field: &str, minutes: u32) -> Result<()> {
        if minutes == 0 {
            return Err(invalid(field, "Must be greater than 0"));
        }
        if minutes > MAX_MINUTES {
            return Err(invalid(
                field,
                format!("Cannot exceed {MAX_MINUTES} minutes"),
            ));
        }
        Ok(())
    }

    /// Service hours must parse, be ordered, and be spanned by whole slots.
    fn validate_service_hours(config: &Config) -> Result<()> {
        let open = parse_time(config.open()).ok_or_else(|| {
            invalid(
                "service_hours.open",
                format!("Invalid time '{}' (expected HH:MM)", config.open()),
            )
        })?;
        let last = parse_time(config.last_seating()).ok_or_else(|| {
            invalid(
                "service_hours.last_seating",
                format!("Invalid time '{}' (expected HH:MM)", config.last_seating()),
            )
        })?;

        if last < open {
            return Err(invalid(
                "service_hours",
                "last_seating must not be earlier than open",
            ));
        }

        let span = (last - open).num_minutes();
        if span % i64::from(config.slot_interval_minutes()) != 0 {
            return Err(invalid(
                "seating.slot_interval_minutes",
                format!(
                    "Interval of {} minutes does not divide the service window {}-{}",
                    config.slot_interval_minutes(),
                    config.open(),
                    config.last_seating()
                ),
            ));
        }

        Ok(())
    }

    fn validate_origin(origin: &str) -> Result<()> {
        let valid = (origin.starts_with("http://") || origin.starts_with("https://"))
            && !origin.ends_with('/')
            && !origin.chars().any(char::is_whitespace);
        if valid {
            Ok(())
        } else {
            Err(invalid(
                "server.allowed_origins",
                format!("Invalid origin '{origin}' (expected scheme://host[:port])"),
            ))
        }
    }
}

fn invalid(field: &str, message: impl Into<String>) -> Error {
    Error::Validation {
        field: field.into(),
        message: message.into(),
    }
}
