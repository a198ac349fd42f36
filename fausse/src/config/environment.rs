//! Environment variable handling for configuration overrides.
//!
//! `FAUSSE_*` variables override values read from configuration files.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::env;
use std::str::FromStr;

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use fausse::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., non-numeric seat count, invalid boolean).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Some(seats) = Self::parse_var::<u32>("FAUSSE_SEATS")? {
            config.restaurant.get_or_insert_with(Default::default).seats = Some(seats);
        }

        if let Some(tables) = Self::parse_var::<u32>("FAUSSE_TABLES")? {
            config.restaurant.get_or_insert_with(Default::default).tables = Some(tables);
        }

        if let Some(minutes) = Self::parse_var::<u32>("FAUSSE_SEATING_MINUTES")? {
            config
                .seating
                .get_or_insert_with(Default::default)
                .duration_minutes = Some(minutes);
        }

        if let Some(minutes) = Self::parse_var::<u32>("FAUSSE_SLOT_INTERVAL_MINUTES")? {
            config
                .seating
                .get_or_insert_with(Default::default)
                .slot_interval_minutes = Some(minutes);
        }

        if let Ok(open) = env::var("FAUSSE_OPEN") {
            config.service_hours.get_or_insert_with(Default::default).open = Some(open);
        }

        if let Ok(last) = env::var("FAUSSE_LAST_SEATING") {
            config
                .service_hours
                .get_or_insert_with(Default::default)
                .last_seating = Some(last);
        }

        if let Ok(bind) = env::var("FAUSSE_BIND") {
            config.server.get_or_insert_with(Default::default).bind = Some(bind);
        }

        if let Ok(origins) = env::var("FAUSSE_ALLOWED_ORIGINS") {
            config
                .server
                .get_or_insert_with(Default::default)
                .allowed_origins = Some(Self::parse_list(&origins));
        }

        if let Ok(token) = env::var("FAUSSE_ADMIN_TOKEN") {
            config.admin.get_or_insert_with(Default::default).token = Some(token);
        }

        if let Some(seconds) = Self::parse_var::<u64>("FAUSSE_MAXIMUM_LOCK_WAIT_SECONDS")? {
            config.maximum_lock_wait_seconds = Some(seconds);
        }

        if let Ok(val) = env::var("FAUSSE_DISABLE_AUTOINIT") {
            config.disable_autoinit = Some(Self::parse_bool("FAUSSE_DISABLE_AUTOINIT", &val)?);
        }

        Ok(())
    }

    /// Reads and parses a numeric variable, if set.
    fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>> {
        match env::var(name) {
            Ok(raw) => raw
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| Error::Validation {
                    field: name.into(),
                    message: format!("Must be a non-negative integer, got '{raw}'"),
                }),
            Err(_) => Ok(None),
        }
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }

    /// Splits a comma-separated list, dropping blank entries.
    fn parse_list(s: &str) -> Vec<String> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(String::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "FAUSSE_SEATS",
        "FAUSSE_TABLES",
        "FAUSSE_SEATING_MINUTES",
        "FAUSSE_SLOT_INTERVAL_MINUTES",
        "FAUSSE_OPEN",
        "FAUSSE_LAST_SEATING",
        "FAUSSE_BIND",
        "FAUSSE_ALLOWED_ORIGINS",
        "FAUSSE_ADMIN_TOKEN",
        "FAUSSE_MAXIMUM_LOCK_WAIT_SECONDS",
        "FAUSSE_DISABLE_AUTOINIT",
    ];

    fn clear_vars() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_parse_bool_true_variants() {
        for s in ["true", "TRUE", "1", "yes", "On"] {
            assert!(EnvironmentConfig::parse_bool("X", s).unwrap(), "{s}");
        }
    }

    #[test]
    fn test_parse_bool_false_variants() {
        for s in ["false", "False", "0", "no", "OFF"] {
            assert!(!EnvironmentConfig::parse_bool("X", s).unwrap(), "{s}");
        }
    }

    #[test]
    fn test_parse_bool_invalid() {
        assert!(EnvironmentConfig::parse_bool("X", "maybe").is_err());
        assert!(EnvironmentConfig::parse_bool("X", "").is_err());
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(
            EnvironmentConfig::parse_list(" https://a.example, ,https://b.example "),
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
        assert!(EnvironmentConfig::parse_list("").is_empty());
    }

    #[test]
    #[serial]
    fn test_apply_overrides_no_env_vars() {
        clear_vars();
        let mut config = Config::default();
        EnvironmentConfig::apply_overrides(&mut config).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_apply_overrides_sets_nested_fields() {
        clear_vars();
        env::set_var("FAUSSE_SEATS", "40");
        env::set_var("FAUSSE_TABLES", "0");
        env::set_var("FAUSSE_SEATING_MINUTES", "120");
        env::set_var("FAUSSE_OPEN", "18:00");
        env::set_var("FAUSSE_ALLOWED_ORIGINS", "https://cafefausse.example");
        env::set_var("FAUSSE_ADMIN_TOKEN", "secret");
        env::set_var("FAUSSE_DISABLE_AUTOINIT", "yes");

        let mut config = Config::builtin();
        let result = EnvironmentConfig::apply_overrides(&mut config);
        clear_vars();
        result.unwrap();

        assert_eq!(config.seats(), 40);
        assert_eq!(config.tables(), None);
        assert_eq!(config.seating_minutes(), 120);
        assert_eq!(config.slot_interval_minutes(), 30);
        assert_eq!(config.open(), "18:00");
        assert_eq!(config.last_seating(), "23:00");
        assert_eq!(config.allowed_origins(), ["https://cafefausse.example"]);
        assert_eq!(config.admin_token(), Some("secret"));
        assert_eq!(config.disable_autoinit, Some(true));
    }

    #[test]
    #[serial]
    fn test_apply_overrides_rejects_bad_number() {
        clear_vars();
        env::set_var("FAUSSE_SEATS", "fifty");

        let mut config = Config::default();
        let result = EnvironmentConfig::apply_overrides(&mut config);
        clear_vars();

        match result {
            Err(Error::Validation { field, .. }) => assert_eq!(field, "FAUSSE_SEATS"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
