//! Configuration merging and precedence handling.
//!
//! Nested sections merge field by field, except `allowed_origins`, which is
//! replaced as a whole list.

use crate::config::loader::ConfigSource;
use crate::config::schema::{
    AdminConfig, Config, RestaurantConfig, SeatingConfig, ServerConfig, ServiceHoursConfig,
};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use fausse::config::{Config, ConfigMerger};
///
/// let low = Config { maximum_lock_wait_seconds: Some(5), ..Default::default() };
/// let high = Config { maximum_lock_wait_seconds: Some(30), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.maximum_lock_wait_seconds, Some(30));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();

        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }

        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - Simple fields: source overwrites if Some
    /// - Nested sections: field-by-field merge
    /// - Allowed origins: complete replacement
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.disable_autoinit.is_some() {
            target.disable_autoinit = source.disable_autoinit;
        }

        if source.maximum_lock_wait_seconds.is_some() {
            target.maximum_lock_wait_seconds = source.maximum_lock_wait_seconds;
        }

        merge_section(&mut target.restaurant, source.restaurant.as_ref(), |t, s| {
            RestaurantConfig {
                seats: s.seats.or(t.seats),
                tables: s.tables.or(t.tables),
            }
        });

        merge_section(&mut target.seating, source.seating.as_ref(), |t, s| SeatingConfig {
            duration_minutes: s.duration_minutes.or(t.duration_minutes),
            slot_interval_minutes: s.slot_interval_minutes.or(t.slot_interval_minutes),
        });

        merge_section(&mut target.service_hours, source.service_hours.as_ref(), |t, s| {
            ServiceHoursConfig {
                open: s.open.clone().or_else(|| t.open.clone()),
                last_seating: s.last_seating.clone().or_else(|| t.last_seating.clone()),
            }
        });

        merge_section(&mut target.server, source.server.as_ref(), |t, s| ServerConfig {
            bind: s.bind.clone().or_else(|| t.bind.clone()),
            allowed_origins: s
                .allowed_origins
                .clone()
                .or_else(|| t.allowed_origins.clone()),
        });

        merge_section(&mut target.admin, source.admin.as_ref(), |t, s| AdminConfig {
            token: s.token.clone().or_else(|| t.token.clone()),
        });
    }
}

fn merge_section<T: Clone>(target: &mut Option<T>, source: Option<&T>, merge: impl Fn(&T, &T) -> T) {
    if let Some(source) = source {
        let merged = match target.as_ref() {
            Some(existing) => merge(existing, source),
            None => source.clone(),
        };
        *target = Some(merged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::ConfigLayer;
    use std::path::PathBuf;

    fn make_source(layer: ConfigLayer, config: Config) -> ConfigSource {
        ConfigSource {
            path: PathBuf::from(format!("{layer:?}.yaml")),
            layer,
            config,
        }
    }

    #[test]
    fn test_merge_simple_fields() {
        let mut target = Config::default();
        let source = Config {
            disable_autoinit: Some(true),
            maximum_lock_wait_seconds: Some(12),
            ..Default::default()
        };

        ConfigMerger::merge_into(&mut target, &source);
        assert_eq!(target.disable_autoinit, Some(true));
        assert_eq!(target.maximum_lock_wait_seconds, Some(12));
    }

    #[test]
    fn test_merge_nested_field_by_field() {
        let mut target = Config::builtin();
        let source = Config {
            restaurant: Some(RestaurantConfig {
                seats: Some(24),
                tables: None,
            }),
            ..Default::default()
        };

        ConfigMerger::merge_into(&mut target, &source);
        assert_eq!(target.seats(), 24);
        assert_eq!(target.tables(), Some(30));
    }

    #[test]
    fn test_merge_origins_replaced() {
        let mut target = Config {
            server: Some(ServerConfig {
                bind: Some("127.0.0.1:9000".into()),
                allowed_origins: Some(vec!["https://a.example".into()]),
            }),
            ..Default::default()
        };
        let source = Config {
            server: Some(ServerConfig {
                bind: None,
                allowed_origins: Some(vec!["https://b.example".into()]),
            }),
            ..Default::default()
        };

        ConfigMerger::merge_into(&mut target, &source);
        assert_eq!(target.bind(), "127.0.0.1:9000");
        assert_eq!(target.allowed_origins(), ["https://b.example"]);
    }

    #[test]
    fn test_merge_none_values_dont_overwrite() {
        let mut target = Config::builtin();
        target.admin = Some(AdminConfig {
            token: Some("secret".into()),
        });
        let snapshot = target.clone();

        ConfigMerger::merge_into(&mut target, &Config::default());
        assert_eq!(target, snapshot);
    }

    #[test]
    fn test_merge_multiple_sources() {
        let sources = vec![
            make_source(ConfigLayer::User, Config::builtin()),
            make_source(
                ConfigLayer::Project,
                Config {
                    seating: Some(SeatingConfig {
                        duration_minutes: Some(120),
                        slot_interval_minutes: None,
                    }),
                    ..Default::default()
                },
            ),
            make_source(
                ConfigLayer::Local,
                Config {
                    seating: Some(SeatingConfig {
                        duration_minutes: None,
                        slot_interval_minutes: Some(15),
                    }),
                    maximum_lock_wait_seconds: Some(9),
                    ..Default::default()
                },
            ),
        ];

        let merged = ConfigMerger::merge(sources);
        assert_eq!(merged.seating_minutes(), 120);
        assert_eq!(merged.slot_interval_minutes(), 15);
        assert_eq!(merged.lock_wait_seconds(), 9);
        assert_eq!(merged.seats(), 50);
    }
}
