//! Builder that assembles the effective configuration.

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;
use std::env;
use std::path::{Path, PathBuf};

/// Loads, layers and validates configuration.
///
/// # Examples
///
/// ```
/// use fausse::config::{Config, ConfigBuilder, RestaurantConfig};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config {
///         restaurant: Some(RestaurantConfig { seats: Some(12), tables: None }),
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(config.seats(), 12);
/// assert_eq!(config.tables(), Some(30));
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// Creates a builder that reads files and the environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory project files are discovered from.
    ///
    /// Defaults to the process working directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Sets the data directory holding the user `config.yaml`.
    #[must_use]
    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        self.data_dir = Some(dir.to_path_buf());
        self
    }

    /// Ignores configuration files.
    #[must_use]
    pub const fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignores `FAUSSE_*` environment variables.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Applies programmatic overrides on top of every other source.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Builds the effective configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, an environment
    /// variable is malformed, or the merged result fails validation.
    pub fn build(self) -> Result<Config> {
        let mut config = Config::builtin();

        if !self.skip_files {
            let working_dir = match self.working_dir {
                Some(dir) => dir,
                None => env::current_dir()?,
            };
            for source in ConfigLoader::load_all(&working_dir, self.data_dir.as_deref())? {
                log::debug!(
                    "Applying {:?} configuration from {}",
                    source.layer,
                    source.path.display()
                );
                ConfigMerger::merge_into(&mut config, &source.config);
            }
        }

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(overrides) = &self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::SeatingConfig;
    use crate::error::Error;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_build_defaults_only() {
        let config = ConfigBuilder::new().skip_files().skip_env().build().unwrap();
        assert_eq!(config, Config::builtin());
    }

    #[test]
    #[serial]
    fn test_build_layers_files_in_order() {
        let project = TempDir::new().unwrap();
        let data = TempDir::new().unwrap();
        fs::write(
            data.path().join("config.yaml"),
            "restaurant:\n  seats: 60\nmaximum_lock_wait_seconds: 2\n",
        )
        .unwrap();
        fs::write(project.path().join("fausse.yaml"), "restaurant:\n  seats: 40\n").unwrap();
        fs::write(
            project.path().join("fausse.local.yaml"),
            "seating:\n  duration_minutes: 60\n",
        )
        .unwrap();

        let config = ConfigBuilder::new()
            .with_working_dir(project.path())
            .with_data_dir(data.path())
            .skip_env()
            .build()
            .unwrap();

        assert_eq!(config.seats(), 40);
        assert_eq!(config.seating_minutes(), 60);
        assert_eq!(config.lock_wait_seconds(), 2);
    }

    #[test]
    #[serial]
    fn test_overrides_beat_environment() {
        env::set_var("FAUSSE_SEATING_MINUTES", "45");
        let result = ConfigBuilder::new()
            .skip_files()
            .with_config(Config {
                seating: Some(SeatingConfig {
                    duration_minutes: Some(100),
                    slot_interval_minutes: None,
                }),
                ..Default::default()
            })
            .build();
        env::remove_var("FAUSSE_SEATING_MINUTES");

        assert_eq!(result.unwrap().seating_minutes(), 100);
    }

    #[test]
    fn test_invalid_merge_rejected() {
        let result = ConfigBuilder::new()
            .skip_files()
            .skip_env()
            .with_config(Config {
                maximum_lock_wait_seconds: Some(0),
                ..Default::default()
            })
            .build();
        assert!(matches!(result, Err(Error::Validation { .. })));
    }
}
