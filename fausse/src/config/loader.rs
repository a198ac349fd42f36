//! Finding and parsing configuration files.
//!
//! The user file lives in the data directory. Project files are looked up
//! from the working directory towards the root; the first directory holding
//! either project file ends the search.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the user configuration file inside the data directory.
pub const USER_CONFIG_FILE: &str = "config.yaml";
/// Name of the shared project configuration file.
pub const PROJECT_CONFIG_FILE: &str = "fausse.yaml";
/// Name of the private, uncommitted project configuration file.
pub const LOCAL_CONFIG_FILE: &str = "fausse.local.yaml";

/// Where a configuration file came from. Later variants override earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigLayer {
    /// `config.yaml` in the data directory.
    User,
    /// `fausse.yaml` next to the deployment.
    Project,
    /// `fausse.local.yaml` next to the deployment.
    Local,
}

/// One parsed configuration file.
///
/// # Examples
///
/// ```
/// use fausse::config::{ConfigLayer, ConfigSource};
/// use std::path::PathBuf;
///
/// let source = ConfigSource {
///     path: PathBuf::from("/srv/cafe/fausse.yaml"),
///     layer: ConfigLayer::Project,
///     config: Default::default(),
/// };
/// assert!(source.layer > ConfigLayer::User);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the file.
    pub path: PathBuf,
    /// Which layer the file belongs to.
    pub layer: ConfigLayer,
    /// Parsed contents.
    pub config: Config,
}

/// Loads configuration files from disk.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Every configuration file that applies, ordered lowest layer first.
    ///
    /// The user file is read from `data_dir`, or from the default data
    /// directory when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists but cannot be read or parsed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use fausse::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let sources = ConfigLoader::load_all(Path::new("."), None).unwrap();
    /// for source in &sources {
    ///     println!("{:?}: {}", source.layer, source.path.display());
    /// }
    /// ```
    pub fn load_all(working_dir: &Path, data_dir: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let user_file = match data_dir {
            Some(dir) => dir.join(USER_CONFIG_FILE),
            None => crate::database::default_data_dir()?.join(USER_CONFIG_FILE),
        };

        let mut sources: Vec<ConfigSource> = Self::load_if_present(&user_file, ConfigLayer::User)?
            .into_iter()
            .collect();
        sources.extend(Self::discover_project_configs(working_dir)?);
        sources.sort_by_key(|s| s.layer);
        Ok(sources)
    }

    /// Project files in the nearest directory, at or above `start_dir`,
    /// that holds at least one of them.
    ///
    /// # Errors
    ///
    /// Returns an error if a discovered file cannot be read or parsed.
    pub fn discover_project_configs(start_dir: &Path) -> Result<Vec<ConfigSource>> {
        for dir in start_dir.ancestors() {
            let mut found = Vec::new();
            for (name, layer) in [
                (PROJECT_CONFIG_FILE, ConfigLayer::Project),
                (LOCAL_CONFIG_FILE, ConfigLayer::Local),
            ] {
                found.extend(Self::load_if_present(&dir.join(name), layer)?);
            }
            if !found.is_empty() {
                return Ok(found);
            }
        }
        Ok(Vec::new())
    }

    fn load_if_present(path: &Path, layer: ConfigLayer) -> Result<Option<ConfigSource>> {
        if !path.is_file() {
            return Ok(None);
        }
        Ok(Some(ConfigSource {
            path: path.to_path_buf(),
            layer,
            config: Self::load_file(path)?,
        }))
    }

    /// Reads and parses one YAML file. Unknown keys are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] when the file cannot be read and
    /// [`Error::Validation`] naming the file when the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read configuration file: {e}"),
        })?;

        serde_yaml::from_str(&contents).map_err(|e| Error::Validation {
            field: path.display().to_string(),
            message: format!("Invalid YAML: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_missing_file_is_invalid_path() {
        let result = ConfigLoader::load_file(Path::new("/nonexistent/path/config.yaml"));
        assert!(matches!(result, Err(Error::InvalidPath { .. })));
    }

    #[test]
    fn test_bad_yaml_and_unknown_keys_name_the_file() {
        let temp = TempDir::new().unwrap();
        for (i, body) in ["invalid: yaml: syntax:", "restaurant:\n  booths: 4\n"]
            .into_iter()
            .enumerate()
        {
            let name = format!("bad{i}.yaml");
            write(temp.path(), &name, body);
            match ConfigLoader::load_file(&temp.path().join(&name)) {
                Err(Error::Validation { field, .. }) => assert!(field.ends_with(&name)),
                other => panic!("expected validation error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_project_files_in_same_directory() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), PROJECT_CONFIG_FILE, "restaurant:\n  seats: 40\n");
        write(temp.path(), LOCAL_CONFIG_FILE, "restaurant:\n  seats: 20\n");

        let configs = ConfigLoader::discover_project_configs(temp.path()).unwrap();
        let seats: Vec<_> = configs.iter().map(|c| (c.layer, c.config.seats())).collect();
        assert_eq!(
            seats,
            [(ConfigLayer::Project, 40), (ConfigLayer::Local, 20)]
        );
    }

    #[test]
    fn test_nearest_directory_wins() {
        let temp = TempDir::new().unwrap();
        let child = temp.path().join("a").join("b");
        fs::create_dir_all(&child).unwrap();
        write(temp.path(), PROJECT_CONFIG_FILE, "restaurant:\n  seats: 44\n");
        write(&temp.path().join("a"), LOCAL_CONFIG_FILE, "restaurant:\n  seats: 12\n");

        let configs = ConfigLoader::discover_project_configs(&child).unwrap();
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].layer, ConfigLayer::Local);
        assert_eq!(configs[0].config.seats(), 12);
    }

    #[test]
    fn test_empty_tree_has_no_project_configs() {
        let temp = TempDir::new().unwrap();
        assert!(ConfigLoader::discover_project_configs(temp.path())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_load_all_orders_by_layer() {
        let project_dir = TempDir::new().unwrap();
        let data_dir = TempDir::new().unwrap();
        write(data_dir.path(), USER_CONFIG_FILE, "maximum_lock_wait_seconds: 3\n");
        write(project_dir.path(), LOCAL_CONFIG_FILE, "seating:\n  duration_minutes: 60\n");
        write(project_dir.path(), PROJECT_CONFIG_FILE, "seating:\n  duration_minutes: 75\n");

        let sources = ConfigLoader::load_all(project_dir.path(), Some(data_dir.path())).unwrap();

        let layers: Vec<_> = sources.iter().map(|s| s.layer).collect();
        assert_eq!(
            layers,
            [ConfigLayer::User, ConfigLayer::Project, ConfigLayer::Local]
        );
        assert_eq!(sources[0].config.lock_wait_seconds(), 3);
    }
}
