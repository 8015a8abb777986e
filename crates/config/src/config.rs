//! Core configuration struct and loading logic.
//!
//! This module provides the main [`Config`] struct which aggregates all
//! configuration options for the taskboard application.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::persistence::{default_data_dir, find_config_file, read_config_file};
use crate::pomodoro::PomodoroConfig;

/// Environment variable that overrides [`Config::data_dir`].
pub const DATA_DIR_ENV: &str = "TASKBOARD_DATA_DIR";

/// Default log filter directive.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// The main configuration struct for the taskboard application.
///
/// # Examples
///
/// ```
/// use taskboard_config::{Config, PomodoroConfig};
///
/// let config = Config::default();
/// assert!(config.data_dir.is_none());
/// assert_eq!(config.log_level, "info");
///
/// let config = Config {
///     pomodoro: PomodoroConfig::new(50, 10),
///     ..Config::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the task and preference slots.
    ///
    /// Defaults to the platform data directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Pomodoro phase lengths.
    #[serde(default)]
    pub pomodoro: PomodoroConfig,

    /// Log filter directive, used when `TASKBOARD_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            pomodoro: PomodoroConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Creates a default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from the default file locations and applies
    /// environment overrides.
    ///
    /// If no configuration file is found, the defaults are used.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be
    /// read, parsed, or validated.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use taskboard_config::Config;
    ///
    /// # async fn example() -> taskboard_config::Result<()> {
    /// let config = Config::load().await?;
    /// println!("Work for {} minutes", config.pomodoro.work_minutes);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn load() -> Result<Self> {
        let mut config = match find_config_file() {
            Some(path) => Self::load_from(path)?,
            None => Self::default(),
        };
        config.apply_data_dir_override(std::env::var_os(DATA_DIR_ENV).map(PathBuf::from));
        Ok(config)
    }

    /// Loads configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config: Config = read_config_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the pomodoro durations are out of range.
    pub fn validate(&self) -> Result<()> {
        self.pomodoro.validate()
    }

    /// Replaces the data directory with an override, if one is given.
    /// Empty overrides are ignored.
    pub fn apply_data_dir_override(&mut self, dir: Option<PathBuf>) {
        if let Some(dir) = dir.filter(|d| !d.as_os_str().is_empty()) {
            self.data_dir = Some(dir);
        }
    }

    /// Returns the directory to store slots in.
    ///
    /// # Errors
    ///
    /// Returns an error if no data directory is configured and the home
    /// directory cannot be determined.
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.data_dir.is_none());
        assert_eq!(config.pomodoro, PomodoroConfig::default());
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn new_config() {
        assert_eq!(Config::new(), Config::default());
    }

    #[test]
    fn deserialize_with_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn data_dir_not_serialized_when_none() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(!json.contains("data_dir"));
    }

    #[test]
    fn override_replaces_data_dir() {
        let mut config = Config {
            data_dir: Some(PathBuf::from("/from/file")),
            ..Config::default()
        };

        config.apply_data_dir_override(None);
        assert_eq!(config.data_dir, Some(PathBuf::from("/from/file")));

        config.apply_data_dir_override(Some(PathBuf::new()));
        assert_eq!(config.data_dir, Some(PathBuf::from("/from/file")));

        config.apply_data_dir_override(Some(PathBuf::from("/from/env")));
        assert_eq!(config.resolve_data_dir().unwrap(), PathBuf::from("/from/env"));
    }

    #[test]
    fn load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json5");
        std::fs::write(
            &path,
            r#"
            {
                data_dir: "/srv/board",
                pomodoro: { work_minutes: 50 },
                log_level: "debug",
            }
            "#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/board")));
        assert_eq!(config.pomodoro.work_minutes, 50);
        assert_eq!(config.pomodoro.break_minutes, 5);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn load_from_rejects_invalid_pomodoro() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"pomodoro": {"work_minutes": 0}}"#).unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, crate::ConfigError::InvalidPomodoro { .. }));
    }
}
