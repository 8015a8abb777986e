//! Configuration file discovery and reading, and well-known directories.
//!
//! # File Formats
//!
//! Configuration is read as JSON5, which also accepts plain JSON.
//!
//! # File Locations
//!
//! Configuration is searched in the following order:
//!
//! 1. Working directory: `./taskboard.json5` or `./taskboard.json`
//! 2. User: `~/.config/taskboard/config.json5` or `~/.config/taskboard/config.json`

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Application directory name under the platform config and data dirs.
const APP_DIR: &str = "taskboard";

/// Local configuration file names, in priority order.
const LOCAL_FILE_NAMES: &[&str] = &["taskboard.json5", "taskboard.json"];

/// User configuration file names, in priority order.
const USER_FILE_NAMES: &[&str] = &["config.json5", "config.json"];

/// Finds the configuration file path.
///
/// Returns the first existing file among the local names in the working
/// directory, then the user names in [`user_config_dir`].
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    find_config_file_in(Path::new("."), user_config_dir().ok())
}

/// Finds the configuration file in explicit directories.
///
/// `local_dir` is searched for the local file names, then `user_dir` (if
/// any) for the user file names.
#[must_use]
pub fn find_config_file_in(local_dir: &Path, user_dir: Option<PathBuf>) -> Option<PathBuf> {
    let local = LOCAL_FILE_NAMES.iter().map(|name| local_dir.join(name));
    let user = user_dir
        .into_iter()
        .flat_map(|dir| USER_FILE_NAMES.iter().map(move |name| dir.join(name)));

    local.chain(user).find(|path| path.exists())
}

/// Returns the user configuration directory, typically `~/.config/taskboard/`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn user_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Returns the default data directory, typically `~/.local/share/taskboard/`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
///
/// # Examples
///
/// ```no_run
/// use taskboard_config::persistence::default_data_dir;
///
/// let dir = default_data_dir().unwrap();
/// println!("Tasks are stored in: {}", dir.display());
/// ```
pub fn default_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Reads and parses a configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its content cannot be
/// parsed.
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json5::from_str(&content).map_err(ConfigError::from)
}
