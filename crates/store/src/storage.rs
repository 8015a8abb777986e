//! Key-value slot storage.
//!
//! A [`Storage`] holds named string slots, in the spirit of a browser's
//! local storage. The board uses three slots: [`TASKS_SLOT`],
//! [`THEME_SLOT`], and [`ACCENT_SLOT`].
//!
//! # Directory Structure
//!
//! [`FileStorage`] keeps one file per slot:
//!
//! ```text
//! ~/.local/share/taskboard/       # Linux
//! ├── tasks
//! ├── theme
//! └── accent
//! ```

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::error::{Result, StoreError};

/// Slot holding the serialized task collection.
pub const TASKS_SLOT: &str = "tasks";

/// Slot holding the theme preference.
pub const THEME_SLOT: &str = "theme";

/// Slot holding the accent color preference.
pub const ACCENT_SLOT: &str = "accent";

/// A store of named string slots.
pub trait Storage: fmt::Debug {
    /// Reads a slot. Returns `None` if the slot has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot exists but cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes a slot, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be stored.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes a slot. Removing an absent slot succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot exists but cannot be removed.
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Slot storage backed by one file per slot in a directory.
///
/// Writes go to a temporary file that is then renamed over the slot, so a
/// slot is never observed half-written.
///
/// # Examples
///
/// ```no_run
/// use taskboard_store::{FileStorage, Storage};
///
/// # fn main() -> taskboard_store::Result<()> {
/// let mut storage = FileStorage::new("/tmp/taskboard")?;
/// storage.set("theme", "dark")?;
/// assert_eq!(storage.get("theme")?.as_deref(), Some("dark"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Opens a storage directory, creating it if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    #[instrument(skip_all, fields(base_path = %base_path.as_ref().display()))]
    pub fn new(base_path: impl AsRef<Path>) -> Result<Self> {
        let base_path = base_path.as_ref().to_path_buf();

        if !base_path.exists() {
            debug!("creating storage directory");
            fs::create_dir_all(&base_path).map_err(|source| StoreError::CreateDir {
                path: base_path.clone(),
                source,
            })?;
        }

        Ok(Self { base_path })
    }

    /// Returns the directory holding the slot files.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.base_path.join(key))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::ReadSlot {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        let tmp_path = path.with_extension("tmp");
        let write_err = |source| StoreError::WriteSlot {
            key: key.to_string(),
            source,
        };

        fs::write(&tmp_path, value).map_err(write_err)?;
        fs::rename(&tmp_path, &path).map_err(write_err)?;
        debug!(key, bytes = value.len(), "slot written");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::WriteSlot {
                key: key.to_string(),
                source,
            }),
        }
    }
}

/// Slot storage held in memory.
///
/// Useful for tests and for sessions that should leave nothing on disk.
///
/// # Examples
///
/// ```
/// use taskboard_store::{MemoryStorage, Storage};
///
/// let storage = MemoryStorage::new().with_slot("theme", "dark");
/// assert_eq!(storage.get("theme").unwrap().as_deref(), Some("dark"));
/// assert_eq!(storage.get("accent").unwrap(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    /// Creates an empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this storage with a slot pre-filled.
    #[must_use]
    pub fn with_slot(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.slots.insert(key.into(), value.into());
        self
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.slots.remove(key);
        Ok(())
    }
}
