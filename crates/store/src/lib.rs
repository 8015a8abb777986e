//! Persistence for the taskboard application.
//!
//! This crate provides a key-value [`Storage`] abstraction with file and
//! in-memory backends, the [`TaskRepository`] that keeps the task
//! collection mirrored to storage, and the [`PreferenceStore`] for the
//! theme and accent color.
//!
//! # Examples
//!
//! ```
//! use taskboard_protocol::{Lane, TaskDraft};
//! use taskboard_store::{MemoryStorage, TaskRepository};
//!
//! let mut repo = TaskRepository::load(Box::new(MemoryStorage::new()));
//! repo.create(TaskDraft::new("Plan sprint"), Lane::Todo).unwrap();
//! assert_eq!(repo.tasks_in(Lane::Todo).count(), 1);
//! ```

pub mod error;
pub mod preferences;
pub mod repository;
pub mod storage;

pub use error::{Result, StoreError};
pub use preferences::{ACCENT_PALETTE, Accent, DEFAULT_ACCENT, PreferenceStore, Preferences, Theme};
pub use repository::{TaskRepository, load_all, save_all};
pub use storage::{ACCENT_SLOT, FileStorage, MemoryStorage, Storage, TASKS_SLOT, THEME_SLOT};
