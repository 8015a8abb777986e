//! Terminal UI for the taskboard application.
//!
//! This crate provides a Ratatui-based terminal interface over a
//! [`TaskRepository`](taskboard_store::TaskRepository): three lanes of
//! cards that can be created, edited, deleted, filtered, and moved by
//! keyboard or by dragging with the mouse, plus a pomodoro timer.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`app`]: Main application struct and run loop
//! - [`state`]: Application state and the actions behind every key
//! - [`board_view`]: Projection of the task collection into lanes
//! - [`drag`]: The drag-and-drop gesture
//! - [`editor`]: The task editor form
//! - [`pomodoro`]: The work/break countdown and its ticker
//! - [`theme`]: Color palettes
//! - [`layout`]: Screen geometry and hit-testing
//! - [`terminal`]: Terminal setup, teardown, and panic handling
//! - [`event`]: Event handling and key mappings
//! - [`widgets`]: Rendering functions
//!
//! # Example
//!
//! ```no_run
//! use taskboard_config::PomodoroConfig;
//! use taskboard_store::{FileStorage, PreferenceStore, TaskRepository};
//! use taskboard_tui::{App, terminal};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let repo = TaskRepository::load(Box::new(FileStorage::new("/tmp/taskboard")?));
//!     let prefs = PreferenceStore::load(Box::new(FileStorage::new("/tmp/taskboard")?));
//!
//!     terminal::install_panic_hook();
//!     let mut terminal = terminal::setup_terminal()?;
//!
//!     let mut app = App::new(repo, prefs, &PomodoroConfig::default());
//!     let result = app.run(&mut terminal).await;
//!
//!     terminal::restore_terminal(&mut terminal)?;
//!     result
//! }
//! ```

pub mod app;
pub mod board_view;
pub mod drag;
pub mod editor;
pub mod event;
pub mod layout;
pub mod pomodoro;
pub mod state;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export primary types at crate root for convenience
pub use app::App;
pub use state::{AppState, Focus};
