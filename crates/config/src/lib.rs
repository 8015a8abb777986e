//! Configuration management for the taskboard application.
//!
//! This crate handles loading and validating configuration from files,
//! environment variables, and defaults.
//!
//! # Overview
//!
//! - [`config`]: Core configuration struct and loading logic
//! - [`pomodoro`]: Pomodoro phase lengths
//! - [`persistence`]: Config file discovery and reading, well-known directories
//! - [`error`]: Error types for configuration operations
//!
//! # Configuration Sources (Priority)
//!
//! 1. Environment variables (`TASKBOARD_DATA_DIR`)
//! 2. Local config (`./taskboard.json5` or `./taskboard.json`)
//! 3. User config (`~/.config/taskboard/config.json5` or `config.json`)
//! 4. Built-in defaults
//!
//! # Example File
//!
//! ```json5
//! {
//!   // Where the board keeps its tasks and preferences
//!   data_dir: "/home/me/boards/personal",
//!   pomodoro: { work_minutes: 25, break_minutes: 5 },
//!   log_level: "taskboard=debug",
//! }
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use taskboard_config::Config;
//!
//! # async fn example() -> taskboard_config::Result<()> {
//! let config = Config::load().await?;
//! println!("Data directory: {}", config.resolve_data_dir()?.display());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod persistence;
pub mod pomodoro;

// Re-export primary types at crate root for convenience
pub use config::{Config, DATA_DIR_ENV, DEFAULT_LOG_LEVEL};
pub use error::{ConfigError, Result};
pub use pomodoro::PomodoroConfig;
