//! Shared protocol types for the taskboard application.
//!
//! This crate defines the core types used across all taskboard components,
//! including tasks, lanes, drafts, messages, and error types.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`task`]: Task identifiers, priorities, drafts, and the `Task` record
//! - [`lane`]: The board lanes, which double as task statuses
//! - [`message`]: TUI event messages
//! - [`error`]: Error types for protocol operations
//!
//! # Examples
//!
//! ```
//! use taskboard_protocol::{Lane, Priority, Task, TaskDraft, TaskId};
//!
//! let draft = TaskDraft::new("Write spec")
//!     .with_priority(Priority::High)
//!     .with_tags(["urgent", "doc"]);
//! draft.validate().unwrap();
//!
//! let mut task = Task::from_draft(TaskId::generate(), draft, Lane::Todo);
//! task.status = Lane::Doing;
//! assert!(task.matches_query("urgent"));
//! ```

pub mod error;
pub mod lane;
pub mod message;
pub mod task;

// Re-export primary types at crate root for convenience
pub use error::{ProtocolError, Result};
pub use lane::{LANE_COUNT, Lane};
pub use message::Message;
pub use task::{
    DUE_DATE_FORMAT, Priority, Task, TaskDraft, TaskId, join_tags, parse_due_date, parse_tags,
};
