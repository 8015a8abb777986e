//! Widget components for the taskboard TUI.
//!
//! This module provides reusable rendering functions for the board UI,
//! organized into focused submodules for each visual component.
//!
//! # Overview
//!
//! Each widget is a plain function that renders state to a buffer. Widgets
//! never touch the repository; they are handed the tasks and the
//! [`BoardView`](crate::board_view::BoardView) to draw.
//!
//! # Modules
//!
//! - [`board`]: Renders the three lanes side by side
//! - [`lane`]: Renders one lane with its stack of cards
//! - [`task_card`]: Renders a task card
//! - [`header`]: Renders the title, search field, and pomodoro timer
//! - [`status_bar`]: Renders the footer with the status message and key hints
//! - [`editor_form`]: Renders the task editor modal
//! - [`help`]: Renders the keybinding overlay
//!
//! # Card Colors
//!
//! A card's border tells its state at a glance:
//!
//! | Condition | Color |
//! |-----------|-------|
//! | Selected | Accent color |
//! | Overdue and not done | Overdue red |
//! | Low priority | `Color::Green` |
//! | Medium priority | `Color::Yellow` |
//! | High priority | `Color::Red` |

pub mod board;
pub mod editor_form;
pub mod header;
pub mod help;
pub mod lane;
pub mod status_bar;
pub mod task_card;

pub use board::{BoardContext, render_board};
pub use editor_form::render_editor;
pub use header::{SearchLine, render_header};
pub use help::render_help_overlay;
pub use lane::{LanePosition, LaneState, render_lane};
pub use status_bar::{HintMode, render_status_bar};
pub use task_card::render_task_card;
