//! TUI message types for event handling.
//!
//! This module defines the message enum used for communication between
//! the TUI input handler and the application state.

use serde::{Deserialize, Serialize};

/// Messages that represent user actions in the TUI.
///
/// These messages are produced by the input handler (and by the pomodoro
/// ticker) and consumed by the application state to update the UI.
///
/// # Examples
///
/// ```
/// use taskboard_protocol::Message;
///
/// let msg = Message::PointerDown { column: 3, row: 7 };
/// assert!(msg.is_pointer());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    /// Move selection to the left lane.
    NavigateLeft,
    /// Move selection to the right lane.
    NavigateRight,
    /// Move selection up within the current lane.
    NavigateUp,
    /// Move selection down within the current lane.
    NavigateDown,
    /// Open the editor on the selected task.
    EditSelected,
    /// Open the editor to create a task in the focused lane.
    NewTask,
    /// Delete the selected task.
    DeleteSelected,
    /// Pick up the selected card, or drop the carried one.
    PickUpOrDrop,
    /// Escape: cancel the current gesture, close the overlay, or clear selection.
    Escape,
    /// Quit the application.
    Quit,
    /// Toggle help overlay.
    ToggleHelp,
    /// Switch between the light and dark theme.
    ToggleTheme,
    /// Switch to the next accent color.
    CycleAccent,

    // --- Pointer messages ---
    /// Primary button pressed at coordinates (column, row).
    PointerDown {
        /// Column (x coordinate) of the press.
        column: u16,
        /// Row (y coordinate) of the press.
        row: u16,
    },
    /// Pointer moved with the primary button held.
    PointerDrag {
        /// Column (x coordinate) of the pointer.
        column: u16,
        /// Row (y coordinate) of the pointer.
        row: u16,
    },
    /// Primary button released at coordinates (column, row).
    PointerUp {
        /// Column (x coordinate) of the release.
        column: u16,
        /// Row (y coordinate) of the release.
        row: u16,
    },

    // --- Search messages ---
    /// Focus the search input.
    OpenSearch,
    /// Type a character into the search input.
    SearchInput {
        /// The character that was typed.
        ch: char,
    },
    /// Delete the last character of the search query.
    SearchBackspace,
    /// Leave the search input, keeping the filter.
    SearchConfirm,
    /// Leave the search input and clear the filter.
    SearchClear,

    // --- Editor messages ---
    /// Type a character into the focused editor field.
    EditorInput {
        /// The character that was typed.
        ch: char,
    },
    /// Delete the character before the cursor in the focused field.
    EditorBackspace,
    /// Focus the next editor field.
    EditorNextField,
    /// Focus the previous editor field.
    EditorPrevField,
    /// Cycle the value of the focused choice field.
    EditorCycle {
        /// Direction to cycle (positive = forward, negative = backward).
        delta: i32,
    },
    /// Save the editor contents.
    EditorSave,
    /// Close the editor, discarding changes.
    EditorCancel,

    // --- Pomodoro messages ---
    /// Start the pomodoro timer, or pause it if it is running.
    PomodoroToggle,
    /// Stop the pomodoro timer and return to a fresh work phase.
    PomodoroReset,
    /// One second has elapsed on the ticker with this generation.
    PomodoroTick {
        /// Generation of the ticker that produced this tick.
        generation: u64,
    },
}

impl Message {
    /// Returns `true` if this message should terminate the application.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskboard_protocol::Message;
    ///
    /// assert!(Message::Quit.is_terminating());
    /// assert!(!Message::Escape.is_terminating());
    /// ```
    #[must_use]
    pub fn is_terminating(&self) -> bool {
        matches!(self, Self::Quit)
    }

    /// Returns `true` if this message was produced by a pointer device.
    #[must_use]
    pub fn is_pointer(&self) -> bool {
        matches!(
            self,
            Self::PointerDown { .. } | Self::PointerDrag { .. } | Self::PointerUp { .. }
        )
    }
}
