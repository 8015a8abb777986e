//! Board lanes.
//!
//! A lane is both a column on the board and the persisted `status` of every
//! task that sits in it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A lane (column) on the board, also used as the task status.
///
/// The order of the variants is the left-to-right order of the columns.
/// Tasks may move between any two lanes; there are no forbidden transitions.
///
/// # Examples
///
/// ```
/// use taskboard_protocol::Lane;
///
/// let lane = Lane::Doing;
/// assert_eq!(lane.display_name(), "Doing");
/// assert_eq!(lane.as_str(), "doing");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Lane {
    /// Tasks waiting to be started.
    #[default]
    Todo,
    /// Tasks currently being worked on.
    Doing,
    /// Completed tasks.
    Done,
}

/// Number of lanes on the board.
pub const LANE_COUNT: usize = 3;

impl Lane {
    /// Returns all lanes in column order.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskboard_protocol::Lane;
    ///
    /// let lanes = Lane::all();
    /// assert_eq!(lanes.len(), 3);
    /// assert_eq!(lanes[0], Lane::Todo);
    /// ```
    #[must_use]
    pub const fn all() -> [Self; LANE_COUNT] {
        [Self::Todo, Self::Doing, Self::Done]
    }

    /// Returns a human-readable name for the lane header.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::Doing => "Doing",
            Self::Done => "Done",
        }
    }

    /// Returns the identifier used in the persisted `status` field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Done => "done",
        }
    }

    /// Returns the column index of this lane (0-2).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Todo => 0,
            Self::Doing => 1,
            Self::Done => 2,
        }
    }

    /// Creates a `Lane` from its column index.
    ///
    /// Returns `None` if the index is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskboard_protocol::Lane;
    ///
    /// assert_eq!(Lane::from_index(0), Some(Lane::Todo));
    /// assert_eq!(Lane::from_index(3), None);
    /// ```
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Todo),
            1 => Some(Self::Doing),
            2 => Some(Self::Done),
            _ => None,
        }
    }

    /// Returns the lane to the right, wrapping around to the first.
    #[must_use]
    pub const fn next_wrapping(self) -> Self {
        match Self::from_index(self.index() + 1) {
            Some(lane) => lane,
            None => Self::Todo,
        }
    }

    /// Returns the lane to the left, wrapping around to the last.
    #[must_use]
    pub const fn previous_wrapping(self) -> Self {
        match self.index().checked_sub(1) {
            Some(idx) => match Self::from_index(idx) {
                Some(lane) => lane,
                None => Self::Done,
            },
            None => Self::Done,
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_returns_lanes_in_column_order() {
        let all = Lane::all();
        assert_eq!(all, [Lane::Todo, Lane::Doing, Lane::Done]);
        for (i, lane) in all.iter().enumerate() {
            assert_eq!(lane.index(), i);
            assert_eq!(Lane::from_index(i), Some(*lane));
        }
    }

    #[test]
    fn wrapping_navigation() {
        assert_eq!(Lane::Todo.next_wrapping(), Lane::Doing);
        assert_eq!(Lane::Done.next_wrapping(), Lane::Todo);
        assert_eq!(Lane::Todo.previous_wrapping(), Lane::Done);
        assert_eq!(Lane::Doing.previous_wrapping(), Lane::Todo);
    }

    #[test]
    fn json_format_matches_status_identifiers() {
        for lane in Lane::all() {
            let json = serde_json::to_string(&lane).expect("serialize");
            assert_eq!(json, format!("\"{}\"", lane.as_str()));
        }
        let parsed: Lane = serde_json::from_str(r#""doing""#).expect("deserialize");
        assert_eq!(parsed, Lane::Doing);
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(serde_json::from_str::<Lane>(r#""archived""#).is_err());
    }
}
