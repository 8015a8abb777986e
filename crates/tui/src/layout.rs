//! Centralized layout measurements for the TUI.
//!
//! Rendering and pointer hit-testing both go through the functions here, so
//! a click always resolves against the same rectangles that were drawn.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::{Block, Borders};
use taskboard_protocol::{LANE_COUNT, Lane};

/// Height of the header bar in rows.
///
/// The header shows the title, the search field, and the pomodoro timer.
pub const HEADER_HEIGHT: u16 = 3;

/// Height of the status bar in rows.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Height of each task card in rows.
///
/// Two border rows plus title, description, and metadata rows.
pub const TASK_CARD_HEIGHT: u16 = 5;

/// Minimum terminal height for useful rendering.
///
/// Below this height, we display a "terminal too small" message. The editor
/// modal is the tallest element and needs about this much room.
pub const MIN_HEIGHT: u16 = 12;

/// Minimum terminal height for rendering with header.
///
/// When terminal height is between `MIN_HEIGHT` and `MIN_HEIGHT_WITH_HEADER`,
/// we hide the header to reclaim its rows for the board.
pub const MIN_HEIGHT_WITH_HEADER: u16 = MIN_HEIGHT + HEADER_HEIGHT;

/// Minimum terminal width for useful rendering.
///
/// Each of the three lanes needs about 15 columns for borders and
/// truncated titles to stay readable.
pub const MIN_WIDTH: u16 = 45;

/// The regions of the main screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    /// Header bar, absent in compact mode.
    pub header: Option<Rect>,
    /// The lanes.
    pub board: Rect,
    /// The one-line status bar.
    pub status: Rect,
}

/// Splits the screen into header, board, and status bar.
#[must_use]
pub fn screen_areas(area: Rect, show_header: bool) -> ScreenAreas {
    if show_header {
        let [header, board, status] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .areas(area);
        ScreenAreas {
            header: Some(header),
            board,
            status,
        }
    } else {
        let [board, status] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(STATUS_BAR_HEIGHT)])
                .areas(area);
        ScreenAreas {
            header: None,
            board,
            status,
        }
    }
}

/// Splits the board into equal-width lane columns, in [`Lane::all`] order.
#[must_use]
pub fn lane_areas(board: Rect) -> [Rect; LANE_COUNT] {
    Layout::horizontal([Constraint::Ratio(1, LANE_COUNT as u32); LANE_COUNT]).areas(board)
}

/// Returns the lane whose column contains the given cell.
#[must_use]
pub fn lane_at(board: Rect, column: u16, row: u16) -> Option<Lane> {
    lane_areas(board)
        .iter()
        .position(|area| area.contains((column, row).into()))
        .and_then(Lane::from_index)
}

/// Position of a lane in the horizontal layout.
///
/// Adjacent lanes share a border, so each lane draws its left side and only
/// the last one also draws its right side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanePosition {
    /// First (leftmost) lane - has left border with rounded corners.
    First,
    /// Middle lanes - has left border with T-connectors.
    Middle,
    /// Last (rightmost) lane - has both borders, rounded on the right.
    Last,
}

impl LanePosition {
    /// Returns the position of the lane at `index` among `count` lanes.
    #[must_use]
    pub const fn of(index: usize, count: usize) -> Self {
        if index == 0 {
            Self::First
        } else if index + 1 >= count {
            Self::Last
        } else {
            Self::Middle
        }
    }

    /// Returns the borders a lane in this position draws.
    #[must_use]
    pub const fn borders(self) -> Borders {
        match self {
            Self::First | Self::Middle => {
                Borders::TOP.union(Borders::BOTTOM).union(Borders::LEFT)
            }
            Self::Last => Borders::ALL,
        }
    }
}

/// Returns the area inside a lane's borders where cards are stacked.
///
/// Matches what the lane widget draws into, so hit-testing and rendering
/// agree on every column.
#[must_use]
pub fn lane_content(lane_area: Rect, position: LanePosition) -> Rect {
    Block::default().borders(position.borders()).inner(lane_area)
}

/// Returns how many cards fit in a lane's content area (at least one).
#[must_use]
pub fn visible_cards(content: Rect) -> usize {
    (content.height / TASK_CARD_HEIGHT).max(1) as usize
}

/// Calculates the scroll offset that keeps the selected card visible.
#[must_use]
pub fn scroll_offset(selected: Option<usize>, total: usize, visible: usize) -> usize {
    let Some(selected) = selected else {
        return 0;
    };

    if total <= visible {
        return 0;
    }

    let max_offset = total.saturating_sub(visible);
    selected.saturating_sub(visible / 2).min(max_offset)
}

/// Creates a rectangle of the given size centered within `area`.
///
/// Dimensions larger than `area` are clamped to fit.
#[must_use]
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
