//! Board rendering widget.
//!
//! The board lays the three lanes side by side and draws the cards of the
//! current [`BoardView`] into them.

use std::collections::HashMap;

use chrono::NaiveDate;
use ratatui::{buffer::Buffer, layout::Rect};
use taskboard_protocol::{LANE_COUNT, Lane, Task, TaskId};

use super::lane::{LanePosition, LaneState, render_lane};
use crate::board_view::{BoardView, CardSlot};
use crate::layout::lane_areas;
use crate::theme::Palette;

/// Shared rendering inputs for everything drawn on the board.
#[derive(Debug, Clone, Copy)]
pub struct BoardContext<'a> {
    /// Colors for the active theme and accent.
    pub palette: &'a Palette,
    /// The day overdue checks compare against.
    pub today: NaiveDate,
    /// The card currently being dragged, if any.
    pub carried: Option<&'a TaskId>,
}

/// Renders the board into `area`.
///
/// `tasks` is the full collection; `view` decides which of them are shown
/// and in what order. `selected_lane` gets the focus highlight and
/// `drop_target` the drop highlight.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use taskboard_protocol::{Lane, Task, TaskDraft, TaskId};
/// use taskboard_store::{Accent, Theme};
/// use taskboard_tui::board_view::BoardView;
/// use taskboard_tui::theme::Palette;
/// use taskboard_tui::widgets::{BoardContext, render_board};
///
/// let tasks = vec![Task::from_draft(TaskId::generate(), TaskDraft::new("Example"), Lane::Todo)];
/// let view = BoardView::project(&tasks, "");
/// let palette = Palette::new(Theme::Dark, &Accent::default());
/// let ctx = BoardContext {
///     palette: &palette,
///     today: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     carried: None,
/// };
///
/// let area = Rect::new(0, 0, 80, 24);
/// let mut buf = Buffer::empty(area);
/// render_board(&tasks, &view, Lane::Todo, None, None, &ctx, area, &mut buf);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn render_board(
    tasks: &[Task],
    view: &BoardView,
    selected_lane: Lane,
    selected: Option<CardSlot>,
    drop_target: Option<Lane>,
    ctx: &BoardContext<'_>,
    area: Rect,
    buf: &mut Buffer,
) {
    let by_id: HashMap<&TaskId, &Task> = tasks.iter().map(|task| (&task.id, task)).collect();
    let areas = lane_areas(area);

    for (index, (lane, lane_area)) in Lane::all().into_iter().zip(areas).enumerate() {
        let cards: Vec<&Task> = view
            .lane(lane)
            .iter()
            .filter_map(|id| by_id.get(id).copied())
            .collect();

        let state = LaneState {
            selected: selected
                .filter(|slot| slot.lane == lane)
                .map(|slot| slot.index),
            focused: lane == selected_lane,
            prev_focused: selected_lane.index() + 1 == index,
            drop_target: drop_target == Some(lane),
        };

        render_lane(
            lane,
            &cards,
            state,
            LanePosition::of(index, LANE_COUNT),
            ctx,
            lane_area,
            buf,
        );
    }
}
