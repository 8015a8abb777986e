//! Lane rendering widget.
//!
//! A lane is a column with a header and a vertical stack of task cards.
//! Adjacent lanes share their border, so each lane draws only its left
//! side except the last one.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};
use taskboard_protocol::{Lane, Task};

use super::board::BoardContext;
use super::task_card::render_task_card;
pub use crate::layout::LanePosition;
use crate::layout::{TASK_CARD_HEIGHT, scroll_offset, visible_cards};

/// Selection and highlighting for one lane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaneState {
    /// Index of the selected card among the lane's cards, if the selection
    /// is in this lane.
    pub selected: Option<usize>,
    /// The lane has keyboard focus.
    pub focused: bool,
    /// The lane to the left has focus; the shared border is highlighted.
    pub prev_focused: bool,
    /// A carried card is hovering over this lane.
    pub drop_target: bool,
}

/// Border set for the first (leftmost) lane: rounded corners on left, no right border.
const BORDER_SET_FIRST: border::Set = border::Set {
    top_left: "╭",
    top_right: "─",
    bottom_left: "╰",
    bottom_right: "─",
    vertical_left: "│",
    vertical_right: " ",
    horizontal_top: "─",
    horizontal_bottom: "─",
};

/// Border set for middle lanes: T-connectors on left, no right border.
const BORDER_SET_MIDDLE: border::Set = border::Set {
    top_left: "┬",
    top_right: "─",
    bottom_left: "┴",
    bottom_right: "─",
    vertical_left: "│",
    vertical_right: " ",
    horizontal_top: "─",
    horizontal_bottom: "─",
};

/// Border set for the last (rightmost) lane: T-connectors on left, rounded on right.
const BORDER_SET_LAST: border::Set = border::Set {
    top_left: "┬",
    top_right: "╮",
    bottom_left: "┴",
    bottom_right: "╯",
    vertical_left: "│",
    vertical_right: "│",
    horizontal_top: "─",
    horizontal_bottom: "─",
};

/// Renders a single lane to the buffer.
///
/// `tasks` are the lane's visible cards, top to bottom.
///
/// # Layout
///
/// ```text
/// ╭To Do (2)──────────
/// │┌────────────────┐
/// ││Task 1          │
/// ││desc...         │
/// ││Priority: Medium│
/// │└────────────────┘
/// ╰───────────────────
/// ```
pub fn render_lane(
    lane: Lane,
    tasks: &[&Task],
    state: LaneState,
    position: LanePosition,
    ctx: &BoardContext<'_>,
    area: Rect,
    buf: &mut Buffer,
) {
    let palette = ctx.palette;
    let lit = state.focused || state.drop_target;
    let border_style = if lit {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.muted)
    };

    let mut title = format!("{} ({})", lane.display_name(), tasks.len());
    if state.drop_target {
        title.push_str(" ▼ drop here");
    }
    let title_style = if lit {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.text)
    };

    let border_set = match position {
        LanePosition::First => BORDER_SET_FIRST,
        LanePosition::Middle => BORDER_SET_MIDDLE,
        LanePosition::Last => BORDER_SET_LAST,
    };

    let block = Block::default()
        .title(Span::styled(title, title_style))
        .borders(position.borders())
        .border_set(border_set)
        .border_style(border_style);

    let inner_area = block.inner(area);
    block.render(area, buf);

    // The left border is shared with the previous lane; light it when that
    // lane has focus.
    if state.prev_focused && !lit && area.width > 0 {
        let highlight_style = Style::default().fg(palette.accent);
        for y in area.y..area.y.saturating_add(area.height) {
            if let Some(cell) = buf.cell_mut((area.x, y)) {
                cell.set_style(highlight_style);
            }
        }
    }

    if tasks.is_empty() {
        render_empty_placeholder(ctx, inner_area, buf);
        return;
    }

    let visible = visible_cards(inner_area);
    let offset = scroll_offset(state.selected, tasks.len(), visible);

    for (row, task) in tasks.iter().skip(offset).take(visible).enumerate() {
        let y = inner_area.y + row as u16 * TASK_CARD_HEIGHT;
        let height = TASK_CARD_HEIGHT.min(inner_area.bottom().saturating_sub(y));
        if height == 0 {
            break;
        }
        let card_area = Rect::new(inner_area.x, y, inner_area.width, height);
        let is_selected = state.selected == Some(offset + row);
        render_task_card(task, is_selected, ctx, card_area, buf);
    }
}

/// Renders a placeholder message for empty lanes.
fn render_empty_placeholder(ctx: &BoardContext<'_>, area: Rect, buf: &mut Buffer) {
    let placeholder = Paragraph::new(Line::from(Span::styled(
        "No tasks",
        Style::default()
            .fg(ctx.palette.muted)
            .add_modifier(Modifier::ITALIC),
    )));

    placeholder.render(area, buf);
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use taskboard_protocol::{TaskDraft, TaskId};
    use taskboard_store::{Accent, Theme};

    use super::*;
    use crate::test_utils::buffer_to_string;
    use crate::theme::Palette;

    fn render(
        lane: Lane,
        tasks: &[&Task],
        state: LaneState,
        area: Rect,
    ) -> Buffer {
        let palette = Palette::new(Theme::Light, &Accent::default());
        let ctx = BoardContext {
            palette: &palette,
            today: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            carried: None,
        };
        let mut buf = Buffer::empty(area);
        render_lane(
            lane,
            tasks,
            state,
            LanePosition::First,
            &ctx,
            area,
            &mut buf,
        );
        buf
    }

    fn task(title: &str) -> Task {
        Task::from_draft(TaskId::generate(), TaskDraft::new(title), Lane::Doing)
    }

    #[test]
    fn position_of_index() {
        assert_eq!(LanePosition::of(0, 3), LanePosition::First);
        assert_eq!(LanePosition::of(1, 3), LanePosition::Middle);
        assert_eq!(LanePosition::of(2, 3), LanePosition::Last);
    }

    #[test]
    fn render_empty_lane() {
        let area = Rect::new(0, 0, 20, 15);
        let buf = render(Lane::Todo, &[], LaneState::default(), area);

        let content = buffer_to_string(&buf);
        assert!(content.contains("To Do (0)"));
        assert!(content.contains("No tasks"));
    }

    #[test]
    fn render_lane_with_tasks() {
        let (a, b) = (task("Task 1"), task("Task 2"));
        let area = Rect::new(0, 0, 25, 15);
        let buf = render(
            Lane::Doing,
            &[&a, &b],
            LaneState {
                selected: Some(0),
                focused: true,
                ..LaneState::default()
            },
            area,
        );

        let content = buffer_to_string(&buf);
        assert!(content.contains("Doing (2)"));
        assert!(content.contains("Task 1"));
        assert!(content.contains("Task 2"));
    }

    #[test]
    fn drop_target_is_marked() {
        let area = Rect::new(0, 0, 30, 10);
        let buf = render(
            Lane::Done,
            &[],
            LaneState {
                drop_target: true,
                ..LaneState::default()
            },
            area,
        );

        assert!(buffer_to_string(&buf).contains("drop here"));
    }

    #[test]
    fn scrolls_to_keep_selection_visible() {
        let tasks: Vec<Task> = (0..10).map(|i| task(&format!("Card {i}"))).collect();
        let refs: Vec<&Task> = tasks.iter().collect();
        // 17 content rows: three cards.
        let area = Rect::new(0, 0, 25, 19);

        let state = LaneState {
            selected: Some(9),
            ..LaneState::default()
        };
        let buf = render(Lane::Doing, &refs, state, area);
        let content = buffer_to_string(&buf);

        assert!(content.contains("Card 9"));
        assert!(content.contains("Card 7"));
        assert!(!content.contains("Card 0"));
    }
}
