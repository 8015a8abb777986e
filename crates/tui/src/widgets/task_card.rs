//! Task card rendering widget.
//!
//! A card shows the title, a one-line description, and a metadata line
//! with the due date, priority, and tags. The border color tells the
//! priority at a glance; overdue cards and the selected card override it.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use taskboard_protocol::{DUE_DATE_FORMAT, Task};

use super::board::BoardContext;

/// Renders a task card to the buffer.
///
/// # Layout
///
/// ```text
/// ┌────────────────────────────┐
/// │Write spec                  │
/// │First draft of the...       │
/// │Due: 2026-03-14 Priority: H…│
/// └────────────────────────────┘
/// ```
///
/// The carried card of a drag is drawn with a double border.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use taskboard_protocol::{Lane, Task, TaskDraft, TaskId};
/// use taskboard_store::{Accent, Theme};
/// use taskboard_tui::theme::Palette;
/// use taskboard_tui::widgets::{BoardContext, render_task_card};
///
/// let task = Task::from_draft(TaskId::generate(), TaskDraft::new("Ship it"), Lane::Todo);
/// let palette = Palette::new(Theme::Light, &Accent::default());
/// let ctx = BoardContext {
///     palette: &palette,
///     today: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     carried: None,
/// };
///
/// let area = Rect::new(0, 0, 30, 5);
/// let mut buf = Buffer::empty(area);
/// render_task_card(&task, false, &ctx, area, &mut buf);
/// ```
pub fn render_task_card(
    task: &Task,
    is_selected: bool,
    ctx: &BoardContext<'_>,
    area: Rect,
    buf: &mut Buffer,
) {
    if area.width < 4 || area.height < 3 {
        return;
    }

    let palette = ctx.palette;
    let overdue = task.is_overdue(ctx.today);
    let is_carried = ctx.carried == Some(&task.id);

    let border_color = if is_selected {
        palette.accent
    } else if overdue {
        palette.overdue
    } else {
        palette.priority_color(task.priority)
    };
    let title_style = if is_selected {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.text)
    };

    let inner_width = area.width.saturating_sub(2) as usize;
    let content = vec![
        Line::from(Span::styled(
            truncate_string(&task.title, inner_width),
            title_style,
        )),
        Line::from(Span::styled(
            truncate_string(&task.desc, inner_width),
            Style::default().fg(palette.muted),
        )),
        meta_line(task, overdue, ctx),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if is_carried {
            BorderType::Double
        } else {
            BorderType::Plain
        })
        .border_style(Style::default().fg(border_color));

    Paragraph::new(content).block(block).render(area, buf);
}

/// Builds the `Due: … Priority: … tags` line.
fn meta_line<'a>(task: &'a Task, overdue: bool, ctx: &BoardContext<'_>) -> Line<'a> {
    let palette = ctx.palette;
    let mut spans = Vec::with_capacity(4);

    if let Some(due) = task.due_date {
        let style = if overdue {
            Style::default()
                .fg(palette.overdue)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.muted)
        };
        spans.push(Span::styled(
            format!("Due: {} ", due.format(DUE_DATE_FORMAT)),
            style,
        ));
    }

    spans.push(Span::styled(
        format!("Priority: {}", task.priority.display_name()),
        Style::default().fg(palette.priority_color(task.priority)),
    ));

    if !task.tags.is_empty() {
        spans.push(Span::styled(
            format!(" {}", task.tags.join(" ")),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::ITALIC),
        ));
    }

    Line::from(spans)
}

/// Truncates a string to fit within a given width, adding ellipsis if needed.
pub(crate) fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width > 3 {
        let truncated: String = s.chars().take(max_width - 3).collect();
        format!("{truncated}...")
    } else {
        s.chars().take(max_width).collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use ratatui::style::Color;
    use taskboard_protocol::{Lane, Priority, TaskDraft, TaskId};
    use taskboard_store::{Accent, Theme};

    use super::*;
    use crate::test_utils::buffer_to_string;
    use crate::theme::Palette;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_task() -> Task {
        Task::from_draft(
            TaskId::from("t1"),
            TaskDraft::new("Write spec")
                .with_desc("First draft")
                .with_due_date(date(2026, 3, 14))
                .with_priority(Priority::High)
                .with_tags(["urgent", "doc"]),
            Lane::Todo,
        )
    }

    fn render(task: &Task, is_selected: bool, today: NaiveDate) -> Buffer {
        let palette = Palette::new(Theme::Light, &Accent::default());
        let ctx = BoardContext {
            palette: &palette,
            today,
            carried: None,
        };
        let area = Rect::new(0, 0, 50, 5);
        let mut buf = Buffer::empty(area);
        render_task_card(task, is_selected, &ctx, area, &mut buf);
        buf
    }

    #[test]
    fn truncate_string_short() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
    }

    #[test]
    fn truncate_string_exact() {
        assert_eq!(truncate_string("Hello", 5), "Hello");
    }

    #[test]
    fn truncate_string_long() {
        assert_eq!(truncate_string("Hello, World!", 10), "Hello, ...");
    }

    #[test]
    fn truncate_string_very_short_max() {
        assert_eq!(truncate_string("Hello", 3), "Hel");
    }

    #[test]
    fn card_shows_every_field() {
        let buf = render(&sample_task(), false, date(2026, 1, 1));
        let content = buffer_to_string(&buf);

        assert!(content.contains("Write spec"));
        assert!(content.contains("First draft"));
        assert!(content.contains("Due: 2026-03-14 Priority: High urgent doc"));
    }

    #[test]
    fn card_without_due_date_shows_priority_only() {
        let task = Task::from_draft(TaskId::from("t2"), TaskDraft::new("Plain"), Lane::Done);
        let content = buffer_to_string(&render(&task, false, date(2026, 1, 1)));

        assert!(content.contains("Priority: Medium"));
        assert!(!content.contains("Due:"));
    }

    #[test]
    fn border_reflects_priority_then_overdue_then_selection() {
        let palette = Palette::new(Theme::Light, &Accent::default());
        let task = sample_task();

        let buf = render(&task, false, date(2026, 1, 1));
        assert_eq!(buf[(0, 0)].fg, palette.priority_color(Priority::High));

        let buf = render(&task, false, date(2026, 4, 1));
        assert_eq!(buf[(0, 0)].fg, palette.overdue);

        let buf = render(&task, true, date(2026, 4, 1));
        assert_eq!(buf[(0, 0)].fg, palette.accent);
    }

    #[test]
    fn done_cards_are_never_overdue() {
        let mut task = sample_task();
        task.status = Lane::Done;
        task.priority = Priority::Low;

        let buf = render(&task, false, date(2030, 1, 1));
        assert_eq!(buf[(0, 0)].fg, Color::Green);
    }

    #[test]
    fn carried_card_has_double_border() {
        let task = sample_task();
        let palette = Palette::new(Theme::Dark, &Accent::default());
        let ctx = BoardContext {
            palette: &palette,
            today: date(2026, 1, 1),
            carried: Some(&task.id),
        };
        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);

        render_task_card(&task, false, &ctx, area, &mut buf);

        assert_eq!(buf[(0, 0)].symbol(), "╔");
    }

    #[test]
    fn render_task_card_handles_small_area() {
        let task = sample_task();
        let palette = Palette::new(Theme::Light, &Accent::default());
        let ctx = BoardContext {
            palette: &palette,
            today: date(2026, 1, 1),
            carried: None,
        };
        let area = Rect::new(0, 0, 2, 2);
        let mut buf = Buffer::empty(area);

        // Should not panic with tiny area
        render_task_card(&task, false, &ctx, area, &mut buf);
    }
}
