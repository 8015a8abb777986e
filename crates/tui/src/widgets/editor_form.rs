//! Task editor modal widget.
//!
//! Draws an [`EditorSession`] as a centered form over the board.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::editor::{EditorField, EditorSession};
use crate::layout::centered_rect;
use crate::theme::Palette;

use super::task_card::truncate_string;

/// The width of the editor panel.
const EDITOR_WIDTH: u16 = 56;

/// The height of the editor panel: five fields, a blank line, and the hint.
const EDITOR_HEIGHT: u16 = 9;

/// Width of a field label, excluding the focus marker.
const LABEL_WIDTH: usize = 14;

/// Width of the focus marker in front of each label.
const MARKER_WIDTH: usize = 2;

/// Renders the editor modal centered within `area`.
///
/// # Layout
///
/// ```text
/// ╭ Edit Task ───────────────────────────────────────────╮
/// │▸ Title:        Write release notes_                  │
/// │  Description:  Summarize the changes                 │
/// │  Due date:     2026-03-14                            │
/// │  Priority:     High                                  │
/// │  Tags:         docs, release                         │
/// │                                                      │
/// │Tab next field · ←→ priority · Enter save · Esc cancel│
/// ╰──────────────────────────────────────────────────────╯
/// ```
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use taskboard_protocol::Lane;
/// use taskboard_store::{Accent, Theme};
/// use taskboard_tui::editor::EditorSession;
/// use taskboard_tui::theme::Palette;
/// use taskboard_tui::widgets::render_editor;
///
/// let session = EditorSession::create(Lane::Todo);
/// let palette = Palette::new(Theme::Light, &Accent::default());
/// let area = Rect::new(0, 0, 80, 24);
/// let mut buf = Buffer::empty(area);
///
/// render_editor(&session, &palette, area, &mut buf);
/// ```
pub fn render_editor(session: &EditorSession, palette: &Palette, area: Rect, buf: &mut Buffer) {
    let popup_area = centered_rect(EDITOR_WIDTH, EDITOR_HEIGHT, area);
    Clear.render(popup_area, buf);

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", session.title()),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.accent))
        .style(Style::default().bg(palette.background));

    let inner = block.inner(popup_area);
    block.render(popup_area, buf);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(EditorField::all().len() as u16),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    let value_width = usize::from(inner.width).saturating_sub(MARKER_WIDTH + LABEL_WIDTH + 1);
    let lines: Vec<Line> = EditorField::all()
        .into_iter()
        .map(|field| field_line(session, field, value_width, palette))
        .collect();
    Paragraph::new(lines).render(chunks[0], buf);

    Paragraph::new(Line::from(Span::styled(
        "Tab next field · ←→ priority · Enter save · Esc cancel",
        Style::default()
            .fg(palette.muted)
            .add_modifier(Modifier::ITALIC),
    )))
    .render(chunks[2], buf);
}

fn field_line(
    session: &EditorSession,
    field: EditorField,
    value_width: usize,
    palette: &Palette,
) -> Line<'static> {
    let focused = session.focus() == field;
    let form = session.form();

    let marker = if focused { "▸ " } else { "  " };
    let label = format!("{marker}{:<LABEL_WIDTH$}", format!("{}:", field.label()));
    let label_style = if focused {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.muted)
    };

    let value = match field {
        EditorField::Title => form.title.clone(),
        EditorField::Description => form.desc.clone(),
        EditorField::DueDate => form.due_date.clone(),
        EditorField::Tags => form.tags.clone(),
        EditorField::Priority => {
            let name = form.priority.display_name();
            if focused {
                format!("◀ {name} ▶")
            } else {
                name.to_string()
            }
        }
    };

    let mut spans = vec![Span::styled(label, label_style)];
    if field.is_text() {
        // Keep the end of long values in view; that is where typing happens.
        let shown = tail(&value, value_width.saturating_sub(1));
        spans.push(Span::styled(shown, Style::default().fg(palette.text)));
        if focused {
            spans.push(Span::styled("_", Style::default().fg(palette.accent)));
        }
    } else {
        spans.push(Span::styled(
            truncate_string(&value, value_width),
            Style::default().fg(palette.priority_color(form.priority)),
        ));
    }
    Line::from(spans)
}

/// Returns the last `max` characters of `s`.
fn tail(s: &str, max: usize) -> String {
    let count = s.chars().count();
    s.chars().skip(count.saturating_sub(max)).collect()
}
