//! Status bar widget.
//!
//! One row at the bottom of the screen: the latest status message on the
//! left and the key hints for the current focus on the right.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::state::Focus;
use crate::theme::Palette;

/// Which set of key hints to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintMode {
    /// Browsing the board.
    Board,
    /// Carrying a card with the keyboard or mouse.
    Dragging,
    /// Editing a task.
    Editor,
    /// Typing a search query.
    Search,
}

impl HintMode {
    /// Picks the hints for the given focus.
    #[must_use]
    pub const fn new(focus: Focus, dragging: bool) -> Self {
        match focus {
            Focus::Board if dragging => Self::Dragging,
            Focus::Board => Self::Board,
            Focus::Editor => Self::Editor,
            Focus::Search => Self::Search,
        }
    }

    const fn hints(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Board => &[
                ("n", "new"),
                ("e", "edit"),
                ("d", "delete"),
                ("m", "move"),
                ("/", "search"),
                ("p", "timer"),
                ("?", "help"),
            ],
            Self::Dragging => &[("←→", "lane"), ("Enter", "drop"), ("Esc", "cancel")],
            Self::Editor => &[
                ("Tab", "next field"),
                ("←→", "priority"),
                ("Enter", "save"),
                ("Esc", "cancel"),
            ],
            Self::Search => &[("Enter", "apply"), ("Esc", "clear")],
        }
    }
}

/// Renders the status bar into `area`.
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use taskboard_store::{Accent, Theme};
/// use taskboard_tui::theme::Palette;
/// use taskboard_tui::widgets::{HintMode, render_status_bar};
///
/// let palette = Palette::new(Theme::Dark, &Accent::default());
/// let area = Rect::new(0, 0, 80, 1);
/// let mut buf = Buffer::empty(area);
///
/// render_status_bar(Some("Saved 'Ship it'"), HintMode::Board, &palette, area, &mut buf);
/// ```
pub fn render_status_bar(
    message: Option<&str>,
    mode: HintMode,
    palette: &Palette,
    area: Rect,
    buf: &mut Buffer,
) {
    let hints = hint_line(mode, palette);

    let Some(message) = message else {
        Paragraph::new(hints)
            .alignment(Alignment::Right)
            .render(area, buf);
        return;
    };

    let hints_width = u16::try_from(hints.width()).unwrap_or(u16::MAX);
    let [message_area, hints_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(hints_width)]).areas(area);

    Paragraph::new(Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(palette.accent),
    )))
    .render(message_area, buf);
    Paragraph::new(hints)
        .alignment(Alignment::Right)
        .render(hints_area, buf);
}

fn hint_line(mode: HintMode, palette: &Palette) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (key, action)) in mode.hints().iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(*key, Style::default().fg(palette.key)));
        spans.push(Span::styled(
            format!(" {action}"),
            Style::default().fg(palette.muted),
        ));
    }
    Line::from(spans)
}
