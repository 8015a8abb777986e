//! Header bar widget.
//!
//! The header shows the application name, the search field, and the
//! pomodoro timer inside one rounded block.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::pomodoro::Pomodoro;
use crate::theme::Palette;

/// Width reserved for the timer: "Break time 05:00 [Pause]" plus padding.
const TIMER_WIDTH: u16 = 26;

/// Width reserved for the application name.
const TITLE_WIDTH: u16 = 12;

/// What the search field should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLine<'a> {
    /// The current query.
    pub query: &'a str,
    /// The field is taking input.
    pub active: bool,
    /// Cards hidden by the query.
    pub hidden: usize,
}

/// Renders the header into `area`.
///
/// # Layout
///
/// ```text
/// ╭──────────────────────────────────────────────────────────────╮
/// │taskboard   Search: bug_ (4 hidden)    Work time 24:59 [Pause]│
/// ╰──────────────────────────────────────────────────────────────╯
/// ```
pub fn render_header(
    search: SearchLine<'_>,
    pomodoro: &Pomodoro,
    palette: &Palette,
    area: Rect,
    buf: &mut Buffer,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.muted));

    let inner = block.inner(area);
    block.render(area, buf);

    let [title_area, search_area, timer_area] = Layout::horizontal([
        Constraint::Length(TITLE_WIDTH),
        Constraint::Min(0),
        Constraint::Length(TIMER_WIDTH),
    ])
    .areas(inner);

    Paragraph::new(Line::from(Span::styled(
        "taskboard",
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
    )))
    .render(title_area, buf);

    Paragraph::new(search_line(search, palette)).render(search_area, buf);

    Paragraph::new(timer_line(pomodoro, palette))
        .alignment(Alignment::Right)
        .render(timer_area, buf);
}

fn search_line<'a>(search: SearchLine<'a>, palette: &Palette) -> Line<'a> {
    if search.query.is_empty() && !search.active {
        return Line::from(vec![
            Span::styled("/", Style::default().fg(palette.key)),
            Span::styled(" to search", Style::default().fg(palette.muted)),
        ]);
    }

    let label_style = if search.active {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.muted)
    };
    let mut spans = vec![
        Span::styled("Search: ", label_style),
        Span::styled(search.query, Style::default().fg(palette.text)),
    ];
    if search.active {
        spans.push(Span::styled(
            "_",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::SLOW_BLINK),
        ));
    }
    if search.hidden > 0 {
        spans.push(Span::styled(
            format!(" ({} hidden)", search.hidden),
            Style::default().fg(palette.muted),
        ));
    }
    Line::from(spans)
}

fn timer_line(pomodoro: &Pomodoro, palette: &Palette) -> Line<'static> {
    let clock_style = if pomodoro.is_running() {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.text)
    };

    Line::from(vec![
        Span::styled(
            format!("{} ", pomodoro.status_label()),
            Style::default().fg(palette.muted),
        ),
        Span::styled(pomodoro.display(), clock_style),
        Span::styled(
            format!(" [{}]", pomodoro.button_label()),
            Style::default().fg(palette.key),
        ),
    ])
}
