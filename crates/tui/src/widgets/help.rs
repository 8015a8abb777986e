//! Help overlay widget.
//!
//! This module provides the help overlay that displays all available keybindings
//! when the user presses `?`.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::layout::centered_rect;
use crate::theme::Palette;

/// The width of the help overlay panel.
const HELP_WIDTH: u16 = 40;

/// The height of the help overlay panel.
const HELP_HEIGHT: u16 = 24;

/// Key bindings by section, as shown in the overlay.
const SECTIONS: [(&str, &[(&str, &str)]); 3] = [
    (
        "Navigation",
        &[
            ("← →", "Move between lanes"),
            ("↑ ↓", "Select card"),
            ("Esc", "Clear selection"),
        ],
    ),
    (
        "Tasks",
        &[
            ("n", "New task"),
            ("Enter / e", "Edit task"),
            ("d", "Delete task"),
            ("m", "Pick up / drop card"),
            ("/", "Search"),
        ],
    ),
    (
        "Timer and display",
        &[
            ("p", "Start / pause timer"),
            ("r", "Reset timer"),
            ("t", "Toggle theme"),
            ("a", "Next accent color"),
            ("?", "Toggle help"),
            ("Ctrl+C", "Quit"),
        ],
    ),
];

/// Renders a centered help overlay displaying all keybindings.
///
/// The overlay is rendered on top of the existing content after clearing
/// the area behind it.
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use taskboard_store::{Accent, Theme};
/// use taskboard_tui::theme::Palette;
/// use taskboard_tui::widgets::render_help_overlay;
///
/// let palette = Palette::new(Theme::Dark, &Accent::default());
/// let area = Rect::new(0, 0, 80, 30);
/// let mut buf = Buffer::empty(area);
///
/// render_help_overlay(&palette, area, &mut buf);
/// ```
pub fn render_help_overlay(palette: &Palette, area: Rect, buf: &mut Buffer) {
    let popup_area = centered_rect(HELP_WIDTH, HELP_HEIGHT, area);

    Clear.render(popup_area, buf);

    let help_block = Block::default()
        .title(Span::styled(
            " Help ",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.accent))
        .style(Style::default().bg(palette.background));

    Paragraph::new(build_help_lines(palette))
        .block(help_block)
        .alignment(Alignment::Left)
        .render(popup_area, buf);
}

/// Builds the lines of help content.
fn build_help_lines(palette: &Palette) -> Vec<Line<'static>> {
    let header_style = Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(palette.key);
    let text_style = Style::default().fg(palette.text);
    let hint_style = Style::default()
        .fg(palette.muted)
        .add_modifier(Modifier::ITALIC);

    let mut lines = Vec::new();
    for (title, bindings) in SECTIONS {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!("  {title}"), header_style)));
        for (key, action) in bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key:<11}"), key_style),
                Span::styled(*action, text_style),
            ]));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press any key to close",
        hint_style,
    )));
    lines
}
