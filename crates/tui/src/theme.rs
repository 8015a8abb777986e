//! Color palettes for the light and dark themes.
//!
//! Widgets never pick colors themselves; they read them from a [`Palette`]
//! built from the stored [`Theme`] and [`Accent`].

use ratatui::style::Color;
use taskboard_protocol::Priority;
use taskboard_store::{Accent, Theme};

/// Fallback accent when the stored one is not a `#rrggbb` color.
const DEFAULT_ACCENT_RGB: (u8, u8, u8) = (0x6c, 0x5c, 0xe7);

/// The resolved colors for one theme and accent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Screen background.
    pub background: Color,
    /// Primary text.
    pub text: Color,
    /// Secondary text and idle borders.
    pub muted: Color,
    /// Highlights: focused lane, selected card, header title.
    pub accent: Color,
    /// Border and tint for overdue cards.
    pub overdue: Color,
    /// Keybinding hints.
    pub key: Color,
}

impl Palette {
    /// Builds the palette for a theme and accent.
    ///
    /// # Examples
    ///
    /// ```
    /// use ratatui::style::Color;
    /// use taskboard_store::{Accent, Theme};
    /// use taskboard_tui::theme::Palette;
    ///
    /// let palette = Palette::new(Theme::Dark, &Accent::new("#00b894"));
    /// assert_eq!(palette.accent, Color::Rgb(0x00, 0xb8, 0x94));
    ///
    /// let palette = Palette::new(Theme::Light, &Accent::new("not-a-color"));
    /// assert_eq!(palette.accent, Color::Rgb(0x6c, 0x5c, 0xe7));
    /// ```
    #[must_use]
    pub fn new(theme: Theme, accent: &Accent) -> Self {
        let accent = accent_color(accent);
        match theme {
            Theme::Dark => Self {
                background: Color::Rgb(0x1e, 0x1e, 0x2e),
                text: Color::Rgb(0xdf, 0xe6, 0xe9),
                muted: Color::DarkGray,
                accent,
                overdue: Color::LightRed,
                key: Color::Yellow,
            },
            Theme::Light => Self {
                background: Color::Rgb(0xf5, 0xf6, 0xfa),
                text: Color::Rgb(0x2d, 0x34, 0x36),
                muted: Color::Gray,
                accent,
                overdue: Color::Red,
                key: Color::Rgb(0xb3, 0x6b, 0x00),
            },
        }
    }

    /// Returns the color marking a priority on task cards.
    #[must_use]
    pub const fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::Low => Color::Green,
            Priority::Medium => Color::Yellow,
            Priority::High => Color::Red,
        }
    }
}

/// Resolves an accent to a terminal color, falling back to the default
/// accent for values that are not hex colors.
#[must_use]
pub fn accent_color(accent: &Accent) -> Color {
    let (r, g, b) = accent.rgb().unwrap_or(DEFAULT_ACCENT_RGB);
    Color::Rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn themes_differ_in_background() {
        let accent = Accent::default();
        assert_ne!(
            Palette::new(Theme::Light, &accent).background,
            Palette::new(Theme::Dark, &accent).background
        );
    }

    #[test]
    fn accent_is_shared_across_themes() {
        let accent = Accent::new("#e17055");
        assert_eq!(
            Palette::new(Theme::Light, &accent).accent,
            Palette::new(Theme::Dark, &accent).accent
        );
    }

    #[test]
    fn signed_hex_accent_falls_back_to_default() {
        let (r, g, b) = DEFAULT_ACCENT_RGB;
        assert_eq!(accent_color(&Accent::new("#+f+f+f")), Color::Rgb(r, g, b));
    }

    #[test]
    fn priority_colors_are_distinct() {
        let palette = Palette::new(Theme::Light, &Accent::default());
        let colors: Vec<Color> = Priority::all()
            .into_iter()
            .map(|p| palette.priority_color(p))
            .collect();
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }
}
