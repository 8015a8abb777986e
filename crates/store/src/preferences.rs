//! Display preferences: the theme and the accent color.
//!
//! Preferences live in their own slots, [`THEME_SLOT`] and [`ACCENT_SLOT`],
//! next to the task collection.

use std::fmt;

use tracing::{debug, instrument, warn};

use crate::error::Result;
use crate::storage::{ACCENT_SLOT, Storage, THEME_SLOT};

/// The accent color used when none has been chosen.
pub const DEFAULT_ACCENT: &str = "#6c5ce7";

/// Accent colors offered by [`PreferenceStore::cycle_accent`], in order.
pub const ACCENT_PALETTE: [&str; 6] = [
    DEFAULT_ACCENT,
    "#00b894",
    "#0984e3",
    "#e17055",
    "#fdcb6e",
    "#e84393",
];

/// The color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    /// Light background (default).
    #[default]
    Light,
    /// Dark background.
    Dark,
}

impl Theme {
    /// Parses a stored theme value. Only `"dark"` selects the dark theme.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskboard_store::Theme;
    ///
    /// assert_eq!(Theme::from_slot(Some("dark")), Theme::Dark);
    /// assert_eq!(Theme::from_slot(Some("sepia")), Theme::Light);
    /// assert_eq!(Theme::from_slot(None), Theme::Light);
    /// ```
    #[must_use]
    pub fn from_slot(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    /// Returns the stored form of this theme.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Returns the other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Returns `true` for the dark theme.
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An accent color as stored, usually a `#rrggbb` hex string.
///
/// Any string is kept as-is; [`Accent::rgb`] returns `None` for values
/// that are not hex colors so callers can fall back to a default.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Accent(String);

impl Accent {
    /// Wraps a color value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the stored form of this accent.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the accent as a `#rrggbb` hex color.
    ///
    /// # Examples
    ///
    /// ```
    /// use taskboard_store::Accent;
    ///
    /// assert_eq!(Accent::new("#6c5ce7").rgb(), Some((0x6c, 0x5c, 0xe7)));
    /// assert_eq!(Accent::new("purple").rgb(), None);
    /// ```
    #[must_use]
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.0.trim().strip_prefix('#')?;
        // from_str_radix also takes a sign, so check the digits first.
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Returns the palette entry after this one, wrapping around.
    ///
    /// An accent outside the palette advances to the first entry.
    #[must_use]
    pub fn next_in_palette(&self) -> Self {
        let next = ACCENT_PALETTE
            .iter()
            .position(|c| c.eq_ignore_ascii_case(self.0.trim()))
            .map_or(0, |i| (i + 1) % ACCENT_PALETTE.len());
        Self::new(ACCENT_PALETTE[next])
    }
}

impl Default for Accent {
    fn default() -> Self {
        Self::new(DEFAULT_ACCENT)
    }
}

impl fmt::Display for Accent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The current display preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    /// The color theme.
    pub theme: Theme,
    /// The accent color.
    pub accent: Accent,
}

/// Display preferences mirrored to storage.
///
/// Like [`crate::TaskRepository`], each change is written immediately and
/// rolled back if the write fails.
#[derive(Debug)]
pub struct PreferenceStore {
    prefs: Preferences,
    storage: Box<dyn Storage>,
}

impl PreferenceStore {
    /// Loads preferences from storage, falling back to defaults for
    /// missing or unreadable slots.
    #[instrument(skip_all)]
    pub fn load(storage: Box<dyn Storage>) -> Self {
        let theme = match storage.get(THEME_SLOT) {
            Ok(value) => Theme::from_slot(value.as_deref()),
            Err(e) => {
                warn!(error = %e, "failed to read theme, using default");
                Theme::default()
            }
        };

        let accent = match storage.get(ACCENT_SLOT) {
            Ok(Some(value)) if !value.trim().is_empty() => Accent::new(value.trim()),
            Ok(_) => Accent::default(),
            Err(e) => {
                warn!(error = %e, "failed to read accent, using default");
                Accent::default()
            }
        };

        debug!(%theme, %accent, "loaded preferences");
        Self {
            prefs: Preferences { theme, accent },
            storage,
        }
    }

    /// Returns the current preferences.
    #[must_use]
    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    /// Returns the current theme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.prefs.theme
    }

    /// Returns the current accent.
    #[must_use]
    pub fn accent(&self) -> &Accent {
        &self.prefs.accent
    }

    /// Switches between light and dark and stores the new theme.
    ///
    /// # Errors
    ///
    /// Returns an error if the theme slot cannot be written. The theme is
    /// unchanged in that case.
    pub fn toggle_theme(&mut self) -> Result<Theme> {
        let theme = self.prefs.theme.toggled();
        self.storage.set(THEME_SLOT, theme.as_str())?;
        self.prefs.theme = theme;
        debug!(%theme, "theme changed");
        Ok(theme)
    }

    /// Stores a new accent color.
    ///
    /// # Errors
    ///
    /// Returns an error if the accent slot cannot be written. The accent
    /// is unchanged in that case.
    pub fn set_accent(&mut self, accent: Accent) -> Result<()> {
        self.storage.set(ACCENT_SLOT, accent.as_str())?;
        debug!(%accent, "accent changed");
        self.prefs.accent = accent;
        Ok(())
    }

    /// Advances to the next palette accent and stores it.
    ///
    /// # Errors
    ///
    /// Returns an error if the accent slot cannot be written.
    pub fn cycle_accent(&mut self) -> Result<Accent> {
        let next = self.prefs.accent.next_in_palette();
        self.set_accent(next.clone())?;
        Ok(next)
    }
}
