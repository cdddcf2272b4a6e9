//! Theme and styling configuration.
//!
//! A theme is selected once at startup (config or `--theme`) and read
//! through the global [`theme`] accessor by every render path.

use std::sync::RwLock;

use ratatui::style::Color;

/// Color theme for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Header row foreground.
    pub header: Color,
    /// Border color.
    pub border: Color,
    /// Highlight color for the focused column.
    pub highlight: Color,
    /// Accent color for a grabbed column and sort indicators.
    pub accent: Color,
    /// Dimmed color for hints and disabled controls.
    pub muted: Color,
}

impl Theme {
    /// The dark theme (default).
    pub const DARK: Theme = Theme {
        fg: Color::White,
        header: Color::Cyan,
        border: Color::DarkGray,
        highlight: Color::Cyan,
        accent: Color::Yellow,
        muted: Color::DarkGray,
    };

    /// The light theme.
    pub const LIGHT: Theme = Theme {
        fg: Color::Black,
        header: Color::Blue,
        border: Color::Gray,
        highlight: Color::Blue,
        accent: Color::Magenta,
        muted: Color::Gray,
    };
}

impl Default for Theme {
    fn default() -> Self {
        Theme::DARK
    }
}

static CURRENT: RwLock<Theme> = RwLock::new(Theme::DARK);

/// Resolve a theme by name. Unknown names fall back to dark.
pub fn load_theme(name: &str) -> Theme {
    match name {
        "light" => Theme::LIGHT,
        _ => Theme::DARK,
    }
}

/// Install the named theme as the active one.
pub fn init_theme(name: &str) {
    if let Ok(mut current) = CURRENT.write() {
        *current = load_theme(name);
    }
}

/// The active theme.
pub fn theme() -> Theme {
    CURRENT.read().map(|t| *t).unwrap_or_default()
}
