//! Application settings configuration.

use serde::{Deserialize, Serialize};

use crate::table::DEFAULT_PAGE_SIZE;

/// Default number of synthetic records to generate.
pub const DEFAULT_ROWS: usize = 20;

/// Application-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The UI theme to use ("dark" or "light").
    pub theme: String,
    /// Whether to use vim-style keybindings.
    pub vim_mode: bool,
    /// Rows per table page.
    pub page_size: usize,
    /// Number of synthetic records to generate at startup.
    pub rows: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            vim_mode: true,
            page_size: DEFAULT_PAGE_SIZE,
            rows: DEFAULT_ROWS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.theme, "dark");
        assert!(settings.vim_mode);
        assert_eq!(settings.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(settings.rows, DEFAULT_ROWS);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: Settings = toml::from_str("theme = \"light\"").unwrap();
        assert_eq!(settings.theme, "light");
        assert!(settings.vim_mode);
        assert_eq!(settings.rows, DEFAULT_ROWS);
    }
}
