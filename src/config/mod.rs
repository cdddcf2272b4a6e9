//! Configuration management for Tabula.
//!
//! Configuration lives in a TOML file in the platform config directory
//! (`~/.config/tabula/config.toml` on Linux). A missing file is not an
//! error; defaults are used instead.

mod settings;

pub use settings::{Settings, DEFAULT_ROWS};

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Environment variable overriding the config directory, used by tests
/// and portable installs.
const CONFIG_DIR_ENV: &str = "TABULA_CONFIG_DIR";

/// Configuration file name.
const CONFIG_FILE: &str = "config.toml";

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine configuration directory")]
    NoConfigDir,

    /// The config file exists but could not be read.
    #[error("failed to read configuration: {0}")]
    ReadError(std::io::Error),

    /// The config file could not be written.
    #[error("failed to write configuration: {0}")]
    WriteError(std::io::Error),

    /// The config file is not valid TOML.
    #[error("failed to parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("failed to serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// The application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Application-wide settings.
    #[serde(default)]
    pub settings: Settings,
}

impl Config {
    /// Load the configuration from the default location.
    ///
    /// A missing file yields the default configuration.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load the configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config = toml::from_str(&contents)?;
        debug!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Save the configuration to the default location, creating the
    /// directory if needed.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(ConfigError::WriteError)?;
        }
        self.save_to(&path)
    }

    /// Save the configuration to a specific file.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(ConfigError::WriteError)?;
        debug!(path = %path.display(), "Configuration saved");
        Ok(())
    }

    /// The path of the configuration file.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .ok_or(ConfigError::NoConfigDir)?
                .join("tabula"),
        };
        Ok(dir.join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.settings.theme = "light".to_string();
        config.settings.page_size = 5;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.settings.theme, "light");
        assert_eq!(loaded.settings.page_size, 5);
        assert!(loaded.settings.vim_mode);
    }

    #[test]
    fn test_load_from_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "settings = 3").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_from(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }

    #[test]
    #[serial]
    fn test_env_override_and_missing_file_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var(CONFIG_DIR_ENV, dir.path());

        let path = Config::path().unwrap();
        assert_eq!(path, dir.path().join(CONFIG_FILE));

        let config = Config::load().unwrap();
        assert_eq!(config.settings.theme, "dark");

        std::env::remove_var(CONFIG_DIR_ENV);
    }

    #[test]
    #[serial]
    fn test_save_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        std::env::set_var(CONFIG_DIR_ENV, &nested);

        let config = Config::default();
        config.save().unwrap();
        assert!(nested.join(CONFIG_FILE).exists());

        std::env::remove_var(CONFIG_DIR_ENV);
    }
}
