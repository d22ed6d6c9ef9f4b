//! Configuration management.

use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration for marquee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarqueeConfig {
    /// Path to the `SQLite` database file.
    pub db_path: PathBuf,
    /// Directory chart files are written into.
    pub charts_dir: PathBuf,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Database path.
    pub db_path: Option<String>,
    /// Charts output directory.
    pub charts_dir: Option<String>,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("movies.db"),
            charts_dir: PathBuf::from("charts"),
        }
    }
}

impl MarqueeConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &std::path::Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::operation("read_config_file", e))?;

        let file: ConfigFile =
            toml::from_str(&contents).map_err(|e| crate::Error::operation("parse_config_file", e))?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// `.env` is loaded first (ignored if absent) so `MARQUEE_DB` can be
    /// kept next to the project. Then, in order:
    /// 1. The `MARQUEE_DB` environment variable, if set.
    /// 2. Platform config dir (`~/Library/Application Support/marquee/` on macOS).
    /// 3. XDG-style `~/.config/marquee/config.toml`.
    ///
    /// Returns default configuration if none of these yield a config.
    #[must_use]
    pub fn load_default() -> Self {
        let _ = dotenvy::dotenv();

        let mut config = Self::load_config_file().unwrap_or_default();

        if let Ok(db) = std::env::var("MARQUEE_DB") {
            if !db.trim().is_empty() {
                config.db_path = PathBuf::from(db);
            }
        }

        config
    }

    fn load_config_file() -> Option<Self> {
        let base_dirs = directories::BaseDirs::new()?;

        let platform_config = base_dirs.config_dir().join("marquee").join("config.toml");
        if platform_config.exists() {
            if let Ok(config) = Self::load_from_file(&platform_config) {
                return Some(config);
            }
        }

        let xdg_config = base_dirs
            .home_dir()
            .join(".config")
            .join("marquee")
            .join("config.toml");
        if xdg_config.exists() {
            if let Ok(config) = Self::load_from_file(&xdg_config) {
                return Some(config);
            }
        }

        None
    }

    fn from_config_file(file: ConfigFile) -> Self {
        let defaults = Self::default();
        Self {
            db_path: file.db_path.map_or(defaults.db_path, PathBuf::from),
            charts_dir: file.charts_dir.map_or(defaults.charts_dir, PathBuf::from),
        }
    }
}
