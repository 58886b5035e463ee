//! Configuration file support for drizzle.
//!
//! The file lives at `<config dir>/drizzle/config.toml` and every key in it
//! is optional; missing keys keep the built-in defaults.

mod error;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use drizzle_core::{RainSettings, TrailProfile, parse_hex_color};
use serde::{Deserialize, Serialize};

pub use error::ConfigError;

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Settings as written in the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Fixed glyph color as `RRGGBB` hex, with or without `#`.
    pub color: Option<String>,
    /// Start in rainbow mode.
    pub rainbow: Option<bool>,
    /// Rainbow hue multiplier (0.0-1.0).
    pub rainbow_speed: Option<f64>,
    /// Render loop period in milliseconds.
    pub frame_interval_ms: Option<u64>,
    /// Glyph cell size in pixels.
    pub cell_size: Option<u16>,
    /// Trail profile, `"ring"` or `"cardinal"`.
    pub trail_profile: Option<TrailProfile>,
    /// Move the rainbow hue forwards instead of backwards.
    pub hue_forward: Option<bool>,
}

impl Config {
    /// Path of the configuration file in the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "drizzle").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load the configuration from the default location.
    ///
    /// A missing file (or no resolvable config directory) yields the default
    /// configuration.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_optional(&path),
            None => {
                tracing::debug!("no config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load a configuration file that may not exist.
    pub fn load_optional(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(path, &contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Load a configuration file that must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &contents)
    }

    fn parse(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        let config = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Overlay the values present in this file onto `settings`.
    pub fn apply_to(&self, settings: &mut RainSettings) -> Result<(), ConfigError> {
        if let Some(hex) = &self.color {
            settings.color =
                parse_hex_color(hex).ok_or_else(|| ConfigError::InvalidColor(hex.clone()))?;
        }
        if let Some(rainbow) = self.rainbow {
            settings.rainbow = rainbow;
        }
        if let Some(speed) = self.rainbow_speed {
            if !speed.is_finite() {
                return Err(ConfigError::InvalidValue {
                    field: "rainbow_speed",
                    reason: format!("{speed} is not a finite number"),
                });
            }
            settings.rainbow_speed = speed;
        }
        if let Some(interval) = self.frame_interval_ms {
            if interval == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "frame_interval_ms",
                    reason: "must be at least 1".to_string(),
                });
            }
            settings.frame_interval_ms = interval;
        }
        if let Some(cell_size) = self.cell_size {
            if cell_size == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "cell_size",
                    reason: "must be at least 1".to_string(),
                });
            }
            settings.cell_size = cell_size;
        }
        if let Some(profile) = self.trail_profile {
            settings.trail_profile = profile;
        }
        if let Some(forward) = self.hue_forward {
            settings.hue_forward = forward;
        }
        Ok(())
    }

    /// Build settings from the defaults with this file applied.
    pub fn to_settings(&self) -> Result<RainSettings, ConfigError> {
        let mut settings = RainSettings::default();
        self.apply_to(&mut settings)?;
        Ok(settings)
    }
}
