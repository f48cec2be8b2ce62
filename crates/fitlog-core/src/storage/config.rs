//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Reminder clock tuning (warning window, tick period)
//! - Notification preferences
//!
//! Configuration is stored at `~/.config/fitlog/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::{ConfigError, CoreError};
use crate::reminder::ClockConfig;

/// Reminder clock configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockSection {
    /// Countdown lead time in minutes.
    #[serde(default = "default_warning_window")]
    pub warning_window_min: u32,
    /// Tick period in seconds for the foreground clock loop.
    #[serde(default = "default_tick_period")]
    pub tick_period_secs: u32,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_50")]
    pub volume: u32,
    /// Path to custom alarm sound file (optional).
    /// If set, this file will be played instead of the default chime.
    #[serde(default)]
    pub custom_sound: Option<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/fitlog/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub clock: ClockSection,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

// Default functions
fn default_warning_window() -> u32 {
    10
}
fn default_tick_period() -> u32 {
    1
}
fn default_true() -> bool {
    true
}
fn default_50() -> u32 {
    50
}

impl Default for ClockSection {
    fn default() -> Self {
        Self {
            warning_window_min: default_warning_window(),
            tick_period_secs: default_tick_period(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 50,
            custom_sound: None,
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, CoreError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, CoreError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)
                    .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), CoreError> {
        let path = Self::path()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
                path: path.clone(),
                message: e.to_string(),
            })?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// The clock tuning derived from this configuration.
    pub fn clock_config(&self) -> ClockConfig {
        ClockConfig {
            warning_window_min: self.clock.warning_window_min,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.clock.warning_window_min, 10);
        assert_eq!(parsed.clock.tick_period_secs, 1);
        assert_eq!(parsed.notifications.volume, 50);
        assert!(parsed.notifications.enabled);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let parsed: Config = toml::from_str("[clock]\nwarning_window_min = 5\n").unwrap();
        assert_eq!(parsed.clock.warning_window_min, 5);
        assert_eq!(parsed.clock.tick_period_secs, 1);
        assert!(parsed.notifications.enabled);
    }

    #[test]
    fn clock_config_carries_warning_window() {
        let mut cfg = Config::default();
        cfg.clock.warning_window_min = 15;
        assert_eq!(cfg.clock_config().warning_window_min, 15);
    }
}
