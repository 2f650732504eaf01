//! TOML-based application configuration.
//!
//! Stores user preferences outside the data document:
//! - Theme (dark/light)
//! - Reminder polling behavior
//!
//! Configuration is stored at `~/.config/medicycle/config.toml`.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.toml";

/// UI theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    #[default]
    Light,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        })
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(format!("expected 'dark' or 'light', got '{}'", s)),
        }
    }
}

/// UI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub theme: Theme,
}

/// Reminder polling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemindersConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Polling interval in seconds. Anything over 60 would skip minute
    /// boundaries, so the effective interval is clamped.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl RemindersConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.clamp(1, 60))
    }
}

impl Default for RemindersConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: default_interval_secs(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_interval_secs() -> u64 {
    crate::reminder::DEFAULT_POLL_INTERVAL.as_secs()
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/medicycle/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub reminders: RemindersConfig,
}

impl Config {
    /// Load configuration; missing or unparseable files fall back to
    /// defaults.
    pub fn load() -> Self {
        let Ok(dir) = data_dir() else {
            return Self::default();
        };
        match std::fs::read_to_string(dir.join(CONFIG_FILE)) {
            Ok(raw) => toml::from_str(&raw).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::SaveFailed {
            path: CONFIG_FILE.into(),
            message: e.to_string(),
        })?;
        let path = dir.join(CONFIG_FILE);
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, raw).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.ui.theme, Theme::Light);
        assert!(config.reminders.enabled);
        assert_eq!(config.reminders.poll_interval(), Duration::from_secs(20));
    }

    #[test]
    fn poll_interval_is_clamped_to_a_minute() {
        let reminders = RemindersConfig {
            enabled: true,
            interval_secs: 300,
        };
        assert_eq!(reminders.poll_interval(), Duration::from_secs(60));

        let reminders = RemindersConfig {
            enabled: true,
            interval_secs: 0,
        };
        assert_eq!(reminders.poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn toml_round_trip() {
        let mut config = Config::default();
        config.ui.theme = Theme::Dark;
        config.reminders.interval_secs = 30;

        let raw = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&raw).unwrap();
        assert_eq!(back.ui.theme, Theme::Dark);
        assert_eq!(back.reminders.interval_secs, 30);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[ui]\ntheme = \"dark\"\n").unwrap();
        assert_eq!(config.ui.theme, Theme::Dark);
        assert!(config.reminders.enabled);
    }

    #[test]
    fn theme_parses() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("LIGHT".parse::<Theme>().unwrap(), Theme::Light);
        assert!("blue".parse::<Theme>().is_err());
    }
}
