//! Configuration management for conionova
//!
//! Handles loading and saving user preferences for how directives are
//! encoded and how aggressively pending input is discarded.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::directive::Encoding;

/// Environment variable forcing the 7-bit introducer when set to `1`/`true`
pub const SEVEN_BIT_ENV: &str = "CONIONOVA_SEVEN_BIT";

/// conionova configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Write `ESC [` instead of the single 0x9b byte
    #[serde(default)]
    pub seven_bit: bool,

    /// Also flush the terminal driver's input queue when discarding input
    #[serde(default = "default_purge_tty_input")]
    pub purge_tty_input: bool,
}

fn default_purge_tty_input() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seven_bit: false,
            purge_tty_input: default_purge_tty_input(),
        }
    }
}

impl Config {
    /// Get config directory path (~/.conionova)
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".conionova"))
    }

    /// Get config file path (~/.conionova/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from the default location, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env();
        Ok(config)
    }

    /// Load config from `path`, or return default if not found
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save config to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory {}", dir.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        // Atomic write: write to temp file then rename
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, &contents)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path)
            .with_context(|| format!("Failed to rename config file to {}", path.display()))?;

        Ok(())
    }

    fn apply_env(&mut self) {
        if let Ok(value) = env::var(SEVEN_BIT_ENV) {
            self.seven_bit = parse_flag(&value);
        }
    }

    /// Directive encoding selected by this config
    pub fn encoding(&self) -> Encoding {
        if self.seven_bit {
            Encoding::SevenBit
        } else {
            Encoding::C1
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
