//! Player settings and preferences
//!
//! Persisted as JSON at a path chosen by the host. The engine only reads the
//! tank color, once, at construction.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::palette::Color;

/// Errors raised while reading or writing a settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    pub sound_enabled: bool,
    /// Music volume (0 - 100)
    pub music_volume: u8,
    /// Sound effects volume (0 - 100)
    pub sfx_volume: u8,

    // === Player ===
    /// Player tank color as `#RRGGBB`
    pub tank_color: String,
    /// Best score seen on this machine
    pub high_score: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            music_volume: 50,
            sfx_volume: 70,
            tank_color: Color::PLAYER_DEFAULT.to_hex(),
            high_score: 0,
        }
    }
}

impl Settings {
    /// Parsed tank color; an unparsable value falls back to the default gold
    pub fn tank_color(&self) -> Color {
        Color::from_hex(&self.tank_color).unwrap_or_else(|| {
            log::warn!("Invalid tank color {:?}, using default", self.tank_color);
            Color::PLAYER_DEFAULT
        })
    }

    pub fn set_tank_color(&mut self, color: Color) {
        self.tank_color = color.to_hex();
    }

    /// Keep `score` if it beats the stored high score. Returns true if it did.
    pub fn record_high_score(&mut self, score: u64) -> bool {
        if score > self.high_score {
            self.high_score = score;
            true
        } else {
            false
        }
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load settings, falling back to defaults if the file is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}
