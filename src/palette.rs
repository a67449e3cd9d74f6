//! Color hints for the renderer
//!
//! The simulation never reads colors; it only carries them on entities.

use serde::{Deserialize, Serialize};

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const PLAYER_DEFAULT: Color = Color::rgb(0xFF, 0xD7, 0x00);
    pub const ENEMY_TANK: Color = Color::rgb(0xFF, 0x44, 0x44);
    pub const BRICK: Color = Color::rgb(0xD2, 0x69, 0x1E);
    pub const STEEL: Color = Color::rgb(0x70, 0x80, 0x90);
    pub const WATER: Color = Color::rgb(0x46, 0x82, 0xB4);
    pub const TREE: Color = Color::rgb(0x22, 0x8B, 0x22);
    pub const BASE: Color = Color::rgb(0xFF, 0x00, 0x00);
    pub const BULLET: Color = Color::rgb(0xFF, 0xFF, 0x00);
    pub const HEALTH_POWERUP: Color = Color::rgb(0xFF, 0x69, 0xB4);
    pub const BOMB_POWERUP: Color = Color::rgb(0xFF, 0x8C, 0x00);
    pub const SHIELD_POWERUP: Color = Color::rgb(0x00, 0xBF, 0xFF);

    /// Parse `#RRGGBB` (the leading `#` is optional)
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Format as `#RRGGBB`
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::PLAYER_DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Color::from_hex("#FFD700"), Some(Color::PLAYER_DEFAULT));
        assert_eq!(Color::from_hex("00bfff"), Some(Color::SHIELD_POWERUP));
        assert_eq!(Color::from_hex("#FFF"), None);
        assert_eq!(Color::from_hex("#GGGGGG"), None);
    }

    #[test]
    fn test_hex_formatting() {
        assert_eq!(Color::ENEMY_TANK.to_hex(), "#FF4444");
    }
}
