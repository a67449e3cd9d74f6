//! Timed power-up pickups

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, EntityKind};
use super::rect::Rect;
use crate::palette::Color;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Restore one point of health
    Health,
    /// Destroy every enemy on the board
    Bomb,
    /// Temporary immunity to damage
    Shield,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Health, PowerUpKind::Bomb, PowerUpKind::Shield];

    pub fn color(self) -> Color {
        match self {
            PowerUpKind::Health => Color::HEALTH_POWERUP,
            PowerUpKind::Bomb => Color::BOMB_POWERUP,
            PowerUpKind::Shield => Color::SHIELD_POWERUP,
        }
    }
}

/// A pickup lying on the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub body: Body,
    pub kind: PowerUpKind,
    /// Ticks until it vanishes
    pub lifetime: u32,
    /// Ticks since spawn, drives the expiry blink
    pub blink_phase: u32,
    blink_threshold: u32,
    blink_period: u32,
}

impl PowerUp {
    pub fn new(
        pos: Vec2,
        size: f32,
        kind: PowerUpKind,
        lifetime: u32,
        blink_threshold: u32,
        blink_period: u32,
    ) -> Self {
        Self {
            body: Body::new(Rect::square(pos, size), EntityKind::PowerUp(kind), kind.color()),
            kind,
            lifetime,
            blink_phase: 0,
            blink_threshold,
            blink_period: blink_period.max(1),
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.body.active
    }

    /// Count down one tick; expiry deactivates without effect
    pub fn tick(&mut self) {
        if !self.body.active {
            return;
        }
        self.lifetime = self.lifetime.saturating_sub(1);
        self.blink_phase += 1;
        if self.lifetime == 0 {
            self.body.active = false;
        }
    }

    /// Whether the renderer should draw it this frame. Near expiry it
    /// alternates hidden and visible windows of `blink_period` ticks.
    pub fn should_render(&self) -> bool {
        if !self.body.active {
            return false;
        }
        if self.lifetime >= self.blink_threshold {
            return true;
        }
        (self.blink_phase / self.blink_period) % 2 != 0
    }
}
