//! Projectiles

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, EntityKind};
use super::rect::{Direction, Rect};
use crate::palette::Color;

/// A bullet travelling in a straight line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub body: Body,
    pub direction: Direction,
    /// Pixels per tick
    pub speed: f32,
    /// Player bullets only hurt enemies, enemy bullets only hurt the player
    pub from_player: bool,
}

impl Bullet {
    /// Create a bullet centered on `center` (the firing tank's center)
    pub fn new(center: Vec2, size: f32, direction: Direction, speed: f32, from_player: bool) -> Self {
        Self {
            body: Body::new(Rect::centered(center, size), EntityKind::Bullet, Color::BULLET),
            direction,
            speed,
            from_player,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.body.active
    }

    /// Advance one tick. A bullet whose next position leaves `travel_bounds`
    /// deactivates in place instead of moving.
    pub fn advance(&mut self, travel_bounds: &Rect) {
        if !self.body.active {
            return;
        }
        let next = self.body.rect.translated(self.direction.unit_vector() * self.speed);
        if !travel_bounds.contains_rect(&next) {
            self.body.active = false;
            return;
        }
        self.body.rect = next;
    }
}
