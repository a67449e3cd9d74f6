//! Shared entity record
//!
//! Every tank, bullet, block and power-up carries a `Body`. An inactive body
//! is logically dead: it takes part in no further interaction and is removed
//! from its container by the end-of-tick cleanup pass.

use serde::{Deserialize, Serialize};

use super::block::BlockKind;
use super::powerup::PowerUpKind;
use super::rect::Rect;
use crate::palette::Color;

/// What an entity is, for renderers and event consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    PlayerTank,
    EnemyTank,
    Bullet,
    Block(BlockKind),
    PowerUp(PowerUpKind),
}

/// Position, size, kind tag, color hint and liveness
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub rect: Rect,
    pub kind: EntityKind,
    pub color: Color,
    pub active: bool,
}

impl Body {
    pub fn new(rect: Rect, kind: EntityKind, color: Color) -> Self {
        Self {
            rect,
            kind,
            color,
            active: true,
        }
    }

    /// Both bodies alive and overlapping
    pub fn collides_with(&self, other: &Body) -> bool {
        self.active && other.active && self.rect.intersects(&other.rect)
    }
}
