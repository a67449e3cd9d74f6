//! Terrain blocks

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, EntityKind};
use super::rect::Rect;
use crate::palette::Color;

/// Terrain types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlockKind {
    /// Destroyed by any bullet
    #[default]
    Brick,
    /// Stops bullets, never destroyed
    Steel,
    /// Blocks movement and bullets, never destroyed
    Water,
    /// Camouflage: bullets pass through
    Tree,
    /// The player's base; a hit loses the game
    Base,
}

impl BlockKind {
    pub fn color(self) -> Color {
        match self {
            BlockKind::Brick => Color::BRICK,
            BlockKind::Steel => Color::STEEL,
            BlockKind::Water => Color::WATER,
            BlockKind::Tree => Color::TREE,
            BlockKind::Base => Color::BASE,
        }
    }
}

/// A single terrain cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub body: Body,
    pub kind: BlockKind,
}

impl Block {
    pub fn new(pos: Vec2, size: f32, kind: BlockKind) -> Self {
        Self {
            body: Body::new(Rect::square(pos, size), EntityKind::Block(kind), kind.color()),
            kind,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.body.active
    }

    pub fn is_destructible(&self) -> bool {
        self.kind == BlockKind::Brick
    }

    pub fn blocks_movement(&self) -> bool {
        self.kind != BlockKind::Tree
    }

    pub fn is_camouflage(&self) -> bool {
        self.kind == BlockKind::Tree
    }
}
