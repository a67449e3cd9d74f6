//! Level construction
//!
//! A level is the base with its brick wall, plus random terrain over the
//! upper rows. The player's start area and the enemy spawn points are kept
//! clear.

use glam::Vec2;
use rand::Rng;

use super::block::{Block, BlockKind};
use super::rect::Rect;
use super::state::GameState;

impl GameState {
    /// Top-left of the base block (bottom center of the board)
    pub fn base_position(&self) -> Vec2 {
        let cell = self.tuning.cell_size;
        Vec2::new(self.tuning.board_width() / 2.0 - cell / 2.0, self.tuning.board_height() - cell * 2.0)
    }

    /// Populate `blocks` for a fresh level
    pub fn build_level(&mut self) {
        let cell = self.tuning.cell_size;
        let base = self.base_position();
        self.blocks.push(Block::new(base, cell, BlockKind::Base));

        // Brick wall above the base
        for i in -2i32..=2 {
            if i == 0 {
                continue;
            }
            let pos = Vec2::new(base.x + i as f32 * cell, base.y - cell);
            self.blocks.push(Block::new(pos, cell, BlockKind::Brick));
        }

        let mut reserved = vec![self.spawn_protection_zone()];
        reserved.extend((0..self.tuning.spawn_points).map(|i| self.enemy_spawn_rect(i)));

        let terrain_rows = self.tuning.grid_height.saturating_sub(3);
        let mut placed = 0usize;
        for y in 0..terrain_rows {
            for x in 0..self.tuning.grid_width {
                if self.rng.random_range(0..100) >= self.tuning.terrain_density {
                    continue;
                }
                let pos = Vec2::new(x as f32 * cell, y as f32 * cell);
                let kind = match self.rng.random_range(0..100) {
                    0..60 => BlockKind::Brick,
                    60..75 => BlockKind::Steel,
                    75..85 => BlockKind::Water,
                    _ => BlockKind::Tree,
                };
                let rect = Rect::square(pos, cell);
                if reserved.iter().any(|r| r.intersects(&rect)) {
                    continue;
                }
                self.blocks.push(Block::new(pos, cell, kind));
                placed += 1;
            }
        }

        log::info!(
            "Level {} built: {} terrain blocks, {} enemies to spawn",
            self.level,
            placed,
            self.enemies_remaining
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Color;
    use crate::tuning::Tuning;

    fn built(seed: u64) -> GameState {
        let mut state = GameState::new(Tuning::default(), seed, Color::PLAYER_DEFAULT);
        state.build_level();
        state
    }

    #[test]
    fn test_base_and_walls() {
        let state = built(42);
        let base: Vec<_> = state.blocks.iter().filter(|b| b.kind == BlockKind::Base).collect();
        assert_eq!(base.len(), 1);
        assert_eq!(base[0].body.rect.pos, Vec2::new(400.0, 768.0));

        let walls = state
            .blocks
            .iter()
            .filter(|b| b.kind == BlockKind::Brick && b.body.rect.top() == 736.0)
            .count();
        assert_eq!(walls, 4);
    }

    #[test]
    fn test_reserved_areas_clear() {
        for seed in 0..20 {
            let state = built(seed);
            let zone = state.spawn_protection_zone();
            for block in &state.blocks {
                assert!(!block.body.rect.intersects(&zone), "seed {seed}: block in protection zone");
                for i in 0..state.tuning.spawn_points {
                    assert!(!block.body.rect.intersects(&state.enemy_spawn_rect(i)));
                }
            }
        }
    }

    #[test]
    fn test_terrain_within_board() {
        let state = built(3);
        let board = state.tuning.board();
        assert!(state.blocks.len() > 5);
        assert!(state.blocks.iter().all(|b| board.contains_rect(&b.body.rect)));
    }

    #[test]
    fn test_same_seed_same_level() {
        let a = built(99);
        let b = built(99);
        let rects = |s: &GameState| s.blocks.iter().map(|b| (b.body.rect.pos, b.kind)).collect::<Vec<_>>();
        assert_eq!(rects(&a), rects(&b));
    }
}
