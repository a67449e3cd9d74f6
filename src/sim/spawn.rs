//! Enemy spawn scheduling and power-up drops

use glam::Vec2;
use rand::Rng;

use super::movement::Mover;
use super::powerup::{PowerUp, PowerUpKind};
use super::rect::Rect;
use super::state::{GamePhase, GameState, SoundEffect};
use super::tank::Enemy;

impl GameState {
    /// Top-left of spawn point `index` (wraps round-robin)
    pub fn enemy_spawn_position(&self, index: u32) -> Vec2 {
        let points = self.tuning.spawn_points.max(1);
        let spacing = self.tuning.board_width() / (points + 1) as f32;
        let slot = (index % points + 1) as f32;
        let half_cell = self.tuning.cell_size / 2.0;
        Vec2::new(spacing * slot - half_cell, half_cell)
    }

    /// Footprint of an enemy spawned at point `index`
    pub fn enemy_spawn_rect(&self, index: u32) -> Rect {
        Rect::square(self.enemy_spawn_position(index), self.tuning.tank_size)
    }

    /// One spawn-cadence attempt. Returns true if an enemy appeared.
    pub fn spawn_enemy(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        if self.active_enemies >= self.tuning.max_active_enemies || self.enemies_remaining == 0 {
            return false;
        }

        let index = self.spawn_attempts;
        self.spawn_attempts = self.spawn_attempts.wrapping_add(1);

        let rect = self.enemy_spawn_rect(index);
        if !self.is_valid_move(&rect, Mover::Other) {
            log::debug!("Spawn point {} occupied, skipping", index % self.tuning.spawn_points.max(1));
            return false;
        }

        self.enemies.push(Enemy::new(rect.pos, &self.tuning));
        self.enemies_remaining -= 1;
        self.active_enemies += 1;
        self.play(SoundEffect::EnemySpawn);
        log::debug!(
            "Enemy spawned at ({}, {}), {} remaining",
            rect.pos.x,
            rect.pos.y,
            self.enemies_remaining
        );
        true
    }

    /// Roll the drop chance for a kill at `rect`
    pub(crate) fn roll_powerup_drop(&mut self, rect: Rect) {
        if self.rng.random_range(0..100) < self.tuning.powerup_drop_percent {
            self.spawn_powerup(Some(rect.center()));
        }
    }

    /// Place a random power-up centered on `near` if that spot is free,
    /// otherwise on a random free cell. Gives up silently after the
    /// configured number of attempts.
    pub fn spawn_powerup(&mut self, near: Option<Vec2>) -> bool {
        let size = self.tuning.powerup_size;

        let mut spot = near
            .map(|center| Rect::centered(center, size))
            .filter(|rect| self.is_valid_move(rect, Mover::Other));

        let mut attempts = 0;
        while spot.is_none() && attempts < self.tuning.powerup_spawn_attempts {
            let x = self.rng.random_range(0..self.tuning.grid_width) as f32 * self.tuning.cell_size;
            let y = self.rng.random_range(0..self.tuning.grid_height) as f32 * self.tuning.cell_size;
            let rect = Rect::square(Vec2::new(x, y), size);
            if self.is_valid_move(&rect, Mover::Other) {
                spot = Some(rect);
            }
            attempts += 1;
        }

        let Some(rect) = spot else {
            log::debug!("No room for a power-up after {} attempts", attempts);
            return false;
        };

        let kind = PowerUpKind::ALL[self.rng.random_range(0..PowerUpKind::ALL.len())];
        self.powerups.push(PowerUp::new(
            rect.pos,
            size,
            kind,
            self.tuning.powerup_lifetime_ticks,
            self.tuning.powerup_blink_threshold,
            self.tuning.powerup_blink_period,
        ));
        log::debug!("Power-up {:?} dropped at ({}, {})", kind, rect.pos.x, rect.pos.y);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Color;
    use crate::sim::block::{Block, BlockKind};
    use crate::tuning::Tuning;

    fn playing() -> GameState {
        let mut state = GameState::new(Tuning::default(), 5, Color::PLAYER_DEFAULT);
        state.phase = GamePhase::Playing;
        state.enemies_remaining = 20;
        state
    }

    #[test]
    fn test_spawn_points_round_robin() {
        let state = playing();
        assert_eq!(state.enemy_spawn_position(0), Vec2::new(192.0, 16.0));
        assert_eq!(state.enemy_spawn_position(1), Vec2::new(400.0, 16.0));
        assert_eq!(state.enemy_spawn_position(2), Vec2::new(608.0, 16.0));
        assert_eq!(state.enemy_spawn_position(3), state.enemy_spawn_position(0));
    }

    #[test]
    fn test_spawn_respects_capacity() {
        let mut state = playing();
        for _ in 0..3 {
            assert!(state.spawn_enemy());
        }
        // Clear the spawn row so only the capacity limit applies
        for (i, enemy) in state.enemies.iter_mut().enumerate() {
            enemy.tank.set_position(Vec2::new(100.0 + i as f32 * 100.0, 400.0));
        }
        assert!(state.spawn_enemy());
        assert_eq!(state.spawn_attempts, 4);

        assert!(!state.spawn_enemy());
        // A full board does not advance the round-robin index
        assert_eq!(state.spawn_attempts, 4);
        assert_eq!(state.active_enemies, 4);
        assert_eq!(state.enemies_remaining, 16);
        assert_eq!(state.enemies.len(), 4);
    }

    #[test]
    fn test_spawn_skipped_when_point_occupied() {
        let mut state = playing();
        for _ in 0..3 {
            assert!(state.spawn_enemy());
        }
        // Fourth attempt wraps to point 0, where the first enemy still sits
        assert!(!state.spawn_enemy());
        assert_eq!(state.enemies.len(), 3);
        assert_eq!(state.active_enemies, 3);
        assert_eq!(state.enemies_remaining, 17);
        assert_eq!(state.spawn_attempts, 4);

        // Stacked tanks would freeze each other; this one can still move
        state.enemies[0].tank.set_moving(crate::sim::rect::Direction::Down, true);
        let start = state.enemies[0].tank.position();
        for _ in 0..10 {
            state.update_enemies();
        }
        assert_ne!(state.enemies[0].tank.position(), start);
    }

    #[test]
    fn test_spawn_skipped_when_player_on_point() {
        let mut state = playing();
        state.player.set_position(Vec2::new(200.0, 20.0));
        assert!(!state.spawn_enemy());
        assert!(state.enemies.is_empty());
        assert_eq!(state.enemies_remaining, 20);
    }

    #[test]
    fn test_spawn_stops_when_none_remaining() {
        let mut state = playing();
        state.enemies_remaining = 1;
        assert!(state.spawn_enemy());
        assert!(!state.spawn_enemy());
        assert_eq!(state.enemies_remaining, 0);
        assert_eq!(state.active_enemies, 1);
    }

    #[test]
    fn test_spawn_only_while_playing() {
        let mut state = playing();
        state.phase = GamePhase::Paused;
        assert!(!state.spawn_enemy());
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_blocked_spawn_point_skipped() {
        let mut state = playing();
        state.blocks.push(Block::new(Vec2::new(192.0, 0.0), 32.0, BlockKind::Steel));

        assert!(!state.spawn_enemy());
        assert_eq!(state.enemies_remaining, 20);
        assert_eq!(state.active_enemies, 0);

        // Next attempt rotates to the free middle point
        assert!(state.spawn_enemy());
        assert_eq!(state.enemies[0].tank.position(), Vec2::new(400.0, 16.0));
    }

    #[test]
    fn test_trees_do_not_block_spawn() {
        let mut state = playing();
        state.blocks.push(Block::new(Vec2::new(192.0, 0.0), 32.0, BlockKind::Tree));
        assert!(state.spawn_enemy());
    }

    #[test]
    fn test_powerup_dropped_at_requested_spot() {
        let mut state = playing();
        assert!(state.spawn_powerup(Some(Vec2::new(300.0, 300.0))));
        assert_eq!(state.powerups.len(), 1);
        assert_eq!(state.powerups[0].body.rect.center(), Vec2::new(300.0, 300.0));
    }

    #[test]
    fn test_powerup_falls_back_to_random_cell() {
        let mut state = playing();
        state.blocks.push(Block::new(Vec2::new(288.0, 288.0), 32.0, BlockKind::Steel));
        assert!(state.spawn_powerup(Some(Vec2::new(300.0, 300.0))));
        let rect = state.powerups[0].body.rect;
        assert_ne!(rect.center(), Vec2::new(300.0, 300.0));
        assert!(state.tuning.board().contains_rect(&rect));
    }

    #[test]
    fn test_powerup_skipped_when_board_full() {
        let mut state = playing();
        let cell = state.tuning.cell_size;
        for y in 0..state.tuning.grid_height {
            for x in 0..state.tuning.grid_width {
                state.blocks.push(Block::new(Vec2::new(x as f32 * cell, y as f32 * cell), cell, BlockKind::Water));
            }
        }
        assert!(!state.spawn_powerup(Some(Vec2::new(300.0, 300.0))));
        assert!(state.powerups.is_empty());
    }
}
