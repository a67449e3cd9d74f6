//! Tick movement with placement validation
//!
//! Tanks move first, then ask the board whether the new footprint is legal.
//! An illegal move is rolled back to the exact pre-tick position.

use super::bullet::Bullet;
use super::rect::Rect;
use super::state::{GameState, SoundEffect};

/// Who is asking the board query (an entity never collides with itself)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mover {
    Player,
    /// Index into `GameState::enemies`
    Enemy(usize),
    /// Not a tank (e.g. power-up placement)
    Other,
}

impl GameState {
    /// Does `rect` overlap any active movement-blocking block?
    pub fn blocked_by_terrain(&self, rect: &Rect) -> bool {
        self.blocks
            .iter()
            .any(|b| b.is_active() && b.blocks_movement() && b.body.rect.intersects(rect))
    }

    /// Board query: may `rect` be occupied by `mover`?
    pub fn is_valid_move(&self, rect: &Rect, mover: Mover) -> bool {
        if !self.tuning.board().contains_rect(rect) {
            return false;
        }

        let protected = mover == Mover::Player && self.spawn_protection_zone().contains_rect(rect);
        if !protected && self.blocked_by_terrain(rect) {
            return false;
        }

        if mover != Mover::Player && self.player.is_active() && self.player.rect().intersects(rect) {
            return false;
        }

        !self
            .enemies
            .iter()
            .enumerate()
            .any(|(i, e)| mover != Mover::Enemy(i) && e.is_active() && e.tank.rect().intersects(rect))
    }

    /// Apply the player's movement intent, rolling back if blocked
    pub fn move_player(&mut self) {
        if !self.player.is_active() {
            return;
        }
        let old = self.player.position();
        let board = self.tuning.board();
        self.player.step(&board);
        if !self.is_valid_move(&self.player.rect(), Mover::Player) {
            self.player.set_position(old);
        }
    }

    /// Run every enemy's AI and movement, and let ready enemies fire
    pub fn update_enemies(&mut self) {
        let board = self.tuning.board();
        for i in 0..self.enemies.len() {
            if !self.enemies[i].is_active() {
                continue;
            }

            let old = self.enemies[i].tank.position();
            self.enemies[i].step(&board, &self.tuning, &mut self.rng);
            if !self.is_valid_move(&self.enemies[i].tank.rect(), Mover::Enemy(i)) {
                self.enemies[i].tank.set_position(old);
                self.enemies[i].choose_new_direction(&self.tuning, &mut self.rng);
            }

            if self.enemies[i].should_shoot(&self.tuning) {
                let tank = &self.enemies[i].tank;
                let bullet = Bullet::new(
                    tank.rect().center(),
                    self.tuning.bullet_size,
                    tank.direction,
                    self.tuning.bullet_speed,
                    false,
                );
                self.bullets.push(bullet);
                self.enemies[i].tank.reset_shoot_cooldown();
                self.enemies[i].reset_shoot_timer();
                self.play(SoundEffect::EnemyShoot);
            }
        }
    }

    /// Advance all bullets; those leaving the travel bounds deactivate
    pub fn advance_bullets(&mut self) {
        let bounds = self.bullet_travel_bounds();
        for bullet in &mut self.bullets {
            bullet.advance(&bounds);
        }
    }

    /// Count down power-up lifetimes
    pub fn advance_powerups(&mut self) {
        for powerup in &mut self.powerups {
            powerup.tick();
        }
    }
}
