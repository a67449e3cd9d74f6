//! Collision detection and response
//!
//! Passes run in a fixed order once per tick, after all movement. A bullet
//! consumed by one pass is inactive and therefore invisible to the later
//! ones. Nothing is removed here; cleanup runs after the last pass.

use glam::Vec2;

use super::block::BlockKind;
use super::powerup::PowerUpKind;
use super::state::{GameEvent, GameState, SoundEffect};

impl GameState {
    /// Run every collision pass in order
    pub fn check_collisions(&mut self) {
        self.check_bullet_block_collisions();
        self.check_bullet_tank_collisions();
        self.check_bullet_bullet_collisions();
        self.check_tank_collisions();
        self.check_powerup_collisions();
    }

    /// Bullets against terrain. Trees let bullets through; every other
    /// block stops them, and only bricks break.
    fn check_bullet_block_collisions(&mut self) {
        for bi in 0..self.bullets.len() {
            for ki in 0..self.blocks.len() {
                if !self.bullets[bi].body.collides_with(&self.blocks[ki].body) {
                    continue;
                }
                let kind = self.blocks[ki].kind;

                if kind == BlockKind::Base && !self.base_destroyed {
                    self.base_destroyed = true;
                    self.play(SoundEffect::BaseDestroyed);
                    log::info!("Base destroyed");
                }

                if self.blocks[ki].is_destructible() {
                    self.blocks[ki].body.active = false;
                    self.play(SoundEffect::BlockDestroyed);
                }

                if !self.blocks[ki].is_camouflage() {
                    self.bullets[bi].body.active = false;
                    break;
                }
            }
        }
    }

    /// Bullets against tanks. Player bullets only hurt enemies and enemy
    /// bullets only hurt the player.
    fn check_bullet_tank_collisions(&mut self) {
        for bi in 0..self.bullets.len() {
            if !self.bullets[bi].is_active() {
                continue;
            }

            if self.bullets[bi].from_player {
                let hit = self
                    .enemies
                    .iter()
                    .position(|e| self.bullets[bi].body.collides_with(&e.tank.body));
                let Some(ei) = hit else {
                    continue;
                };

                self.bullets[bi].body.active = false;
                self.enemies[ei].tank.take_damage(1);
                if !self.enemies[ei].is_active() {
                    let rect = self.enemies[ei].tank.rect();
                    self.active_enemies = self.active_enemies.saturating_sub(1);
                    self.add_score(self.tuning.enemy_kill_score);
                    self.play(SoundEffect::EnemyDestroyed);
                    log::debug!("Enemy destroyed, {} on board", self.active_enemies);
                    self.roll_powerup_drop(rect);
                }
            } else if self.bullets[bi].body.collides_with(&self.player.body) {
                self.bullets[bi].body.active = false;
                if self.player.take_damage(1) {
                    self.emit(GameEvent::PlayerHealthChanged(self.player.health));
                }
                self.play(SoundEffect::PlayerHit);
            }
        }
    }

    /// Any two overlapping bullets annihilate each other
    fn check_bullet_bullet_collisions(&mut self) {
        for i in 0..self.bullets.len() {
            for j in (i + 1)..self.bullets.len() {
                if self.bullets[i].body.collides_with(&self.bullets[j].body) {
                    self.bullets[i].body.active = false;
                    self.bullets[j].body.active = false;
                    break;
                }
            }
        }
    }

    /// Soft separation: the player is nudged away from any enemy it
    /// overlaps, unless the nudge would put it into terrain
    fn check_tank_collisions(&mut self) {
        if !self.player.is_active() {
            return;
        }
        let board = self.tuning.board();

        for ei in 0..self.enemies.len() {
            if !self.player.body.collides_with(&self.enemies[ei].tank.body) {
                continue;
            }
            let away = self.player.rect().center() - self.enemies[ei].tank.rect().center();
            let mut dir = away.normalize_or_zero();
            if dir == Vec2::ZERO {
                // Dead center: back off the way the player came
                dir = self.player.direction.opposite().unit_vector();
            }
            let pushed = self
                .player
                .rect()
                .translated(dir * self.tuning.tank_push_distance)
                .clamped_within(&board);
            if !self.blocked_by_terrain(&pushed) {
                self.player.set_position(pushed.pos);
            }
        }
    }

    /// Player picking up power-ups
    fn check_powerup_collisions(&mut self) {
        for pi in 0..self.powerups.len() {
            if !self.powerups[pi].body.collides_with(&self.player.body) {
                continue;
            }

            match self.powerups[pi].kind {
                PowerUpKind::Health => {
                    self.player.heal(1);
                    self.emit(GameEvent::PlayerHealthChanged(self.player.health));
                    self.play(SoundEffect::PowerUpHealth);
                }
                PowerUpKind::Bomb => {
                    self.trigger_bomb();
                    self.play(SoundEffect::PowerUpBomb);
                }
                PowerUpKind::Shield => {
                    self.player.activate_shield(self.tuning.shield_duration_ticks);
                    self.play(SoundEffect::PowerUpShield);
                }
            }

            self.powerups[pi].body.active = false;
            self.add_score(self.tuning.powerup_pickup_score);
        }
    }

    /// Destroy every active enemy, scoring each kill
    pub fn trigger_bomb(&mut self) {
        let mut killed = 0u64;
        for enemy in &mut self.enemies {
            if enemy.is_active() {
                enemy.tank.body.active = false;
                killed += 1;
            }
        }
        self.active_enemies = self.active_enemies.saturating_sub(killed as u32);
        self.add_score(killed * self.tuning.enemy_kill_score);
        log::debug!("Bomb destroyed {} enemies", killed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Color;
    use crate::sim::block::Block;
    use crate::sim::bullet::Bullet;
    use crate::sim::powerup::PowerUp;
    use crate::sim::rect::Direction;
    use crate::sim::state::GamePhase;
    use crate::sim::tank::Enemy;
    use crate::tuning::Tuning;

    fn state() -> GameState {
        let mut tuning = Tuning::default();
        tuning.powerup_drop_percent = 0;
        let mut state = GameState::new(tuning, 3, Color::PLAYER_DEFAULT);
        state.phase = GamePhase::Playing;
        state
    }

    fn bullet_at(state: &GameState, center: Vec2, from_player: bool) -> Bullet {
        Bullet::new(center, state.tuning.bullet_size, Direction::Up, state.tuning.bullet_speed, from_player)
    }

    fn powerup_on_player(state: &GameState, kind: PowerUpKind) -> PowerUp {
        PowerUp::new(state.player.position(), 24.0, kind, 300, 60, 10)
    }

    fn sounds(state: &mut GameState) -> Vec<SoundEffect> {
        state
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::Sound(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_bullet_destroys_brick() {
        let mut state = state();
        state.blocks.push(Block::new(Vec2::new(320.0, 320.0), 32.0, BlockKind::Brick));
        state.bullets.push(bullet_at(&state, Vec2::new(336.0, 336.0), true));

        state.check_collisions();
        assert!(!state.blocks[0].is_active());
        assert!(!state.bullets[0].is_active());
        assert_eq!(sounds(&mut state), vec![SoundEffect::BlockDestroyed]);
    }

    #[test]
    fn test_steel_and_water_stop_bullets() {
        for kind in [BlockKind::Steel, BlockKind::Water] {
            let mut state = state();
            state.blocks.push(Block::new(Vec2::new(320.0, 320.0), 32.0, kind));
            state.bullets.push(bullet_at(&state, Vec2::new(336.0, 336.0), true));

            state.check_collisions();
            assert!(state.blocks[0].is_active());
            assert!(!state.bullets[0].is_active());
            assert!(sounds(&mut state).is_empty());
        }
    }

    #[test]
    fn test_bullets_pass_through_trees() {
        for from_player in [true, false] {
            let mut state = state();
            state.blocks.push(Block::new(Vec2::new(320.0, 320.0), 32.0, BlockKind::Tree));
            state.bullets.push(bullet_at(&state, Vec2::new(336.0, 336.0), from_player));

            state.check_collisions();
            assert!(state.blocks[0].is_active());
            assert!(state.bullets[0].is_active());
        }
    }

    #[test]
    fn test_first_block_consumes_bullet() {
        let mut state = state();
        state.blocks.push(Block::new(Vec2::new(320.0, 320.0), 32.0, BlockKind::Brick));
        state.blocks.push(Block::new(Vec2::new(352.0, 320.0), 32.0, BlockKind::Brick));
        // Straddles both bricks
        state.bullets.push(bullet_at(&state, Vec2::new(352.0, 336.0), true));

        state.check_collisions();
        assert!(!state.blocks[0].is_active());
        assert!(state.blocks[1].is_active());
    }

    #[test]
    fn test_bullet_hits_base() {
        let mut state = state();
        state.blocks.push(Block::new(Vec2::new(400.0, 768.0), 32.0, BlockKind::Base));
        state.bullets.push(bullet_at(&state, Vec2::new(416.0, 770.0), false));

        state.check_collisions();
        assert!(state.base_destroyed);
        assert!(state.blocks[0].is_active());
        assert!(!state.bullets[0].is_active());
        assert_eq!(sounds(&mut state), vec![SoundEffect::BaseDestroyed]);
    }

    #[test]
    fn test_player_bullet_kills_enemy() {
        let mut state = state();
        state.enemies.push(Enemy::new(Vec2::new(400.0, 400.0), &state.tuning));
        state.active_enemies = 1;
        state.bullets.push(bullet_at(&state, Vec2::new(414.0, 414.0), true));

        state.check_collisions();
        assert!(!state.enemies[0].is_active());
        assert!(!state.bullets[0].is_active());
        assert_eq!(state.score, 100);
        assert_eq!(state.active_enemies, 0);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::ScoreChanged(100)));
        assert!(events.contains(&GameEvent::Sound(SoundEffect::EnemyDestroyed)));
    }

    #[test]
    fn test_enemy_bullets_ignore_enemies() {
        let mut state = state();
        state.enemies.push(Enemy::new(Vec2::new(400.0, 400.0), &state.tuning));
        state.bullets.push(bullet_at(&state, Vec2::new(414.0, 414.0), false));

        state.check_collisions();
        assert!(state.enemies[0].is_active());
        assert!(state.bullets[0].is_active());
    }

    #[test]
    fn test_player_bullets_ignore_player() {
        let mut state = state();
        let center = state.player.rect().center();
        state.bullets.push(bullet_at(&state, center, true));

        state.check_collisions();
        assert_eq!(state.player.health, 3);
        assert!(state.bullets[0].is_active());
    }

    #[test]
    fn test_enemy_bullet_damages_player() {
        let mut state = state();
        let center = state.player.rect().center();
        state.bullets.push(bullet_at(&state, center, false));

        state.check_collisions();
        assert_eq!(state.player.health, 2);
        assert!(!state.bullets[0].is_active());
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::PlayerHealthChanged(2)));
        assert!(events.contains(&GameEvent::Sound(SoundEffect::PlayerHit)));
    }

    #[test]
    fn test_shield_absorbs_hit() {
        let mut state = state();
        state.player.activate_shield(100);
        let center = state.player.rect().center();
        state.bullets.push(bullet_at(&state, center, false));

        state.check_collisions();
        assert_eq!(state.player.health, 3);
        assert!(state.player.is_active());
        assert!(!state.bullets[0].is_active());
        assert_eq!(state.player.shield_ticks, 100);
    }

    #[test]
    fn test_bullets_annihilate() {
        let mut state = state();
        state.bullets.push(bullet_at(&state, Vec2::new(300.0, 300.0), true));
        state.bullets.push(bullet_at(&state, Vec2::new(304.0, 302.0), false));
        state.bullets.push(bullet_at(&state, Vec2::new(500.0, 500.0), false));

        state.check_collisions();
        assert!(!state.bullets[0].is_active());
        assert!(!state.bullets[1].is_active());
        assert!(state.bullets[2].is_active());
    }

    #[test]
    fn test_player_pushed_away_from_enemy() {
        let mut state = state();
        state.player.set_position(Vec2::new(300.0, 300.0));
        state.enemies.push(Enemy::new(Vec2::new(320.0, 300.0), &state.tuning));

        state.check_collisions();
        assert_eq!(state.player.position(), Vec2::new(298.0, 300.0));
        assert_eq!(state.enemies[0].tank.position(), Vec2::new(320.0, 300.0));
    }

    #[test]
    fn test_push_never_enters_terrain() {
        let mut state = state();
        state.player.set_position(Vec2::new(300.0, 300.0));
        state.blocks.push(Block::new(Vec2::new(270.0, 300.0), 32.0, BlockKind::Steel));
        state.enemies.push(Enemy::new(Vec2::new(320.0, 300.0), &state.tuning));

        state.check_collisions();
        assert_eq!(state.player.position(), Vec2::new(300.0, 300.0));
    }

    #[test]
    fn test_health_powerup() {
        let mut state = state();
        state.player.take_damage(1);
        state.powerups.push(powerup_on_player(&state, PowerUpKind::Health));

        state.check_collisions();
        assert_eq!(state.player.health, 3);
        assert!(!state.powerups[0].is_active());
        assert_eq!(state.score, 50);
        assert!(sounds(&mut state).contains(&SoundEffect::PowerUpHealth));
    }

    #[test]
    fn test_health_powerup_capped() {
        let mut state = state();
        state.powerups.push(powerup_on_player(&state, PowerUpKind::Health));
        state.check_collisions();
        assert_eq!(state.player.health, state.tuning.max_player_health);
    }

    #[test]
    fn test_bomb_powerup() {
        let mut state = state();
        state.enemies.push(Enemy::new(Vec2::new(200.0, 200.0), &state.tuning));
        state.enemies.push(Enemy::new(Vec2::new(500.0, 200.0), &state.tuning));
        state.active_enemies = 2;
        state.powerups.push(powerup_on_player(&state, PowerUpKind::Bomb));

        state.check_collisions();
        assert!(state.enemies.iter().all(|e| !e.is_active()));
        assert_eq!(state.active_enemies, 0);
        assert_eq!(state.score, 2 * 100 + 50);
    }

    #[test]
    fn test_shield_powerup_refreshes() {
        let mut state = state();
        state.player.activate_shield(10);
        state.powerups.push(powerup_on_player(&state, PowerUpKind::Shield));

        state.check_collisions();
        assert_eq!(state.player.shield_ticks, 300);
        assert!(sounds(&mut state).contains(&SoundEffect::PowerUpShield));
    }

    #[test]
    fn test_kill_can_drop_powerup() {
        let mut state = state();
        state.tuning.powerup_drop_percent = 100;
        state.enemies.push(Enemy::new(Vec2::new(400.0, 400.0), &state.tuning));
        state.active_enemies = 1;
        state.bullets.push(bullet_at(&state, Vec2::new(414.0, 414.0), true));

        state.check_collisions();
        assert_eq!(state.powerups.len(), 1);
        assert_eq!(state.powerups[0].body.rect.center(), Vec2::new(414.0, 414.0));
    }
}
