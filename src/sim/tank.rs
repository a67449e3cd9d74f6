//! Tanks: the player's and the AI-driven enemies
//!
//! A tank moves along one axis at a time. Movement intent is a set of four
//! flags; pressing a direction clears its opposite so two keys on the same
//! axis never cancel out into a stall, and the first set flag in
//! Up/Down/Left/Right order wins each tick.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Body, EntityKind};
use super::rect::{Direction, Rect};
use crate::palette::Color;
use crate::tuning::Tuning;

/// Per-direction movement intent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    fn flag_mut(&mut self, dir: Direction) -> &mut bool {
        match dir {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }

    /// Set one flag; setting it true clears the opposite direction
    pub fn set(&mut self, dir: Direction, moving: bool) {
        *self.flag_mut(dir) = moving;
        if moving {
            *self.flag_mut(dir.opposite()) = false;
        }
    }

    /// The direction that moves the tank this tick, if any
    pub fn dominant(&self) -> Option<Direction> {
        if self.up {
            Some(Direction::Up)
        } else if self.down {
            Some(Direction::Down)
        } else if self.left {
            Some(Direction::Left)
        } else if self.right {
            Some(Direction::Right)
        } else {
            None
        }
    }
}

/// A movable, damageable, shieldable tank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tank {
    pub body: Body,
    /// Facing (also the firing direction)
    pub direction: Direction,
    /// Pixels per tick
    pub speed: f32,
    pub health: u32,
    pub max_health: u32,
    pub intent: MoveIntent,
    /// Ticks of damage immunity left
    pub shield_ticks: u32,
    /// Ticks until the tank may fire again
    pub shoot_cooldown: u32,
    shoot_cooldown_max: u32,
}

impl Tank {
    pub fn new(
        pos: Vec2,
        size: f32,
        kind: EntityKind,
        color: Color,
        speed: f32,
        health: u32,
        shoot_cooldown_max: u32,
    ) -> Self {
        Self {
            body: Body::new(Rect::square(pos, size), kind, color),
            direction: Direction::Up,
            speed,
            health,
            max_health: health,
            intent: MoveIntent::default(),
            shield_ticks: 0,
            shoot_cooldown: 0,
            shoot_cooldown_max,
        }
    }

    /// The player's tank at `pos`
    pub fn player(pos: Vec2, color: Color, tuning: &Tuning) -> Self {
        Self::new(
            pos,
            tuning.tank_size,
            EntityKind::PlayerTank,
            color,
            tuning.player_speed,
            tuning.max_player_health,
            tuning.shoot_cooldown_ticks,
        )
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.body.active
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.body.rect
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.body.rect.pos
    }

    pub fn set_position(&mut self, pos: Vec2) {
        self.body.rect.pos = pos;
    }

    pub fn set_moving(&mut self, dir: Direction, moving: bool) {
        self.intent.set(dir, moving);
    }

    /// Drop all movement intent
    pub fn stop(&mut self) {
        self.intent = MoveIntent::default();
    }

    /// Apply one tick of movement (clamped to `board`) and count down the
    /// shield and fire cooldown. Obstacles are not consulted here.
    pub fn step(&mut self, board: &Rect) {
        if !self.body.active {
            return;
        }

        if let Some(dir) = self.intent.dominant() {
            self.direction = dir;
            self.body.rect = self
                .body
                .rect
                .translated(dir.unit_vector() * self.speed)
                .clamped_within(board);
        }

        self.shield_ticks = self.shield_ticks.saturating_sub(1);
        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
    }

    #[inline]
    pub fn has_shield(&self) -> bool {
        self.shield_ticks > 0
    }

    /// Grant (or refresh) damage immunity
    pub fn activate_shield(&mut self, ticks: u32) {
        self.shield_ticks = ticks;
    }

    /// Lose `amount` health unless shielded. Returns true if health was lost.
    /// Reaching zero deactivates the tank.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if self.has_shield() || amount == 0 {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.body.active = false;
        }
        true
    }

    /// Restore health, capped at the maximum
    pub fn heal(&mut self, amount: u32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    #[inline]
    pub fn can_shoot(&self) -> bool {
        self.shoot_cooldown == 0
    }

    pub fn reset_shoot_cooldown(&mut self) {
        self.shoot_cooldown = self.shoot_cooldown_max;
    }
}

/// An AI-controlled tank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub tank: Tank,
    /// Counts up to the AI decision cadence
    pub ai_timer: u32,
    /// Counts up to the firing cadence
    pub shoot_timer: u32,
    /// Counts down to the next allowed direction change
    pub direction_change_timer: i32,
}

impl Enemy {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            tank: Tank::new(
                pos,
                tuning.tank_size,
                EntityKind::EnemyTank,
                Color::ENEMY_TANK,
                tuning.enemy_speed,
                tuning.enemy_health,
                tuning.shoot_cooldown_ticks,
            ),
            ai_timer: 0,
            shoot_timer: 0,
            direction_change_timer: tuning.enemy_direction_change_interval as i32,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.tank.is_active()
    }

    /// Move, then advance the AI timers and possibly pick a new heading
    pub fn step<R: Rng>(&mut self, board: &Rect, tuning: &Tuning, rng: &mut R) {
        if !self.tank.is_active() {
            return;
        }
        self.tank.step(board);

        self.ai_timer += 1;
        self.shoot_timer += 1;
        self.direction_change_timer -= 1;

        if self.ai_timer >= tuning.enemy_ai_interval {
            self.ai_timer = 0;
            if self.direction_change_timer <= 0 {
                self.choose_new_direction(tuning, rng);
            }
        }
    }

    /// Head off in a uniformly random direction and restart the change timer
    pub fn choose_new_direction<R: Rng>(&mut self, tuning: &Tuning, rng: &mut R) {
        let dir = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
        self.tank.stop();
        self.tank.set_moving(dir, true);

        let jitter = if tuning.enemy_direction_change_jitter > 0 {
            rng.random_range(0..tuning.enemy_direction_change_jitter)
        } else {
            0
        };
        self.direction_change_timer = (tuning.enemy_direction_change_interval + jitter) as i32;
    }

    /// Firing cadence elapsed and the cannon is cool
    pub fn should_shoot(&self, tuning: &Tuning) -> bool {
        self.shoot_timer >= tuning.enemy_shoot_interval && self.tank.can_shoot()
    }

    pub fn reset_shoot_timer(&mut self) {
        self.shoot_timer = 0;
    }
}
