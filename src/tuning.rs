//! Data-driven board geometry and game balance
//!
//! Fixed at level-build time. `Tuning::default()` reproduces the classic
//! arcade numbers; a JSON file can override any subset of them.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Rect;

/// Errors raised while reading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed tuning file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(&'static str),
}

/// Board, speed, timer and scoring configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Board ===
    pub grid_width: u32,
    pub grid_height: u32,
    pub cell_size: f32,
    /// Percent chance each open cell receives random terrain
    pub terrain_density: u32,
    /// Cells of clear ground kept around the player's start position
    pub spawn_protection_cells: u32,

    // === Entities ===
    pub tank_size: f32,
    pub bullet_size: f32,
    pub powerup_size: f32,
    pub player_speed: f32,
    pub enemy_speed: f32,
    pub bullet_speed: f32,
    pub max_player_health: u32,
    pub enemy_health: u32,
    pub bullet_margin: f32,
    pub tank_push_distance: f32,

    // === Timers ===
    pub tick_interval_ms: u32,
    pub spawn_interval_ms: u32,
    /// Upper bound of random extra delay added to each spawn interval
    pub spawn_jitter_ms: u32,
    pub shoot_cooldown_ticks: u32,
    pub shield_duration_ticks: u32,
    pub enemy_ai_interval: u32,
    pub enemy_shoot_interval: u32,
    pub enemy_direction_change_interval: u32,
    pub enemy_direction_change_jitter: u32,

    // === Enemies ===
    pub enemies_per_level: u32,
    pub max_active_enemies: u32,
    pub spawn_points: u32,

    // === Power-ups ===
    pub powerup_drop_percent: u32,
    pub powerup_lifetime_ticks: u32,
    pub powerup_blink_threshold: u32,
    pub powerup_blink_period: u32,
    pub powerup_spawn_attempts: u32,

    // === Scoring ===
    pub enemy_kill_score: u64,
    pub powerup_pickup_score: u64,
    pub level_complete_bonus: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            cell_size: CELL_SIZE,
            terrain_density: 30,
            spawn_protection_cells: 2,

            tank_size: TANK_SIZE,
            bullet_size: BULLET_SIZE,
            powerup_size: POWERUP_SIZE,
            player_speed: PLAYER_SPEED,
            enemy_speed: ENEMY_SPEED,
            bullet_speed: BULLET_SPEED,
            max_player_health: MAX_PLAYER_HEALTH,
            enemy_health: ENEMY_HEALTH,
            bullet_margin: BULLET_MARGIN,
            tank_push_distance: TANK_PUSH_DISTANCE,

            tick_interval_ms: GAME_TICK_INTERVAL_MS,
            spawn_interval_ms: ENEMY_SPAWN_INTERVAL_MS,
            spawn_jitter_ms: 0,
            shoot_cooldown_ticks: SHOOT_COOLDOWN_TICKS,
            shield_duration_ticks: SHIELD_DURATION_TICKS,
            enemy_ai_interval: ENEMY_AI_INTERVAL,
            enemy_shoot_interval: ENEMY_SHOOT_INTERVAL,
            enemy_direction_change_interval: ENEMY_DIRECTION_CHANGE_INTERVAL,
            enemy_direction_change_jitter: 60,

            enemies_per_level: MAX_ENEMIES,
            max_active_enemies: ACTIVE_ENEMIES,
            spawn_points: SPAWN_POINTS,

            powerup_drop_percent: 20,
            powerup_lifetime_ticks: POWERUP_LIFETIME_TICKS,
            powerup_blink_threshold: POWERUP_BLINK_THRESHOLD,
            powerup_blink_period: POWERUP_BLINK_PERIOD,
            powerup_spawn_attempts: POWERUP_SPAWN_ATTEMPTS,

            enemy_kill_score: ENEMY_KILL_SCORE,
            powerup_pickup_score: POWERUP_PICKUP_SCORE,
            level_complete_bonus: LEVEL_COMPLETE_BONUS,
        }
    }
}

impl Tuning {
    /// Board width in pixels
    #[inline]
    pub fn board_width(&self) -> f32 {
        self.grid_width as f32 * self.cell_size
    }

    /// Board height in pixels
    #[inline]
    pub fn board_height(&self) -> f32 {
        self.grid_height as f32 * self.cell_size
    }

    /// The full playable extent
    pub fn board(&self) -> Rect {
        Rect::new(0.0, 0.0, self.board_width(), self.board_height())
    }

    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.grid_width == 0 || self.grid_height == 0 || self.cell_size <= 0.0 {
            return Err(TuningError::Invalid("board must have a positive extent"));
        }
        if self.tank_size > self.cell_size * 2.0 {
            return Err(TuningError::Invalid("tanks must fit through a two-cell gap"));
        }
        if self.tick_interval_ms == 0 || self.spawn_interval_ms == 0 {
            return Err(TuningError::Invalid("timer intervals must be non-zero"));
        }
        if self.spawn_points == 0 {
            return Err(TuningError::Invalid("at least one spawn point is required"));
        }
        if self.enemy_ai_interval == 0 || self.powerup_blink_period == 0 {
            return Err(TuningError::Invalid("AI and blink cadences must be non-zero"));
        }
        if self.powerup_drop_percent > 100 || self.terrain_density > 100 {
            return Err(TuningError::Invalid("percentages must be within 0..=100"));
        }
        Ok(())
    }
}
