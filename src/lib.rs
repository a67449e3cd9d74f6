//! Tank Arena - A top-down tank battle simulation
//!
//! Core modules:
//! - `sim`: Tick-driven simulation (movement, collisions, spawning, game state)
//! - `engine`: State machine, timers and the host-facing API
//! - `tuning`: Data-driven board geometry and game balance
//! - `settings`: Persisted player preferences
//! - `palette`: Color hints handed to the renderer

pub mod engine;
pub mod palette;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use engine::GameEngine;
pub use palette::Color;
pub use settings::{Settings, SettingsError};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Grid dimensions (cells)
    pub const GRID_WIDTH: u32 = 26;
    pub const GRID_HEIGHT: u32 = 26;
    pub const CELL_SIZE: f32 = 32.0;

    /// Entity sizes (pixels, all square)
    pub const TANK_SIZE: f32 = 28.0;
    pub const BULLET_SIZE: f32 = 8.0;
    pub const POWERUP_SIZE: f32 = 24.0;

    /// Speeds (pixels per tick)
    pub const PLAYER_SPEED: f32 = 4.0;
    pub const ENEMY_SPEED: f32 = 2.0;
    pub const BULLET_SPEED: f32 = 8.0;

    pub const MAX_PLAYER_HEALTH: u32 = 3;
    pub const ENEMY_HEALTH: u32 = 1;

    /// Enemies per level, and how many may be on the board at once
    pub const MAX_ENEMIES: u32 = 20;
    pub const ACTIVE_ENEMIES: u32 = 4;
    pub const SPAWN_POINTS: u32 = 3;

    /// Timer intervals (milliseconds)
    pub const GAME_TICK_INTERVAL_MS: u32 = 16;
    pub const ENEMY_SPAWN_INTERVAL_MS: u32 = 5000;
    /// Maximum ticks run per `advance` call to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Scoring
    pub const ENEMY_KILL_SCORE: u64 = 100;
    pub const POWERUP_PICKUP_SCORE: u64 = 50;
    pub const LEVEL_COMPLETE_BONUS: u64 = 1000;

    /// Tick counts
    pub const SHOOT_COOLDOWN_TICKS: u32 = 30;
    pub const SHIELD_DURATION_TICKS: u32 = 300;
    pub const POWERUP_LIFETIME_TICKS: u32 = 300;
    pub const POWERUP_BLINK_THRESHOLD: u32 = 60;
    pub const POWERUP_BLINK_PERIOD: u32 = 10;
    pub const ENEMY_AI_INTERVAL: u32 = 30;
    pub const ENEMY_SHOOT_INTERVAL: u32 = 120;
    pub const ENEMY_DIRECTION_CHANGE_INTERVAL: u32 = 60;

    /// Bullets may travel this far past the board edge before expiring
    pub const BULLET_MARGIN: f32 = 50.0;
    /// Soft separation distance when the player overlaps an enemy
    pub const TANK_PUSH_DISTANCE: f32 = 2.0;
    /// Random placement attempts for a dropped power-up
    pub const POWERUP_SPAWN_ATTEMPTS: u32 = 50;
}
