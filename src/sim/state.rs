//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in `GameState`. The engine owns
//! exactly one and never exposes it mutably to the host.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::block::Block;
use super::bullet::Bullet;
use super::powerup::PowerUp;
use super::rect::Rect;
use super::tank::{Enemy, Tank};
use crate::palette::Color;
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, no level loaded
    Menu,
    /// Active gameplay
    Playing,
    /// Frozen mid-level
    Paused,
    /// Player destroyed or base lost
    GameOver,
    /// Every enemy of the level destroyed
    LevelComplete,
}

/// Named sound triggers for the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    PlayerShoot,
    EnemyShoot,
    EnemySpawn,
    EnemyDestroyed,
    PlayerHit,
    BlockDestroyed,
    BaseDestroyed,
    PowerUpHealth,
    PowerUpBomb,
    PowerUpShield,
}

impl SoundEffect {
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::PlayerShoot => "player_shoot",
            SoundEffect::EnemyShoot => "enemy_shoot",
            SoundEffect::EnemySpawn => "enemy_spawn",
            SoundEffect::EnemyDestroyed => "enemy_destroyed",
            SoundEffect::PlayerHit => "player_hit",
            SoundEffect::BlockDestroyed => "block_destroyed",
            SoundEffect::BaseDestroyed => "base_destroyed",
            SoundEffect::PowerUpHealth => "powerup_health",
            SoundEffect::PowerUpBomb => "powerup_bomb",
            SoundEffect::PowerUpShield => "powerup_shield",
        }
    }
}

/// Fire-and-forget notifications, drained by the host after each call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    StateChanged(GamePhase),
    ScoreChanged(u64),
    PlayerHealthChanged(u32),
    LevelChanged(u32),
    Sound(SoundEffect),
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub player: Tank,
    /// Insertion-ordered containers; inactive entries survive only until
    /// the end of the tick that deactivated them
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub blocks: Vec<Block>,
    pub powerups: Vec<PowerUp>,
    pub score: u64,
    /// Current level (1-based)
    pub level: u32,
    /// Enemies still to be spawned this level
    pub enemies_remaining: u32,
    /// Enemies spawned and not yet destroyed
    pub active_enemies: u32,
    /// Set by any bullet reaching the base
    pub base_destroyed: bool,
    /// Spawn attempts that passed the capacity check (drives round-robin)
    pub spawn_attempts: u32,
    /// Player color preference applied at each level build
    pub player_color: Color,
    /// Simulation tick counter for the current level
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create an empty state sitting at the menu
    pub fn new(tuning: Tuning, seed: u64, player_color: Color) -> Self {
        let player = Tank::player(Self::player_start_for(&tuning), player_color, &tuning);
        Self {
            tuning,
            phase: GamePhase::Menu,
            player,
            enemies: Vec::new(),
            bullets: Vec::new(),
            blocks: Vec::new(),
            powerups: Vec::new(),
            score: 0,
            level: 1,
            enemies_remaining: 0,
            active_enemies: 0,
            base_destroyed: false,
            spawn_attempts: 0,
            player_color,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Top-left corner where the player tank starts each level
    pub fn player_start(&self) -> Vec2 {
        Self::player_start_for(&self.tuning)
    }

    fn player_start_for(tuning: &Tuning) -> Vec2 {
        Vec2::new(tuning.cell_size / 2.0, tuning.board_height() - tuning.cell_size / 2.0 - tuning.tank_size)
    }

    /// Ground kept clear around the player's start so every level opens
    /// with room to manoeuvre
    pub fn spawn_protection_zone(&self) -> Rect {
        let start = Rect::square(self.player_start(), self.tuning.tank_size);
        let margin = self.tuning.spawn_protection_cells as f32 * self.tuning.cell_size;
        let zone = start.expanded(margin);
        let board = self.tuning.board();
        let min = zone.pos.max(board.pos);
        let max = (zone.pos + zone.size).min(board.pos + board.size);
        Rect { pos: min, size: max - min }
    }

    /// Where bullets may travel before expiring
    pub fn bullet_travel_bounds(&self) -> Rect {
        self.tuning.board().expanded(self.tuning.bullet_margin)
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn play(&mut self, sound: SoundEffect) {
        self.events.push(GameEvent::Sound(sound));
    }

    /// Add points and announce the new total
    pub fn add_score(&mut self, points: u64) {
        if points == 0 {
            return;
        }
        self.score += points;
        self.emit(GameEvent::ScoreChanged(self.score));
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drop every level entity and counter (the player is rebuilt at start)
    pub fn clear_level(&mut self) {
        self.enemies.clear();
        self.bullets.clear();
        self.blocks.clear();
        self.powerups.clear();
        self.enemies_remaining = 0;
        self.active_enemies = 0;
        self.base_destroyed = false;
        self.spawn_attempts = 0;
        self.time_ticks = 0;
        self.player = Tank::player(self.player_start(), self.player_color, &self.tuning);
    }

    /// Remove inactive entities, keeping the survivors in order
    pub fn cleanup(&mut self) {
        self.bullets.retain(|b| b.is_active());
        self.enemies.retain(|e| e.is_active());
        self.powerups.retain(|p| p.is_active());
        self.blocks.retain(|b| b.is_active());
    }
}
