//! Host-facing engine: state machine, timers and input
//!
//! The host feeds wall-clock time through [`GameEngine::advance`], forwards
//! key events and drains [`GameEvent`]s after each call. Entities are only
//! ever exposed read-only.

use rand::Rng;

use crate::consts::MAX_SUBSTEPS;
use crate::palette::Color;
use crate::settings::Settings;
use crate::sim::{
    Block, Bullet, Direction, Enemy, GameEvent, GamePhase, GameState, PowerUp, SoundEffect, Tank,
    Timer, tick,
};
use crate::tuning::Tuning;

/// Key codes understood by [`GameEngine::process_input`] (Qt numbering)
pub mod keys {
    pub const W: u32 = 0x57;
    pub const A: u32 = 0x41;
    pub const S: u32 = 0x53;
    pub const D: u32 = 0x44;
    pub const LEFT: u32 = 0x0100_0012;
    pub const UP: u32 = 0x0100_0013;
    pub const RIGHT: u32 = 0x0100_0014;
    pub const DOWN: u32 = 0x0100_0015;
}

/// Owns the simulation state plus the tick and spawn timers
#[derive(Debug, Clone)]
pub struct GameEngine {
    state: GameState,
    tick_timer: Timer,
    spawn_timer: Timer,
}

impl GameEngine {
    /// Create an engine at the menu. The player color is read from
    /// `settings` once; later preference changes go through
    /// [`set_player_color`](Self::set_player_color).
    pub fn new(tuning: Tuning, settings: &Settings, seed: u64) -> Self {
        let tick_timer = Timer::new(tuning.tick_interval_ms);
        let spawn_timer = Timer::new(tuning.spawn_interval_ms);
        Self {
            state: GameState::new(tuning, seed, settings.tank_color()),
            tick_timer,
            spawn_timer,
        }
    }

    // === State machine ===

    /// Start a new game from level 1 with a zero score
    pub fn start_game(&mut self) {
        self.state.score = 0;
        self.state.level = 1;
        self.begin_level();
        self.state.emit(GameEvent::ScoreChanged(0));
        log::info!("Game started");
    }

    /// Alias of [`start_game`](Self::start_game), valid from any phase
    pub fn restart_game(&mut self) {
        self.start_game();
    }

    /// Advance to the next level, keeping the score
    pub fn next_level(&mut self) {
        if self.state.phase != GamePhase::LevelComplete {
            return;
        }
        self.state.level += 1;
        self.begin_level();
        log::info!("Advanced to level {}", self.state.level);
    }

    pub fn pause_game(&mut self) {
        if self.state.phase != GamePhase::Playing {
            return;
        }
        self.set_phase(GamePhase::Paused);
        log::info!("Game paused");
    }

    pub fn resume_game(&mut self) {
        if self.state.phase != GamePhase::Paused {
            return;
        }
        // Pick up mid-interval where the pause left off
        self.tick_timer.resume();
        self.spawn_timer.resume();
        self.set_phase(GamePhase::Playing);
        log::info!("Game resumed");
    }

    /// Abandon the current game and return to the menu
    pub fn quit_to_menu(&mut self) {
        self.state.clear_level();
        self.set_phase(GamePhase::Menu);
        log::info!("Returned to menu");
    }

    /// Reset the level containers and enter Playing
    fn begin_level(&mut self) {
        self.state.clear_level();
        self.state.enemies_remaining = self.state.tuning.enemies_per_level;
        self.state.build_level();
        // Restart from zero even when restarting mid-game
        self.tick_timer.stop();
        self.spawn_timer.stop();
        self.set_phase(GamePhase::Playing);
        self.state.emit(GameEvent::LevelChanged(self.state.level));
        self.state.emit(GameEvent::PlayerHealthChanged(self.state.player.health));
    }

    /// Switch phase, announce it and bring the timers in line
    fn set_phase(&mut self, phase: GamePhase) {
        self.state.phase = phase;
        self.state.emit(GameEvent::StateChanged(phase));
        self.sync_timers();
    }

    /// Timers run exactly while Playing. Entering Playing from a stop
    /// restarts them from zero.
    fn sync_timers(&mut self) {
        if self.state.phase == GamePhase::Playing {
            if !self.tick_timer.is_running() {
                self.tick_timer.start();
            }
            if !self.spawn_timer.is_running() {
                self.spawn_timer.interval_ms = self.next_spawn_interval();
                self.spawn_timer.start();
            }
        } else {
            self.tick_timer.stop();
            self.spawn_timer.stop();
        }
    }

    fn next_spawn_interval(&mut self) -> u32 {
        let tuning = &self.state.tuning;
        let jitter = if tuning.spawn_jitter_ms > 0 {
            self.state.rng.random_range(0..tuning.spawn_jitter_ms)
        } else {
            0
        };
        tuning.spawn_interval_ms + jitter
    }

    // === Input ===

    /// Map a key press/release onto the player's movement intent.
    /// Ignored unless Playing; unknown keys are ignored.
    pub fn process_input(&mut self, key_code: u32, pressed: bool) {
        if self.state.phase != GamePhase::Playing {
            return;
        }
        let dir = match key_code {
            keys::W | keys::UP => Direction::Up,
            keys::S | keys::DOWN => Direction::Down,
            keys::A | keys::LEFT => Direction::Left,
            keys::D | keys::RIGHT => Direction::Right,
            _ => return,
        };
        self.state.player.set_moving(dir, pressed);
    }

    /// Fire from the player's center in its facing direction
    pub fn player_shoot(&mut self) {
        if self.state.phase != GamePhase::Playing {
            return;
        }
        let player = &self.state.player;
        if !player.is_active() || !player.can_shoot() {
            return;
        }
        let bullet = Bullet::new(
            player.rect().center(),
            self.state.tuning.bullet_size,
            player.direction,
            self.state.tuning.bullet_speed,
            true,
        );
        self.state.bullets.push(bullet);
        self.state.player.reset_shoot_cooldown();
        self.state.play(SoundEffect::PlayerShoot);
    }

    /// Change the player color preference. Takes effect on the live tank
    /// and every level built afterwards.
    pub fn set_player_color(&mut self, color: Color) {
        self.state.player_color = color;
        self.state.player.body.color = color;
    }

    // === Time ===

    /// Run one tick now, regardless of the tick timer
    pub fn update(&mut self) {
        let before = self.state.phase;
        tick(&mut self.state);
        if self.state.phase != before {
            self.sync_timers();
        }
    }

    /// Run one spawn attempt now. Returns true if an enemy appeared.
    pub fn spawn_enemy(&mut self) -> bool {
        self.state.spawn_enemy()
    }

    /// Feed elapsed wall-clock time; runs every tick and spawn attempt
    /// that came due, capped at `MAX_SUBSTEPS` ticks per call
    pub fn advance(&mut self, elapsed_ms: u64) {
        self.tick_timer.accumulate(elapsed_ms);
        self.spawn_timer.accumulate(elapsed_ms);
        self.tick_timer.clamp_backlog(MAX_SUBSTEPS);
        self.spawn_timer.clamp_backlog(1);

        let mut substeps = 0;
        while substeps < MAX_SUBSTEPS && self.tick_timer.try_fire() {
            self.update();
            substeps += 1;
        }

        if self.spawn_timer.try_fire() {
            self.state.spawn_enemy();
            self.spawn_timer.interval_ms = self.next_spawn_interval();
        }
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    // === Read-only accessors ===

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    pub fn enemies_remaining(&self) -> u32 {
        self.state.enemies_remaining
    }

    pub fn player(&self) -> &Tank {
        &self.state.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.state.enemies
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.state.bullets
    }

    pub fn blocks(&self) -> &[Block] {
        &self.state.blocks
    }

    pub fn powerups(&self) -> &[PowerUp] {
        &self.state.powerups
    }

    pub fn is_base_destroyed(&self) -> bool {
        self.state.base_destroyed
    }

    pub fn tuning(&self) -> &Tuning {
        &self.state.tuning
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_ticking(&self) -> bool {
        self.tick_timer.is_running()
    }

    pub fn is_spawning(&self) -> bool {
        self.spawn_timer.is_running()
    }

    /// Mutable state for scenario setup in tests
    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
