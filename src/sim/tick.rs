//! Fixed timestep simulation tick
//!
//! One call advances every entity once, resolves collisions, compacts the
//! containers and then decides whether the level is over.

use super::state::{GameEvent, GamePhase, GameState};

/// Advance the game state by one tick. Does nothing unless Playing.
pub fn tick(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.time_ticks += 1;

    // === Movement ===
    state.move_player();
    state.update_enemies();
    state.advance_bullets();
    state.advance_powerups();

    // === Collisions ===
    state.check_collisions();

    // Dead entities leave only after every pass has seen them
    state.cleanup();

    check_end_of_level(state);
}

/// Transition out of Playing when the level has been lost or won.
/// Losing takes priority when both hold in the same tick.
fn check_end_of_level(state: &mut GameState) {
    if !state.player.is_active() || state.base_destroyed {
        state.phase = GamePhase::GameOver;
        state.emit(GameEvent::StateChanged(GamePhase::GameOver));
        log::info!(
            "Game over on level {} (score {}, base destroyed: {})",
            state.level,
            state.score,
            state.base_destroyed
        );
    } else if state.enemies_remaining == 0 && state.enemies.is_empty() {
        state.add_score(state.tuning.level_complete_bonus);
        state.phase = GamePhase::LevelComplete;
        state.emit(GameEvent::StateChanged(GamePhase::LevelComplete));
        log::info!("Level {} complete (score {})", state.level, state.score);
    }
}
