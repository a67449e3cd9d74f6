//! Tank Arena headless driver
//!
//! Runs the engine at its tick cadence with a scripted player, logs what the
//! engine reports and records the high score in the settings file.
//!
//! Usage: `tank-arena [settings.json] [seed] [tuning.json]`

use tank_arena::engine::keys;
use tank_arena::sim::{GameEvent, GamePhase};
use tank_arena::{GameEngine, Settings, Tuning};

/// Simulated play time before the driver gives up (ms)
const MAX_PLAY_MS: u64 = 10 * 60 * 1000;
/// How long the scripted player holds each direction (ticks)
const TURN_EVERY_TICKS: u64 = 90;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings_path = args.next().unwrap_or_else(|| "tank-arena-settings.json".to_string());
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x7A4E);

    let tuning = match args.next() {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::error!("Failed to load tuning from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let mut settings = Settings::load_or_default(&settings_path);
    let frame_ms = u64::from(tuning.tick_interval_ms);

    let mut engine = GameEngine::new(tuning, &settings, seed);
    engine.start_game();
    log::info!("Tank Arena (headless) running with seed {}", seed);

    let script = [keys::UP, keys::RIGHT, keys::UP, keys::LEFT, keys::DOWN, keys::RIGHT];
    let mut held = None;
    let mut elapsed = 0;
    let mut frame: u64 = 0;

    while elapsed < MAX_PLAY_MS {
        match engine.phase() {
            GamePhase::GameOver => break,
            GamePhase::LevelComplete => {
                held = None;
                engine.next_level();
            }
            _ => {}
        }

        if frame % TURN_EVERY_TICKS == 0 {
            if let Some(key) = held {
                engine.process_input(key, false);
            }
            let key = script[(frame / TURN_EVERY_TICKS) as usize % script.len()];
            engine.process_input(key, true);
            held = Some(key);
        }
        engine.player_shoot();
        engine.advance(frame_ms);

        for event in engine.drain_events() {
            report(&event);
        }

        elapsed += frame_ms;
        frame += 1;
    }

    println!(
        "Finished: {:?} on level {} with score {} after {:.1}s",
        engine.phase(),
        engine.level(),
        engine.score(),
        elapsed as f64 / 1000.0
    );

    if settings.record_high_score(engine.score()) {
        println!("New high score: {}", settings.high_score);
    }
    if let Err(e) = settings.save(&settings_path) {
        log::error!("Failed to save settings: {}", e);
    }
}

fn report(event: &GameEvent) {
    match event {
        GameEvent::Sound(sound) => log::trace!("sound: {}", sound.name()),
        GameEvent::StateChanged(phase) => log::info!("state: {:?}", phase),
        GameEvent::ScoreChanged(score) => log::debug!("score: {}", score),
        GameEvent::PlayerHealthChanged(health) => log::info!("health: {}", health),
        GameEvent::LevelChanged(level) => log::info!("level: {}", level),
    }
}
