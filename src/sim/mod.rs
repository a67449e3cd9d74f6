//! Tick-driven simulation module
//!
//! All gameplay logic lives here. This module is pure:
//! - Advances only in whole ticks
//! - Seeded RNG only
//! - Containers keep insertion order
//! - No rendering, audio or platform dependencies

pub mod block;
pub mod bullet;
pub mod collision;
pub mod entity;
pub mod level;
pub mod movement;
pub mod powerup;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tank;
pub mod tick;
pub mod timer;

pub use block::{Block, BlockKind};
pub use bullet::Bullet;
pub use entity::{Body, EntityKind};
pub use movement::Mover;
pub use powerup::{PowerUp, PowerUpKind};
pub use rect::{Direction, Rect};
pub use state::{GameEvent, GamePhase, GameState, SoundEffect};
pub use tank::{Enemy, MoveIntent, Tank};
pub use tick::tick;
pub use timer::Timer;
