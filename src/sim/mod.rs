//! Simulation module
//!
//! All gameplay logic lives here:
//! - One `tick` per display refresh, per-frame units throughout
//! - Randomness only through the state's RNG (seedable for tests)
//! - No rendering, audio or platform dependencies

pub mod clock;
pub mod collision;
pub mod level;
pub mod phase;
pub mod physics;
pub mod rect;
pub mod state;
pub mod tick;

pub use clock::FrameClock;
pub use level::{Level, generate_level};
pub use phase::{GamePhase, PhaseAction, Transition};
pub use rect::Rect;
pub use state::{
    Bullet, Checkpoint, Coin, Enemy, EnemyKind, Facing, GameEvent, GameState, Locomotion,
    Particle, Platform, Player, Powerup, PowerupKind, RunState, Snapshot, Spike,
};
pub use tick::{TickInput, dispatch, tick};
