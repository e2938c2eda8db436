//! Pit Runner - a side-scrolling platformer simulation
//!
//! Core modules:
//! - `sim`: Simulation (level generation, physics, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player-facing preferences (particles, volume)
//! - `audio`: Maps simulation events to audio cues for an external backend
//!
//! Rendering and raw input handling live outside this crate. An adapter feeds
//! [`sim::TickInput`] into [`sim::tick`] once per frame and draws from
//! [`sim::GameState::snapshot`].

pub mod audio;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{QualityPreset, Settings};
pub use tuning::{LevelLayout, Tuning};

/// Game configuration constants
pub mod consts {
    /// Simulation steps per second (one step per display refresh)
    pub const SIM_HZ: f32 = 60.0;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / SIM_HZ;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Display dimensions
    pub const DISPLAY_WIDTH: f32 = 900.0;
    pub const DISPLAY_HEIGHT: f32 = 500.0;

    /// Vertical acceleration per frame
    pub const GRAVITY: f32 = 0.5;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 75.0;
    pub const PLAYER_SPEED: f32 = 7.0;
    pub const PLAYER_ACCELERATION: f32 = 1.0;
    pub const PLAYER_FRICTION: f32 = 0.8;
    pub const MAX_JUMPS: u8 = 2;
    /// Horizontal speeds below this snap to zero
    pub const VELOCITY_DEAD_ZONE: f32 = 0.1;
    pub const JUMP_VELOCITY: f32 = -12.0;
    /// Upward speed is cut to this when jump is released early
    pub const JUMP_CUT_VELOCITY: f32 = -4.0;
    /// How far below the display bottom the player may fall before dying
    pub const FALL_MARGIN: f32 = 200.0;

    /// Spawn point used on a full reset
    pub const SPAWN_X: f32 = 100.0;
    pub const SPAWN_Y: f32 = 300.0;

    /// Shooting
    pub const BULLET_SPEED: f32 = 12.0;
    pub const BULLET_RADIUS: f32 = 4.0;
    pub const SHOOT_COOLDOWN_FRAMES: u32 = 15;

    /// Shield powerup lasts ~8 seconds
    pub const SHIELD_DURATION_FRAMES: u32 = 8 * 60;
    /// Enemies touching an active shield are shoved this far along +x
    pub const SHIELD_KNOCKBACK: f32 = 140.0;

    /// Score awards
    pub const COIN_SCORE: u32 = 10;
    pub const ENEMY_KILL_SCORE: u32 = 20;
    pub const CHECKPOINT_SCORE: u32 = 50;

    /// Particle life lost per frame
    pub const PARTICLE_DECAY: f32 = 0.03;
    /// Particle velocity components are drawn from [-SPREAD/2, SPREAD/2)
    pub const PARTICLE_SPREAD: f32 = 5.0;

    /// Colors (0xRRGGBB)
    pub const COLOR_JUMP_DUST: u32 = 0xffffff;
    pub const COLOR_LANDING_DUST: u32 = 0x8d6e63;
    pub const COLOR_COIN_SPARKLE: u32 = 0xffd700;
    pub const COLOR_ENEMY_BURST: u32 = 0x66bb6a;
    pub const COLOR_BULLET: u32 = 0xffff00;
}
