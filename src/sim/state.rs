//! Game state and core simulation types
//!
//! Entity stores are flat vectors of plain data. Behavior lives in
//! [`super::physics`] and [`super::tick`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level::{Level, generate_level};
use super::phase::GamePhase;
use super::rect::Rect;
use crate::consts::*;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Which way the player sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1.0 for left, 1.0 for right
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Locomotion state, used by renderers to pick a sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locomotion {
    #[default]
    Idle,
    Run,
    Jump,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// x: horizontal speed, y: vertical speed (+ is down)
    pub vel: Vec2,
    pub size: Vec2,
    /// Horizontal speed cap
    pub speed: f32,
    pub acceleration: f32,
    /// Per-frame horizontal velocity multiplier (< 1)
    pub friction: f32,
    pub facing: Facing,
    pub locomotion: Locomotion,
    pub on_ground: bool,
    pub jump_count: u8,
    pub max_jumps: u8,
}

impl Player {
    pub fn new(tuning: &Tuning, pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size: Vec2::new(tuning.player_width, tuning.player_height),
            speed: tuning.player_speed,
            acceleration: tuning.player_acceleration,
            friction: tuning.player_friction,
            facing: Facing::Right,
            locomotion: Locomotion::Idle,
            on_ground: false,
            jump_count: 0,
            max_jumps: tuning.max_jumps,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Bottom-center point
    pub fn feet(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y + self.size.y)
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn can_jump(&self) -> bool {
        self.max_jumps > 0 && (self.on_ground || self.jump_count < self.max_jumps)
    }

    /// Put the player back at `pos` at rest and airborne
    pub fn respawn_at(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.on_ground = false;
        self.jump_count = 0;
    }
}

/// A solid platform; only its top edge collides
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
}

impl Platform {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
        }
    }
}

/// Enemy motion model with its kind-specific state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Ground patrol; fast walkers are walkers with a higher speed
    Walker,
    /// Patrols and hops at random from its base height
    Jumper { vy: f32 },
    /// Patrols while bobbing on a sine wave around its base height
    Flyer { phase: f32 },
}

/// An enemy entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: Vec2,
    /// Patrol bounds for the left edge
    pub min_x: f32,
    pub max_x: f32,
    /// +1.0 moving right, -1.0 moving left
    pub dir: f32,
    pub speed: f32,
    /// Resting height (jumpers land here, flyers oscillate around it)
    pub base_y: f32,
    pub kind: EnemyKind,
}

/// Standard enemy footprint
pub const ENEMY_SIZE: f32 = 40.0;
pub const WALKER_SPEED: f32 = 1.0;
pub const FAST_WALKER_SPEED: f32 = 3.0;

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Vec2,
    pub radius: f32,
    pub taken: bool,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    Shield,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Powerup {
    pub pos: Vec2,
    pub size: f32,
    pub kind: PowerupKind,
    pub taken: bool,
}

impl Powerup {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }
}

/// A floor spike; drawn as a 20px triangle rising from `anchor`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spike {
    pub anchor: Vec2,
}

impl Spike {
    /// Lethal region, narrower than the drawn triangle
    pub fn footprint(&self) -> Rect {
        Rect::new(self.anchor.x + 5.0, self.anchor.y - 15.0, 10.0, 15.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub rect: Rect,
    pub triggered: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel_x: f32,
    pub radius: f32,
    /// 0xRRGGBB
    pub color: u32,
}

/// A particle for visual effects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1.0 at spawn, removed at <= 0.0
    pub life: f32,
    /// 0xRRGGBB
    pub color: u32,
}

/// Per-run progress that survives checkpoint respawns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub score: u32,
    pub shield: bool,
    pub shield_frames: u32,
    pub shoot_cooldown: u32,
    /// Respawn point (player top-left)
    pub last_checkpoint: Vec2,
    pub level_index: u32,
    pub camera_x: f32,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            score: 0,
            shield: false,
            shield_frames: 0,
            shoot_cooldown: 0,
            last_checkpoint: Vec2::new(SPAWN_X, SPAWN_Y),
            level_index: 0,
            camera_x: 0.0,
        }
    }
}

impl RunState {
    /// Whole seconds of shield left, rounded up (HUD display)
    pub fn shield_seconds(&self) -> u32 {
        if self.shield {
            self.shield_frames.div_ceil(SIM_HZ as u32)
        } else {
            0
        }
    }

    pub fn drop_shield(&mut self) {
        self.shield = false;
        self.shield_frames = 0;
    }
}

/// Things that happened during a tick, for audio and other adapters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A run started from the menu
    MusicStarted,
    ShotFired,
    Jumped,
    Landed,
    CoinCollected { pos: Vec2 },
    CheckpointReached { respawn: Vec2 },
    EnemyDestroyed { pos: Vec2 },
    ShieldGained,
    ShieldBroken,
    ShieldExpired,
    PlayerDied,
    LevelComplete { score: u32 },
    /// Full reset with a freshly generated map
    LevelGenerated,
    /// Player returned to the last checkpoint
    Respawned,
}

/// Complete simulation context: phase, run state, and all entity stores
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub run: RunState,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub powerups: Vec<Powerup>,
    pub spikes: Vec<Spike>,
    pub checkpoints: Vec<Checkpoint>,
    pub bullets: Vec<Bullet>,
    pub particles: Vec<Particle>,
    /// Touching this volume wins the level
    pub finish: Rect,
    /// Events raised during the most recent tick
    pub events: Vec<GameEvent>,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub tuning: Tuning,
    /// Live particle budget (0 disables particles)
    pub max_particles: usize,
    /// Level generation and enemy behavior
    pub(crate) rng: Pcg32,
    /// Particle jitter only; never feeds level generation
    fx_rng: Pcg32,
}

impl GameState {
    /// New game in the menu, with an entropy-seeded RNG
    pub fn new(tuning: Tuning, settings: &Settings) -> Self {
        let rng = Pcg32::from_rng(&mut rand::rng());
        Self::with_rng(tuning, settings, rng)
    }

    /// New game whose level layouts are reproducible from `seed`
    pub fn with_seed(tuning: Tuning, settings: &Settings, seed: u64) -> Self {
        Self::with_rng(tuning, settings, Pcg32::seed_from_u64(seed))
    }

    fn with_rng(tuning: Tuning, settings: &Settings, mut rng: Pcg32) -> Self {
        let fx_rng = Pcg32::from_rng(&mut rng);
        let run = RunState::default();
        Self {
            phase: GamePhase::Menu,
            player: Player::new(&tuning, run.last_checkpoint),
            run,
            platforms: Vec::new(),
            enemies: Vec::new(),
            coins: Vec::new(),
            powerups: Vec::new(),
            spikes: Vec::new(),
            checkpoints: Vec::new(),
            bullets: Vec::new(),
            particles: Vec::new(),
            finish: Rect::default(),
            events: Vec::new(),
            time_ticks: 0,
            tuning,
            max_particles: settings.max_particles(),
            rng,
            fx_rng,
        }
    }

    /// Replace every entity store with a generated level
    pub fn install_level(&mut self, level: Level) {
        self.platforms = level.platforms;
        self.enemies = level.enemies;
        self.coins = level.coins;
        self.powerups = level.powerups;
        self.spikes = level.spikes;
        self.checkpoints = level.checkpoints;
        self.finish = level.finish;
        self.bullets.clear();
        self.particles.clear();
    }

    /// New map, score zeroed, player at the level spawn
    pub fn full_reset(&mut self) {
        self.run.score = 0;
        self.run.last_checkpoint = Vec2::new(SPAWN_X, SPAWN_Y);
        let level = generate_level(&mut self.rng, &self.tuning.layout);
        self.install_level(level);
        self.respawn();
        self.events.push(GameEvent::LevelGenerated);
        log::info!(
            "Level {} generated: {} platforms, {} enemies, {} coins, {} spikes, {} checkpoints",
            self.run.level_index + 1,
            self.platforms.len(),
            self.enemies.len(),
            self.coins.len(),
            self.spikes.len(),
            self.checkpoints.len()
        );
    }

    /// Player back to the last checkpoint; map and score untouched
    pub fn respawn(&mut self) {
        self.player.respawn_at(self.run.last_checkpoint);
        self.run.camera_x = 0.0;
        self.run.drop_shield();
        self.run.shoot_cooldown = 0;
    }

    /// Emit `count` particles with random velocities from `at`
    pub fn spawn_particles(&mut self, at: Vec2, color: u32, count: usize) {
        let room = self.max_particles.saturating_sub(self.particles.len());
        for _ in 0..count.min(room) {
            let vel = Vec2::new(
                (self.fx_rng.random::<f32>() - 0.5) * PARTICLE_SPREAD,
                (self.fx_rng.random::<f32>() - 0.5) * PARTICLE_SPREAD,
            );
            self.particles.push(Particle {
                pos: at,
                vel,
                life: 1.0,
                color,
            });
        }
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            run: &self.run,
            player: &self.player,
            platforms: &self.platforms,
            enemies: &self.enemies,
            coins: &self.coins,
            powerups: &self.powerups,
            spikes: &self.spikes,
            checkpoints: &self.checkpoints,
            bullets: &self.bullets,
            particles: &self.particles,
            finish: self.finish,
        }
    }
}

/// Borrowed view of everything a renderer draws
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub run: &'a RunState,
    pub player: &'a Player,
    pub platforms: &'a [Platform],
    pub enemies: &'a [Enemy],
    pub coins: &'a [Coin],
    pub powerups: &'a [Powerup],
    pub spikes: &'a [Spike],
    pub checkpoints: &'a [Checkpoint],
    pub bullets: &'a [Bullet],
    pub particles: &'a [Particle],
    pub finish: Rect,
}

impl Snapshot<'_> {
    /// Coins still on the map
    pub fn coins_remaining(&self) -> usize {
        self.coins.iter().filter(|c| !c.taken).count()
    }
}
