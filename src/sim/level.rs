//! Procedural level generation
//!
//! A level is a starting ground platform followed by `segment_count` segments
//! (a pit, then a platform carrying at most one enemy or checkpoint, maybe a
//! spike and a coin row), a landing platform and the finish volume.
//!
//! The random source is any [`rand::Rng`], so tests can pass a seeded
//! generator while normal play regenerates a different layout every time.

use std::f32::consts::PI;

use glam::Vec2;
use rand::Rng;

use super::rect::Rect;
use super::state::{
    Checkpoint, Coin, ENEMY_SIZE, Enemy, EnemyKind, FAST_WALKER_SPEED, Platform, Powerup,
    PowerupKind, Spike, WALKER_SPEED,
};
use crate::tuning::LevelLayout;

/// Checkpoint flag dimensions
pub const CHECKPOINT_WIDTH: f32 = 40.0;
pub const CHECKPOINT_HEIGHT: f32 = 60.0;
/// Checkpoint distance from the segment's left edge
pub const CHECKPOINT_INSET: f32 = 50.0;
/// Finish volume dimensions (top edge at y=350)
pub const FINISH_Y: f32 = 350.0;
pub const FINISH_WIDTH: f32 = 50.0;
pub const FINISH_HEIGHT: f32 = 100.0;

/// Everything the generator produces for one level
#[derive(Debug, Clone, Default)]
pub struct Level {
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub spikes: Vec<Spike>,
    pub checkpoints: Vec<Checkpoint>,
    pub powerups: Vec<Powerup>,
    pub finish: Rect,
}

/// Uniform sample in [min, max); degenerate ranges return `min`
fn sample<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.random_bool(p.clamp(0.0, 1.0))
}

/// Build a fresh level layout
pub fn generate_level<R: Rng + ?Sized>(rng: &mut R, layout: &LevelLayout) -> Level {
    let mut level = Level {
        powerups: vec![Powerup {
            pos: Vec2::new(layout.powerup_x, layout.powerup_y),
            size: layout.powerup_size,
            kind: PowerupKind::Shield,
            taken: false,
        }],
        ..Default::default()
    };

    // Starting ground
    level.platforms.push(Platform::new(
        0.0,
        layout.baseline_y,
        layout.start_platform_width,
        layout.platform_height,
    ));
    let mut cursor = layout.start_platform_width;

    for i in 0..layout.segment_count {
        // Pit
        cursor += sample(rng, layout.gap_min, layout.gap_max);

        let width = sample(rng, layout.width_min, layout.width_max);
        let top = if chance(rng, layout.elevated_chance) {
            sample(rng, layout.elevated_min, layout.elevated_max)
        } else {
            layout.baseline_y
        }
        .min(layout.baseline_y);

        level
            .platforms
            .push(Platform::new(cursor, top, width, layout.platform_height));

        let has_checkpoint =
            i > 0 && layout.checkpoint_interval > 0 && i % layout.checkpoint_interval == 0;

        if has_checkpoint {
            level.checkpoints.push(Checkpoint {
                rect: Rect::new(
                    cursor + CHECKPOINT_INSET,
                    top - CHECKPOINT_HEIGHT,
                    CHECKPOINT_WIDTH,
                    CHECKPOINT_HEIGHT,
                ),
                triggered: false,
            });
        } else if chance(rng, layout.enemy_chance) {
            level.enemies.push(spawn_enemy(rng, cursor, top, width));
        }

        if chance(rng, layout.spike_chance) {
            level.spikes.push(Spike {
                anchor: Vec2::new(cursor + width / 2.0, top),
            });
        }

        if !has_checkpoint && chance(rng, layout.coin_row_chance) {
            let count = layout.coins_per_row;
            let row_width = layout.coin_spacing * count.saturating_sub(1) as f32;
            let start_x = cursor + width / 2.0 - row_width / 2.0;
            for c in 0..count {
                level.coins.push(Coin {
                    pos: Vec2::new(start_x + c as f32 * layout.coin_spacing, top - layout.coin_hover),
                    radius: layout.coin_radius,
                    taken: false,
                });
            }
        }

        cursor += width;
    }

    level.finish = Rect::new(
        cursor + layout.finish_offset,
        FINISH_Y,
        FINISH_WIDTH,
        FINISH_HEIGHT,
    );
    level.platforms.push(Platform::new(
        cursor,
        layout.baseline_y,
        layout.landing_platform_width,
        layout.platform_height,
    ));

    log::debug!(
        "Generated {} segments, finish at x={}",
        layout.segment_count,
        level.finish.x
    );

    level
}

/// One enemy patrolling the whole platform; kind weighted 30/20/25/25
/// (walker/fast walker/flyer/jumper)
fn spawn_enemy<R: Rng + ?Sized>(rng: &mut R, platform_x: f32, top: f32, width: f32) -> Enemy {
    let roll: f64 = rng.random();
    let (kind, speed) = if roll > 0.75 {
        (EnemyKind::Jumper { vy: 0.0 }, WALKER_SPEED)
    } else if roll > 0.5 {
        let phase = rng.random::<f32>() * PI;
        (EnemyKind::Flyer { phase }, WALKER_SPEED)
    } else if roll > 0.3 {
        (EnemyKind::Walker, FAST_WALKER_SPEED)
    } else {
        (EnemyKind::Walker, WALKER_SPEED)
    };

    let base_y = top - ENEMY_SIZE;
    Enemy {
        pos: Vec2::new(platform_x + 100.0 + rng.random::<f32>() * 100.0, base_y),
        size: Vec2::splat(ENEMY_SIZE),
        min_x: platform_x,
        max_x: platform_x + width - ENEMY_SIZE,
        dir: 1.0,
        speed,
        base_y,
        kind,
    }
}
