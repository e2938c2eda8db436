//! Motion integration for the player, enemies, bullets and particles
//!
//! All quantities are per frame: velocities in px/frame, gravity in
//! px/frame². One call advances one display refresh.

use glam::Vec2;
use rand::Rng;

use super::collision::{find_enemy_hit, resolve_platforms};
use super::phase::PhaseAction;
use super::state::{Bullet, Enemy, EnemyKind, Facing, GameEvent, GameState, Locomotion, Player};
use super::tick::{TickInput, dispatch};
use crate::consts::*;

/// Jumpers hop with this upward speed
pub const JUMPER_IMPULSE: f32 = -14.0;
/// Per-frame chance a grounded jumper hops
pub const JUMPER_HOP_CHANCE: f64 = 0.02;
/// Flyer phase advance per frame (radians)
pub const FLYER_PHASE_STEP: f32 = 0.05;
/// Flyer vertical swing around its base height
pub const FLYER_AMPLITUDE: f32 = 60.0;

/// Horizontal steering, friction and gravity, then integrate position
///
/// Leaves `|vel.x| <= speed`. Does not touch platforms.
pub fn integrate_player(player: &mut Player, left: bool, right: bool, gravity: f32) {
    player.locomotion = Locomotion::Idle;

    if left {
        player.vel.x -= player.acceleration;
        player.locomotion = Locomotion::Run;
        player.facing = Facing::Left;
    }
    if right {
        player.vel.x += player.acceleration;
        player.locomotion = Locomotion::Run;
        player.facing = Facing::Right;
    }

    player.vel.x *= player.friction;
    player.vel.x = player.vel.x.clamp(-player.speed, player.speed);
    if player.vel.x.abs() < VELOCITY_DEAD_ZONE {
        player.vel.x = 0.0;
    }
    player.pos.x += player.vel.x;

    player.vel.y += gravity;
    player.pos.y += player.vel.y;
}

/// Camera keeps the player centered, never scrolling left of the origin
pub fn camera_for(player: &Player, display_width: f32) -> f32 {
    (player.pos.x - display_width / 2.0 + player.size.x / 2.0).max(0.0)
}

/// Full player update: motion, landing, fall-out, camera, checkpoints, finish
pub fn update_player(state: &mut GameState, input: &TickInput) {
    state.run.shoot_cooldown = state.run.shoot_cooldown.saturating_sub(1);

    let was_on_ground = state.player.on_ground;
    integrate_player(
        &mut state.player,
        input.left,
        input.right,
        state.tuning.gravity,
    );

    let on_ground = resolve_platforms(&mut state.player, &state.platforms);
    if on_ground && !was_on_ground {
        let feet = state.player.feet();
        state.spawn_particles(feet, COLOR_LANDING_DUST, 8);
        state.events.push(GameEvent::Landed);
    }
    if !on_ground {
        state.player.locomotion = Locomotion::Jump;
    }

    if state.player.pos.y > state.tuning.death_line() {
        log::info!("Fell out of the level at x={:.0}", state.player.pos.x);
        dispatch(state, PhaseAction::Died);
    }

    state.run.camera_x = camera_for(&state.player, state.tuning.display_width);

    let player_x = state.player.pos.x;
    let player_height = state.player.size.y;
    for cp in state.checkpoints.iter_mut() {
        if !cp.triggered && player_x > cp.rect.x {
            cp.triggered = true;
            let respawn = Vec2::new(cp.rect.x, cp.rect.bottom() - player_height);
            state.run.last_checkpoint = respawn;
            state.run.score += CHECKPOINT_SCORE;
            state.events.push(GameEvent::CheckpointReached { respawn });
            log::debug!("Checkpoint reached, respawn at ({:.0}, {:.0})", respawn.x, respawn.y);
        }
    }

    if state.player.rect().overlaps(&state.finish) {
        dispatch(state, PhaseAction::ReachedFinish);
    }
}

/// Advance one enemy by its kind's motion model
pub fn move_enemy<R: Rng + ?Sized>(enemy: &mut Enemy, gravity: f32, rng: &mut R) {
    enemy.pos.x += enemy.dir * enemy.speed;
    if enemy.pos.x < enemy.min_x {
        enemy.dir = 1.0;
    }
    if enemy.pos.x > enemy.max_x {
        enemy.dir = -1.0;
    }

    match &mut enemy.kind {
        EnemyKind::Walker => {}
        EnemyKind::Jumper { vy } => {
            enemy.pos.y += *vy;
            *vy += gravity;
            if enemy.pos.y >= enemy.base_y {
                enemy.pos.y = enemy.base_y;
                *vy = 0.0;
                if rng.random_bool(JUMPER_HOP_CHANCE) {
                    *vy = JUMPER_IMPULSE;
                }
            }
        }
        EnemyKind::Flyer { phase } => {
            *phase += FLYER_PHASE_STEP;
            enemy.pos.y = enemy.base_y + phase.sin() * FLYER_AMPLITUDE;
        }
    }
}

pub fn update_enemies(state: &mut GameState) {
    let gravity = state.tuning.gravity;
    for enemy in state.enemies.iter_mut() {
        move_enemy(enemy, gravity, &mut state.rng);
    }
}

/// Ground jump or air jump while jumps remain
pub fn try_jump(state: &mut GameState) -> bool {
    if !state.player.can_jump() {
        return false;
    }
    state.player.vel.y = state.tuning.jump_velocity;
    state.player.jump_count = state.player.jump_count.saturating_add(1);
    state.player.on_ground = false;
    let feet = state.player.feet();
    state.spawn_particles(feet, COLOR_JUMP_DUST, 10);
    state.events.push(GameEvent::Jumped);
    true
}

/// Releasing jump early cuts the ascent short
pub fn release_jump(player: &mut Player, cut_velocity: f32) {
    if player.vel.y < cut_velocity {
        player.vel.y = cut_velocity;
    }
}

/// Fire a bullet from the player's center if the cooldown allows
pub fn try_shoot(state: &mut GameState) -> bool {
    if state.run.shoot_cooldown > 0 {
        return false;
    }
    state.run.shoot_cooldown = state.tuning.shoot_cooldown_frames;
    state.bullets.push(Bullet {
        pos: state.player.center(),
        vel_x: state.player.facing.sign() * state.tuning.bullet_speed,
        radius: state.tuning.bullet_radius,
        color: COLOR_BULLET,
    });
    state.events.push(GameEvent::ShotFired);
    true
}

/// Move bullets, cull the ones a screen away from the camera, and resolve
/// hits: each bullet destroys at most one enemy and is consumed with it
pub fn update_bullets(state: &mut GameState) {
    let camera_x = state.run.camera_x;
    let cull_distance = state.tuning.display_width;
    let enemies = &mut state.enemies;
    let mut kills: Vec<Vec2> = Vec::new();

    state.bullets.retain_mut(|bullet| {
        bullet.pos.x += bullet.vel_x;
        if (bullet.pos.x - camera_x).abs() > cull_distance {
            return false;
        }
        match find_enemy_hit(enemies, bullet) {
            Some(idx) => {
                let enemy = enemies.remove(idx);
                kills.push(enemy.rect().center());
                false
            }
            None => true,
        }
    });

    for at in kills {
        state.run.score += ENEMY_KILL_SCORE;
        state.spawn_particles(at, COLOR_ENEMY_BURST, 15);
        state.events.push(GameEvent::EnemyDestroyed { pos: at });
        log::debug!("Enemy destroyed at ({:.0}, {:.0})", at.x, at.y);
    }
}

/// Age particles and drop the dead ones
pub fn update_particles(state: &mut GameState) {
    state.particles.retain_mut(|p| {
        p.pos += p.vel;
        p.life -= PARTICLE_DECAY;
        p.life > 0.0
    });
}
