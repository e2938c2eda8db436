//! Per-frame simulation step
//!
//! One call to [`tick`] advances the game by one display refresh. Discrete
//! actions (start, restart, jump, shoot) resolve first, then the playing-phase
//! pipeline runs in a fixed order.

use super::collision::{touches_coin, touches_enemy, touches_spike};
use super::phase::{PhaseAction, Transition};
use super::physics::{
    release_jump, try_jump, try_shoot, update_bullets, update_enemies, update_particles,
    update_player,
};
use super::state::{GameEvent, GameState, PowerupKind};
use crate::consts::*;

/// Input commands for a single tick
///
/// `left`/`right` are held flags. The rest are one-shot triggers the adapter
/// clears after each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Jump button let go (cuts a rising jump short)
    pub jump_released: bool,
    pub shoot: bool,
    pub start: bool,
    pub restart: bool,
}

impl TickInput {
    /// Drop one-shot triggers, keep held directions
    pub fn clear_triggers(&mut self) {
        *self = TickInput {
            left: self.left,
            right: self.right,
            ..TickInput::default()
        };
    }
}

/// Feed `action` to the phase machine and apply the world reset it asks for
///
/// Returns false when the action is not legal in the current phase.
pub fn dispatch(state: &mut GameState, action: PhaseAction) -> bool {
    let Some((next, transition)) = state.phase.apply(action) else {
        return false;
    };
    log::info!("Phase {:?} -> {:?} ({:?})", state.phase, next, action);
    state.phase = next;

    match transition {
        Transition::FullReset => state.full_reset(),
        Transition::Respawn => {
            state.respawn();
            state.events.push(GameEvent::Respawned);
        }
        Transition::Enter => {}
    }

    match action {
        PhaseAction::Start => state.events.push(GameEvent::MusicStarted),
        PhaseAction::Died => state.events.push(GameEvent::PlayerDied),
        PhaseAction::ReachedFinish => state.events.push(GameEvent::LevelComplete {
            score: state.run.score,
        }),
        PhaseAction::Restart => {}
    }
    true
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    if input.start {
        dispatch(state, PhaseAction::Start);
    }
    if input.restart {
        dispatch(state, PhaseAction::Restart);
    }

    if !state.phase.is_playing() {
        return;
    }

    if input.jump {
        try_jump(state);
    }
    if input.jump_released {
        release_jump(&mut state.player, state.tuning.jump_cut_velocity);
    }
    if input.shoot {
        try_shoot(state);
    }

    state.time_ticks += 1;

    update_player(state, input);
    update_enemies(state);
    collect_coins(state);
    update_powerups(state);
    update_bullets(state);
    update_particles(state);
    check_enemy_contact(state);
    check_spikes(state);
}

/// Award untaken coins the player touches
pub fn collect_coins(state: &mut GameState) {
    let player = state.player.rect();
    let mut collected = Vec::new();
    for coin in state.coins.iter_mut().filter(|c| !c.taken) {
        if touches_coin(&player, coin) {
            coin.taken = true;
            collected.push(coin.pos);
        }
    }
    for pos in collected {
        state.run.score += COIN_SCORE;
        state.spawn_particles(pos, COLOR_COIN_SPARKLE, 10);
        state.events.push(GameEvent::CoinCollected { pos });
    }
}

/// Pick up powerups, then count the shield down
pub fn update_powerups(state: &mut GameState) {
    let player = state.player.rect();
    for powerup in state.powerups.iter_mut().filter(|p| !p.taken) {
        if player.overlaps(&powerup.rect()) {
            powerup.taken = true;
            match powerup.kind {
                PowerupKind::Shield => {
                    state.run.shield = true;
                    state.run.shield_frames = state.tuning.shield_duration_frames;
                    state.events.push(GameEvent::ShieldGained);
                    log::debug!("Shield up for {} frames", state.run.shield_frames);
                }
            }
        }
    }

    if state.run.shield {
        state.run.shield_frames = state.run.shield_frames.saturating_sub(1);
        if state.run.shield_frames == 0 {
            state.run.drop_shield();
            state.events.push(GameEvent::ShieldExpired);
        }
    }
}

/// Enemy contact breaks an active shield (shoving the enemy away) or kills
pub fn check_enemy_contact(state: &mut GameState) {
    let player = state.player.rect();
    let knockback = state.tuning.shield_knockback;
    let mut died = false;
    for enemy in state.enemies.iter_mut() {
        if !touches_enemy(&player, enemy) {
            continue;
        }
        if state.run.shield {
            state.run.drop_shield();
            enemy.pos.x += knockback;
            state.events.push(GameEvent::ShieldBroken);
            log::debug!("Shield absorbed a hit");
        } else {
            died = true;
        }
    }
    if died {
        dispatch(state, PhaseAction::Died);
    }
}

pub fn check_spikes(state: &mut GameState) {
    let player = state.player.rect();
    if state.spikes.iter().any(|s| touches_spike(&player, s)) {
        dispatch(state, PhaseAction::Died);
    }
}
