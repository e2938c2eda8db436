//! Frame invariants checked over random inputs

use glam::Vec2;
use pit_runner::sim::collision::resolve_platforms;
use pit_runner::sim::physics::integrate_player;
use pit_runner::sim::{GameState, Platform, Player, TickInput, tick};
use pit_runner::{Settings, Tuning};
use proptest::prelude::*;

fn input_strategy() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(left, right, jump, jump_released, shoot)| TickInput {
            left,
            right,
            jump,
            jump_released,
            shoot,
            ..Default::default()
        },
    )
}

fn started(seed: u64) -> GameState {
    let mut state = GameState::with_seed(Tuning::default(), &Settings::default(), seed);
    tick(
        &mut state,
        &TickInput {
            start: true,
            ..Default::default()
        },
    );
    state
}

proptest! {
    #[test]
    fn speed_cap_holds(vx in -50.0f32..50.0, steps in prop::collection::vec((any::<bool>(), any::<bool>()), 1..60)) {
        let mut player = Player::new(&Tuning::default(), Vec2::ZERO);
        player.vel.x = vx;
        for (left, right) in steps {
            integrate_player(&mut player, left, right, 0.5);
            prop_assert!(player.vel.x.abs() <= player.speed);
        }
    }

    #[test]
    fn rising_player_never_lands(x in 0.0f32..700.0, bottom in 451.0f32..500.0, dy in -20.0f32..-0.01) {
        let platforms = [Platform::new(0.0, 450.0, 800.0, 50.0)];
        let mut player = Player::new(&Tuning::default(), Vec2::new(x, bottom - 75.0));
        player.vel.y = dy;
        player.jump_count = 1;
        prop_assert!(!resolve_platforms(&mut player, &platforms));
        prop_assert_eq!(player.pos.y, bottom - 75.0);
        prop_assert_eq!(player.jump_count, 1);
    }

    #[test]
    fn progress_is_monotonic(seed in any::<u64>(), inputs in prop::collection::vec(input_strategy(), 1..400)) {
        let mut state = started(seed);
        let mut score = state.run.score;
        for input in &inputs {
            let triggered: Vec<bool> = state.checkpoints.iter().map(|c| c.triggered).collect();
            let taken: Vec<bool> = state.coins.iter().map(|c| c.taken).collect();

            tick(&mut state, input);

            prop_assert!(state.player.jump_count <= state.player.max_jumps);
            prop_assert!(state.player.vel.x.abs() <= state.player.speed);
            prop_assert!(state.run.score >= score);
            score = state.run.score;
            for (before, cp) in triggered.iter().zip(&state.checkpoints) {
                prop_assert!(!before || cp.triggered);
            }
            for (before, coin) in taken.iter().zip(&state.coins) {
                prop_assert!(!before || coin.taken);
            }
            if !state.phase.is_playing() {
                break;
            }
        }
    }
}
