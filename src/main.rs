//! Pit Runner headless driver
//!
//! Runs the simulation without a window: an autopilot stands in for the
//! player, a silent backend stands in for audio, and the final run summary is
//! printed as JSON.

use std::path::PathBuf;

use clap::Parser;

use pit_runner::audio::{AudioManager, SilentBackend};
use pit_runner::consts::SIM_DT;
use pit_runner::sim::{FrameClock, GameEvent, GamePhase, GameState, Snapshot, TickInput, tick};
use pit_runner::{QualityPreset, Settings, Tuning};

/// Give up after this many deaths
const MAX_RETRIES: u32 = 25;

/// Run one level headless and print the outcome as JSON
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seed for level generation; random when omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many simulation frames
    #[arg(long, default_value_t = 18_000, value_parser = clap::value_parser!(u32).range(1..))]
    frames: u32,
    /// JSON file overriding the game tuning
    #[arg(long, value_name = "FILE")]
    tuning: Option<PathBuf>,
    /// JSON file with quality and audio settings
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,
    /// Quality preset (low, medium, high); overrides the settings file
    #[arg(long, value_parser = parse_quality)]
    quality: Option<QualityPreset>,
}

fn parse_quality(name: &str) -> Result<QualityPreset, String> {
    QualityPreset::from_name(name).ok_or_else(|| format!("unknown quality preset '{}'", name))
}

/// Decide this frame's input from what the player can see
fn autopilot(view: &Snapshot<'_>) -> TickInput {
    let mut input = TickInput::default();
    if view.phase == GamePhase::Menu {
        input.start = true;
        return input;
    }
    if view.phase.is_terminal() {
        input.restart = view.phase == GamePhase::GameOver;
        return input;
    }

    let player = view.player;
    let rect = player.rect();
    input.right = true;

    // Platform currently underfoot (or last one we were over)
    let support = view
        .platforms
        .iter()
        .find(|p| rect.overlaps_x(&p.rect) && (p.rect.y - rect.bottom()).abs() < 1.0);

    let near_edge = support.is_some_and(|p| rect.right() + 25.0 > p.rect.right());
    let spike_ahead = view.spikes.iter().any(|s| {
        let dx = s.anchor.x - rect.right();
        (0.0..40.0).contains(&dx) && (s.anchor.y - rect.bottom()).abs() < 1.0
    });
    let enemy_ahead = view.enemies.iter().find(|e| {
        let dx = e.pos.x - rect.right();
        (0.0..350.0).contains(&dx) && e.pos.y < rect.bottom() && e.pos.y + e.size.y > rect.y
    });

    if player.on_ground && (near_edge || spike_ahead) {
        input.jump = true;
    } else if !player.on_ground && player.vel.y > 2.0 && player.jump_count < player.max_jumps {
        // Falling into a pit: spend the air jump
        let ground_below = view
            .platforms
            .iter()
            .any(|p| rect.overlaps_x(&p.rect) && p.rect.y >= rect.bottom());
        input.jump = !ground_below;
    }
    input.shoot = enemy_ahead.is_some();
    input
}

fn main() {
    env_logger::init();
    log::info!("Pit Runner (headless) starting...");

    let opts = Cli::parse();
    let tuning = opts
        .tuning
        .as_deref()
        .map(Tuning::load_or_default)
        .unwrap_or_default();
    let mut settings = opts
        .settings
        .as_deref()
        .map(Settings::load_or_default)
        .unwrap_or_default();
    if let Some(quality) = opts.quality {
        settings.quality = quality;
    }
    log::info!(
        "Quality {} ({} particles max)",
        settings.quality.as_str(),
        settings.max_particles()
    );

    let mut state = match opts.seed {
        Some(seed) => {
            log::info!("Using seed {}", seed);
            GameState::with_seed(tuning, &settings, seed)
        }
        None => GameState::new(tuning, &settings),
    };
    let mut audio = AudioManager::new(SilentBackend, &settings);
    let mut clock = FrameClock::new();

    let mut deaths = 0u32;
    let mut frames = 0u32;
    'run: while frames < opts.frames {
        // A steady 60 Hz display: one step per refresh
        for _ in 0..clock.advance(SIM_DT) {
            let input = autopilot(&state.snapshot());
            tick(&mut state, &input);
            frames += 1;

            let events = state.drain_events();
            audio.handle_events(&events);
            for event in &events {
                match event {
                    GameEvent::PlayerDied => {
                        deaths += 1;
                        if deaths > MAX_RETRIES {
                            log::warn!("Out of retries");
                            break 'run;
                        }
                    }
                    GameEvent::LevelComplete { score } => {
                        log::info!("Finished with score {} after {} deaths", score, deaths);
                        break 'run;
                    }
                    _ => {}
                }
            }
        }
    }

    let view = state.snapshot();
    let summary = serde_json::json!({
        "phase": view.phase,
        "score": view.run.score,
        "frames": frames,
        "deaths": deaths,
        "player_x": view.player.pos.x,
        "finish_x": view.finish.x,
        "coins_left": view.coins_remaining(),
        "enemies_left": view.enemies.len(),
    });
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not serialize summary: {}", e),
    }
}
