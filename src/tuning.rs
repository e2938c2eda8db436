//! Data-driven game balance
//!
//! Every physics constant and level-layout knob the simulation reads. Defaults
//! mirror [`crate::consts`]; a JSON file may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Longest coin row the generator will place
pub const MAX_COINS_PER_ROW: u32 = 8;

/// Level generator parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelLayout {
    /// Number of gap+platform segments after the starting ground
    pub segment_count: u32,
    /// Ground line; elevated platforms never sit below it
    pub baseline_y: f32,
    pub platform_height: f32,
    pub start_platform_width: f32,
    /// Pit width range [min, max)
    pub gap_min: f32,
    pub gap_max: f32,
    /// Platform width range [min, max)
    pub width_min: f32,
    pub width_max: f32,
    /// Elevated platform top range [min, max)
    pub elevated_min: f32,
    pub elevated_max: f32,
    pub elevated_chance: f64,
    /// Every Nth segment (N > 0) holds a checkpoint instead of an enemy
    pub checkpoint_interval: u32,
    pub enemy_chance: f64,
    pub spike_chance: f64,
    pub coin_row_chance: f64,
    pub coins_per_row: u32,
    pub coin_radius: f32,
    pub coin_spacing: f32,
    /// Height of the coin row above the platform top
    pub coin_hover: f32,
    /// Shield powerup placement
    pub powerup_x: f32,
    pub powerup_y: f32,
    pub powerup_size: f32,
    /// Finish volume sits this far past the last segment
    pub finish_offset: f32,
    pub landing_platform_width: f32,
}

impl Default for LevelLayout {
    fn default() -> Self {
        Self {
            segment_count: 30,
            baseline_y: 450.0,
            platform_height: 50.0,
            start_platform_width: 800.0,
            gap_min: 150.0,
            gap_max: 250.0,
            width_min: 400.0,
            width_max: 800.0,
            elevated_min: 350.0,
            elevated_max: 450.0,
            elevated_chance: 0.5,
            checkpoint_interval: 6,
            enemy_chance: 0.8,
            spike_chance: 0.6,
            coin_row_chance: 0.5,
            coins_per_row: 3,
            coin_radius: 10.0,
            coin_spacing: 40.0,
            coin_hover: 90.0,
            powerup_x: 2000.0,
            powerup_y: 410.0,
            powerup_size: 20.0,
            finish_offset: 200.0,
            landing_platform_width: 500.0,
        }
    }
}

/// Physics and gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub display_width: f32,
    pub display_height: f32,
    pub gravity: f32,
    pub fall_margin: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub player_speed: f32,
    pub player_acceleration: f32,
    pub player_friction: f32,
    pub max_jumps: u8,
    pub jump_velocity: f32,
    pub jump_cut_velocity: f32,

    // === Combat ===
    pub bullet_speed: f32,
    pub bullet_radius: f32,
    pub shoot_cooldown_frames: u32,
    pub shield_duration_frames: u32,
    pub shield_knockback: f32,

    pub layout: LevelLayout,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            display_width: DISPLAY_WIDTH,
            display_height: DISPLAY_HEIGHT,
            gravity: GRAVITY,
            fall_margin: FALL_MARGIN,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_speed: PLAYER_SPEED,
            player_acceleration: PLAYER_ACCELERATION,
            player_friction: PLAYER_FRICTION,
            max_jumps: MAX_JUMPS,
            jump_velocity: JUMP_VELOCITY,
            jump_cut_velocity: JUMP_CUT_VELOCITY,

            bullet_speed: BULLET_SPEED,
            bullet_radius: BULLET_RADIUS,
            shoot_cooldown_frames: SHOOT_COOLDOWN_FRAMES,
            shield_duration_frames: SHIELD_DURATION_FRAMES,
            shield_knockback: SHIELD_KNOCKBACK,

            layout: LevelLayout::default(),
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    /// Pull counts back into the range the simulation supports
    pub fn sanitized(mut self) -> Self {
        if self.max_jumps == 0 {
            log::warn!("max_jumps must be at least 1; using 1");
            self.max_jumps = 1;
        }
        if self.layout.coins_per_row > MAX_COINS_PER_ROW {
            log::warn!(
                "coins_per_row {} too large; using {}",
                self.layout.coins_per_row,
                MAX_COINS_PER_ROW
            );
            self.layout.coins_per_row = MAX_COINS_PER_ROW;
        }
        self
    }

    /// Load tuning from a JSON file, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read tuning {}: {} - using defaults", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Y coordinate past which a falling player is lost
    pub fn death_line(&self) -> f32 {
        self.display_height + self.fall_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{"gravity": 0.8, "layout": {"segment_count": 5}}"#)
            .expect("valid json");
        assert_eq!(tuning.gravity, 0.8);
        assert_eq!(tuning.layout.segment_count, 5);
        assert_eq!(tuning.player_speed, PLAYER_SPEED);
        assert_eq!(tuning.layout.gap_min, 150.0);
    }

    #[test]
    fn test_out_of_range_counts_are_clamped() {
        let tuning = Tuning::from_json(r#"{"max_jumps": 0, "layout": {"coins_per_row": 5000}}"#)
            .expect("valid json");
        assert_eq!(tuning.max_jumps, 1);
        assert_eq!(tuning.layout.coins_per_row, MAX_COINS_PER_ROW);

        let tuning = Tuning::from_json(r#"{"max_jumps": 3, "layout": {"coins_per_row": 0}}"#)
            .expect("valid json");
        assert_eq!(tuning.max_jumps, 3);
        assert_eq!(tuning.layout.coins_per_row, 0);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Tuning::from_json("{ gravity: nope").is_err());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let tuning = Tuning::load_or_default(Path::new("/nonexistent/pit-runner/tuning.json"));
        assert_eq!(tuning, Tuning::default());
    }

    #[test]
    fn test_death_line() {
        assert_eq!(Tuning::default().death_line(), 700.0);
    }
}
