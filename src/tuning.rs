//! Data-driven game balance
//!
//! Every physics constant is expressed per reference frame (60 Hz). The
//! simulation scales them by the real step length, so a 1/60 s step plays
//! exactly as authored.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Physics, scoring and pacing constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player physics (per frame) ===
    /// Downward acceleration added to vertical velocity each frame
    pub gravity: f32,
    /// Gravity multiplier on low-gravity levels
    pub low_gravity_factor: f32,
    /// Horizontal velocity multiplier applied each frame without input
    pub friction: f32,
    /// Horizontal run speed
    pub run_speed: f32,
    /// Vertical velocity set by a jump
    pub jump_power: f32,
    /// Player box width
    pub player_width: f32,
    /// Player box height
    pub player_height: f32,

    // === Lives and scoring ===
    pub max_lives: u8,
    /// Base points per coin
    pub coin_value: u64,
    /// Extra points per combo step once the combo exceeds one
    pub combo_step: u64,
    /// Flat points per power-up
    pub power_up_value: u64,
    /// Seconds under which a completion earns a time bonus
    pub time_bonus_base: u32,
    /// Points per max-combo awarded on completion
    pub combo_bonus: u64,

    // === Power-ups ===
    /// Coins closer than this (center to center) drift toward a magnetized player
    pub magnet_radius: f32,
    /// Fraction of the remaining distance a magnetized coin covers per frame
    pub magnet_pull: f32,

    // === Progression ===
    /// Fraction of the goal's x-coordinate that arms the checkpoint
    pub checkpoint_fraction: f32,
    /// Seconds between a completion and the automatic start of the next level
    pub advance_delay: f32,

    // === World ===
    /// Lowest playable y-coordinate
    pub world_height: f32,
    /// Distance past the playable bound that counts as falling off
    pub fall_margin: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.6,
            low_gravity_factor: 0.5,
            friction: 0.8,
            run_speed: 5.0,
            jump_power: 15.0,
            player_width: 30.0,
            player_height: 30.0,

            max_lives: 3,
            coin_value: 10,
            combo_step: 5,
            power_up_value: 50,
            time_bonus_base: 100,
            combo_bonus: 10,

            magnet_radius: 150.0,
            magnet_pull: 0.1,

            checkpoint_fraction: 0.5,
            advance_delay: 2.5,

            world_height: 600.0,
            fall_margin: 100.0,
            viewport_width: 1280.0,
            viewport_height: 720.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load tuning from a JSON file, falling back to defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No tuning file at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Points for collecting a coin at the given (already incremented) combo
    pub fn coin_points(&self, combo: u32) -> u64 {
        let bonus = if combo > 1 { combo as u64 * self.combo_step } else { 0 };
        self.coin_value + bonus
    }

    /// Completion bonus for finishing in `seconds`
    pub fn time_bonus(&self, seconds: u32) -> u64 {
        self.time_bonus_base.saturating_sub(seconds) as u64
    }
}
