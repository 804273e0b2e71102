//! Skyhop - an eight-level side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, collisions, per-frame step)
//! - `levels`: Static level catalog
//! - `game`: Progression controller (level flow, lives, completion)
//! - `progress`: Completed levels and best times
//! - `persistence`: Key/value storage backends
//! - `tuning`: Data-driven physics and scoring constants

pub mod error;
pub mod game;
pub mod levels;
pub mod persistence;
pub mod progress;
pub mod sim;
pub mod tuning;

pub use error::{ConfigError, GameError, StorageError};
pub use game::{Game, Phase};
pub use levels::{Level, LevelId};
pub use progress::Progress;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Frame rate the per-frame tuning constants were authored against
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Fixed simulation timestep (one reference frame)
    pub const SIM_DT: f32 = 1.0 / REFERENCE_FPS;
    /// Maximum substeps per update to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Number of levels in the catalog
    pub const LEVEL_COUNT: u8 = 8;
}

/// Convert a step duration in seconds to reference frames
#[inline]
pub fn frames(dt: f32) -> f32 {
    dt * consts::REFERENCE_FPS
}
