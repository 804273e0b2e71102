//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (level data order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod entity;
pub mod state;
pub mod tick;

pub use autopilot::autopilot;
pub use collision::{Rect, overlaps};
pub use entity::{Bird, Coin, Entity, EntityClock, PowerUp, PowerUpKind};
pub use state::{Camera, Contact, DeathCause, GameEvent, GameState, Look, Player, PowerUps};
pub use tick::{StepInput, StepOutcome, step};
