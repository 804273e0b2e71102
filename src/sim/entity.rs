//! Coins, power-ups and birds
//!
//! Each entity advances its own animation/motion and exposes the box used for
//! collision. Collected flags only ever go from false to true.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::levels::{BirdSpawn, PowerUpSpawn};

/// Timing and view information handed to entities each step
#[derive(Debug, Clone, Copy)]
pub struct EntityClock {
    /// Reference frames elapsed this step
    pub frames: f32,
    /// Level clock in seconds
    pub time: f32,
    /// Camera view in world coordinates
    pub view: Rect,
}

/// Shared behavior of moving/animated entities
pub trait Entity {
    /// Advance motion and animation by one step
    fn advance(&mut self, clock: &EntityClock);

    /// Collision box in world coordinates
    fn bounds(&self) -> Rect;
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// One extra airborne jump
    DoubleJump,
    /// Absorbs a single hazard or enemy hit
    Shield,
    /// Nearby coins drift toward the player
    Magnet,
}

impl PowerUpKind {
    /// Glow color for the renderer (0xRRGGBB)
    pub fn color(self) -> u32 {
        match self {
            PowerUpKind::DoubleJump => 0x00ffff,
            PowerUpKind::Shield => 0xffff00,
            PowerUpKind::Magnet => 0xff00ff,
        }
    }
}

pub const COIN_SIZE: f32 = 25.0;
pub const POWER_UP_SIZE: f32 = 30.0;
pub const BIRD_WIDTH: f32 = 40.0;
pub const BIRD_HEIGHT: f32 = 30.0;

/// A collectible coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    /// Top-left corner (moves only under the magnet effect)
    pub pos: Vec2,
    pub collected: bool,
    /// Vertical bob, recomputed from the level clock
    pub bob: f32,
    /// Spin angle (cosmetic)
    pub spin: f32,
}

impl Coin {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            collected: false,
            bob: 0.0,
            spin: 0.0,
        }
    }

    /// Mark collected; returns false if it already was
    pub fn collect(&mut self) -> bool {
        !std::mem::replace(&mut self.collected, true)
    }

    /// Move `pull` of the way toward `target` (a center point)
    pub fn drift_toward(&mut self, target: Vec2, pull: f32) {
        let center = self.pos + Vec2::splat(COIN_SIZE / 2.0);
        self.pos += (target - center) * pull;
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(COIN_SIZE / 2.0)
    }
}

impl Entity for Coin {
    fn advance(&mut self, clock: &EntityClock) {
        self.spin += 0.1 * clock.frames;
        self.bob = (clock.time * 1000.0 / 300.0).sin() * 5.0;
    }

    fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y + self.bob, COIN_SIZE, COIN_SIZE)
    }
}

/// A collectible power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub kind: PowerUpKind,
    pub collected: bool,
    pub bob: f32,
    pub spin: f32,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            pos,
            kind,
            collected: false,
            bob: 0.0,
            spin: 0.0,
        }
    }

    /// Mark collected; returns false if it already was
    pub fn collect(&mut self) -> bool {
        !std::mem::replace(&mut self.collected, true)
    }
}

impl From<&PowerUpSpawn> for PowerUp {
    fn from(spawn: &PowerUpSpawn) -> Self {
        Self::new(spawn.pos, spawn.kind)
    }
}

impl Entity for PowerUp {
    fn advance(&mut self, clock: &EntityClock) {
        self.spin += 0.05 * clock.frames;
        self.bob = (clock.time * 1000.0 / 200.0).sin() * 8.0;
    }

    fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y + self.bob, POWER_UP_SIZE, POWER_UP_SIZE)
    }
}

/// A bird enemy flying right to left in a sine wave
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    pub pos: Vec2,
    /// Baseline of the vertical oscillation
    pub base_y: f32,
    /// Leftward speed per reference frame
    pub speed: f32,
    pub amplitude: f32,
    /// Oscillation phase (radians)
    pub phase: f32,
    /// Wing animation phase (cosmetic)
    pub wing_flap: f32,
}

impl Bird {
    /// Distance past the camera's left edge before a bird wraps
    pub const WRAP_MARGIN: f32 = 100.0;
    /// Distance past the camera's right edge where a wrapped bird reappears
    pub const REENTRY_OFFSET: f32 = 200.0;

    pub fn new(pos: Vec2, speed: f32, amplitude: f32) -> Self {
        Self {
            pos,
            base_y: pos.y,
            speed,
            amplitude,
            phase: 0.0,
            wing_flap: 0.0,
        }
    }
}

impl From<&BirdSpawn> for Bird {
    fn from(spawn: &BirdSpawn) -> Self {
        Self::new(spawn.pos, spawn.speed, spawn.amplitude)
    }
}

impl Entity for Bird {
    fn advance(&mut self, clock: &EntityClock) {
        self.pos.x -= self.speed * clock.frames;
        self.phase += 0.05 * clock.frames;
        self.pos.y = self.base_y + self.phase.sin() * self.amplitude;
        self.wing_flap += 0.2 * clock.frames;

        if self.pos.x + BIRD_WIDTH < clock.view.x - Self::WRAP_MARGIN {
            self.pos.x = clock.view.right() + Self::REENTRY_OFFSET;
        }
    }

    fn bounds(&self) -> Rect {
        Rect::at(self.pos, Vec2::new(BIRD_WIDTH, BIRD_HEIGHT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock(time: f32, view_x: f32) -> EntityClock {
        EntityClock {
            frames: 1.0,
            time,
            view: Rect::new(view_x, 0.0, 1280.0, 720.0),
        }
    }

    #[test]
    fn test_coin_collect_is_monotonic() {
        let mut coin = Coin::new(Vec2::new(10.0, 10.0));
        assert!(coin.collect());
        assert!(!coin.collect());
        assert!(coin.collected);
    }

    #[test]
    fn test_coin_bob_offsets_bounds() {
        let mut coin = Coin::new(Vec2::new(100.0, 200.0));
        // sin(t * 10 / 3) peaks at t = 0.15 * pi
        coin.advance(&clock(0.15 * std::f32::consts::PI, 0.0));
        let bounds = coin.bounds();
        assert!((bounds.y - 205.0).abs() < 0.01);
        assert_eq!(bounds.x, 100.0);
        assert_eq!(bounds.width, COIN_SIZE);
        // Position itself is not moved by the bob
        assert_eq!(coin.pos.y, 200.0);
    }

    #[test]
    fn test_magnet_drift_is_exponential() {
        let mut coin = Coin::new(Vec2::new(100.0, 0.0));
        let target = coin.center() + Vec2::new(100.0, 0.0);
        coin.drift_toward(target, 0.1);
        assert!((coin.center().x - (target.x - 90.0)).abs() < 0.001);
        coin.drift_toward(target, 0.1);
        assert!((coin.center().x - (target.x - 81.0)).abs() < 0.001);
    }

    #[test]
    fn test_bird_moves_left_and_oscillates() {
        let mut bird = Bird::new(Vec2::new(800.0, 200.0), 2.0, 30.0);
        for _ in 0..10 {
            bird.advance(&clock(0.0, 0.0));
        }
        assert!((bird.pos.x - 780.0).abs() < 0.001);
        assert!((bird.pos.y - (200.0 + 0.5f32.sin() * 30.0)).abs() < 0.001);
        assert!(bird.pos.y >= 170.0 && bird.pos.y <= 230.0);
    }

    #[test]
    fn test_bird_wraps_to_right_of_view() {
        let mut bird = Bird::new(Vec2::new(463.0, 200.0), 2.0, 30.0);
        // View starts at 600: the bird's right edge (501) is still within the margin
        bird.advance(&clock(0.0, 600.0));
        assert!((bird.pos.x - 461.0).abs() < 0.001);
        // Next step pushes the right edge to 499 < 500
        bird.advance(&clock(0.0, 600.0));
        assert_eq!(bird.pos.x, 600.0 + 1280.0 + Bird::REENTRY_OFFSET);
    }

    #[test]
    fn test_power_up_from_spawn() {
        let spawn = PowerUpSpawn {
            pos: Vec2::new(900.0, 350.0),
            kind: PowerUpKind::DoubleJump,
        };
        let power_up = PowerUp::from(&spawn);
        assert_eq!(power_up.kind, PowerUpKind::DoubleJump);
        assert!(!power_up.collected);
        assert_eq!(power_up.bounds(), Rect::new(900.0, 350.0, 30.0, 30.0));
    }
}
