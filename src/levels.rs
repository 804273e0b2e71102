//! Level catalog
//!
//! Eight hand-authored levels in world coordinates. The catalog is static and
//! never mutated: moving platforms derive their position from the level clock
//! and the base descriptor.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{LEVEL_COUNT, REFERENCE_FPS};
use crate::error::GameError;
use crate::sim::collision::Rect;
use crate::sim::entity::PowerUpKind;

/// A validated level number (1-8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LevelId(u8);

impl LevelId {
    pub const FIRST: LevelId = LevelId(1);
    pub const LAST: LevelId = LevelId(LEVEL_COUNT);

    pub fn new(number: u8) -> Option<Self> {
        (1..=LEVEL_COUNT).contains(&number).then_some(Self(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// The following level, or None after the final one
    pub fn next(self) -> Option<Self> {
        Self::new(self.0 + 1)
    }

    /// The preceding level, or None for the first one
    pub fn prev(self) -> Option<Self> {
        Self::new(self.0.checked_sub(1)?)
    }

    /// All level ids in order
    pub fn all() -> impl Iterator<Item = LevelId> {
        (1..=LEVEL_COUNT).map(LevelId)
    }
}

impl TryFrom<u8> for LevelId {
    type Error = GameError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::new(number).ok_or(GameError::InvalidLevel(number))
    }
}

impl From<LevelId> for u8 {
    fn from(id: LevelId) -> u8 {
        id.0
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How gravity behaves on a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GravityMode {
    Normal,
    /// Gravity at a reduced magnitude
    Low,
    /// Gravity and jumps point toward decreasing y
    Reverse,
}

impl GravityMode {
    pub fn is_inverted(self) -> bool {
        self == GravityMode::Reverse
    }
}

/// Cosmetic weather tag consumed by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weather {
    None,
    Rain,
    Snow,
    Rainbow,
}

/// Background description for the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backdrop {
    /// Image asset name
    pub image: &'static str,
    /// Optional tint laid over the image (0xRRGGBB)
    pub tint: Option<u32>,
    /// Flat color drawn until the image has loaded
    pub fallback_color: u32,
    /// Default platform color
    pub ground_color: u32,
}

impl Backdrop {
    const fn new(image: &'static str, ground_color: u32) -> Self {
        Self {
            image,
            tint: None,
            fallback_color: 0x87ceeb,
            ground_color,
        }
    }

    const fn tinted(self, tint: u32) -> Self {
        Self {
            tint: Some(tint),
            ..self
        }
    }
}

/// Horizontal oscillation of a platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// Total horizontal travel (peak to peak)
    pub range: f32,
    /// Peak speed in pixels per reference frame
    pub speed: f32,
}

impl Motion {
    /// Horizontal displacement from the base position at level time `t` (seconds)
    pub fn offset(&self, t: f32) -> f32 {
        let amplitude = self.range / 2.0;
        if amplitude <= 0.0 {
            return 0.0;
        }
        let omega = self.speed * REFERENCE_FPS / amplitude;
        amplitude * (omega * t).sin()
    }
}

/// A solid platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Platform {
    /// Base rectangle (position at t = 0)
    pub rect: Rect,
    pub motion: Option<Motion>,
    /// Color override (0xRRGGBB)
    pub color: Option<u32>,
}

impl Platform {
    const fn fixed(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            motion: None,
            color: None,
        }
    }

    const fn moving(self, range: f32, speed: f32) -> Self {
        Self {
            motion: Some(Motion { range, speed }),
            ..self
        }
    }

    const fn colored(self, color: u32) -> Self {
        Self {
            color: Some(color),
            ..self
        }
    }

    /// Platform rectangle at level time `t`
    pub fn rect_at(&self, t: f32) -> Rect {
        match self.motion {
            Some(motion) => Rect {
                x: self.rect.x + motion.offset(t),
                ..self.rect
            },
            None => self.rect,
        }
    }
}

/// Placement of a power-up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerUpSpawn {
    pub pos: Vec2,
    pub kind: PowerUpKind,
}

/// Placement of a bird enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirdSpawn {
    pub pos: Vec2,
    /// Leftward speed in pixels per reference frame
    pub speed: f32,
    /// Vertical oscillation amplitude
    pub amplitude: f32,
}

/// An immutable level description
#[derive(Debug)]
pub struct Level {
    pub id: LevelId,
    pub name: &'static str,
    pub gravity: GravityMode,
    pub weather: Weather,
    pub backdrop: Backdrop,
    pub platforms: &'static [Platform],
    /// Spikes
    pub hazards: &'static [Rect],
    pub power_ups: &'static [PowerUpSpawn],
    pub birds: &'static [BirdSpawn],
    pub goal: Rect,
    pub spawn: Vec2,
}

impl Level {
    /// Look up a level by id
    pub fn get(id: LevelId) -> &'static Level {
        &LEVELS[(id.number() - 1) as usize]
    }

    /// Look up a level by raw number
    pub fn by_number(number: u8) -> Result<&'static Level, GameError> {
        Ok(Self::get(LevelId::try_from(number)?))
    }

    /// Platform rectangles at level time `t`
    pub fn platforms_at(&self, t: f32) -> impl Iterator<Item = Rect> + '_ {
        self.platforms.iter().map(move |p| p.rect_at(t))
    }

    /// Where a player of `size` should stand to respawn near `x`
    ///
    /// Picks the platform under `x` (topmost, or bottommost when gravity is
    /// inverted), else the horizontally nearest platform with `x` clamped
    /// onto it. The returned position rests on the gravity-favored side.
    pub fn standing_point(&self, x: f32, t: f32, size: Vec2) -> Vec2 {
        let inverted = self.gravity.is_inverted();
        let feet = x + size.x / 2.0;

        let under = self
            .platforms_at(t)
            .filter(|p| feet > p.x && feet < p.right())
            .reduce(|best, p| {
                let better = if inverted {
                    p.bottom() > best.bottom()
                } else {
                    p.y < best.y
                };
                if better { p } else { best }
            });

        let (platform, x) = match under {
            Some(p) => (p, x),
            None => {
                let distance = |p: &Rect| (p.center().x - feet).abs();
                let Some(nearest) = self
                    .platforms_at(t)
                    .min_by(|a, b| distance(a).total_cmp(&distance(b)))
                else {
                    return self.spawn;
                };
                let max_x = (nearest.right() - size.x).max(nearest.x);
                (nearest, x.clamp(nearest.x, max_x))
            }
        };

        if inverted {
            Vec2::new(x, platform.bottom())
        } else {
            Vec2::new(x, platform.y - size.y)
        }
    }
}

const fn spike(x: f32, y: f32) -> Rect {
    Rect::new(x, y, 40.0, 15.0)
}

const fn goal(x: f32, y: f32) -> Rect {
    Rect::new(x, y, 50.0, 50.0)
}

const fn power_up(x: f32, y: f32, kind: PowerUpKind) -> PowerUpSpawn {
    PowerUpSpawn {
        pos: Vec2::new(x, y),
        kind,
    }
}

const fn bird(x: f32, y: f32, speed: f32, amplitude: f32) -> BirdSpawn {
    BirdSpawn {
        pos: Vec2::new(x, y),
        speed,
        amplitude,
    }
}

/// Platform height used by every level
const H: f32 = 25.0;

use PowerUpKind::{DoubleJump, Magnet, Shield};

static LEVELS: [Level; LEVEL_COUNT as usize] = [
    Level {
        id: LevelId(1),
        name: "Green Fields",
        gravity: GravityMode::Normal,
        weather: Weather::None,
        backdrop: Backdrop::new("bg1.jpg", 0x22c55e),
        platforms: &[
            Platform::fixed(0.0, 500.0, 400.0, H),
            Platform::fixed(500.0, 450.0, 200.0, H),
            Platform::fixed(800.0, 400.0, 200.0, H),
            Platform::fixed(1100.0, 350.0, 200.0, H),
            Platform::fixed(1400.0, 300.0, 180.0, H),
            Platform::fixed(1680.0, 250.0, 200.0, H),
            Platform::fixed(1980.0, 300.0, 200.0, H),
            Platform::fixed(2280.0, 250.0, 250.0, H),
        ],
        hazards: &[spike(450.0, 485.0), spike(1050.0, 385.0), spike(1630.0, 285.0)],
        power_ups: &[power_up(900.0, 350.0, DoubleJump)],
        birds: &[],
        goal: goal(2450.0, 200.0),
        spawn: Vec2::new(50.0, 400.0),
    },
    Level {
        id: LevelId(2),
        name: "Desert Valley",
        gravity: GravityMode::Normal,
        weather: Weather::None,
        backdrop: Backdrop::new("bg2.jpg", 0xe6a23c),
        platforms: &[
            Platform::fixed(0.0, 520.0, 300.0, H),
            Platform::fixed(400.0, 480.0, 130.0, H),
            Platform::fixed(620.0, 430.0, 130.0, H),
            Platform::fixed(840.0, 380.0, 140.0, H),
            Platform::fixed(650.0, 330.0, 130.0, H),
            Platform::fixed(870.0, 280.0, 130.0, H),
            Platform::fixed(1080.0, 340.0, 140.0, H),
            Platform::fixed(1300.0, 290.0, 130.0, H),
            Platform::fixed(1520.0, 350.0, 150.0, H),
            Platform::fixed(1750.0, 300.0, 140.0, H),
            Platform::fixed(1980.0, 250.0, 150.0, H),
            Platform::fixed(2220.0, 320.0, 150.0, H),
            Platform::fixed(2450.0, 270.0, 200.0, H),
        ],
        hazards: &[
            spike(350.0, 505.0),
            spike(570.0, 465.0),
            spike(790.0, 415.0),
            spike(1030.0, 375.0),
            spike(1470.0, 335.0),
            spike(1930.0, 285.0),
        ],
        power_ups: &[power_up(750.0, 280.0, Shield)],
        birds: &[
            bird(800.0, 200.0, 2.0, 30.0),
            bird(1400.0, 150.0, 2.5, 40.0),
            bird(2000.0, 180.0, 2.0, 35.0),
            bird(2600.0, 160.0, 2.2, 25.0),
        ],
        goal: goal(2600.0, 220.0),
        spawn: Vec2::new(50.0, 420.0),
    },
    Level {
        id: LevelId(3),
        name: "Purple Mountains",
        gravity: GravityMode::Normal,
        weather: Weather::None,
        backdrop: Backdrop::new("bg3.jpg", 0xa855f7),
        platforms: &[
            Platform::fixed(0.0, 520.0, 250.0, H),
            Platform::fixed(330.0, 470.0, 110.0, H),
            Platform::fixed(520.0, 420.0, 110.0, H),
            Platform::fixed(330.0, 370.0, 110.0, H),
            Platform::fixed(520.0, 320.0, 110.0, H),
            Platform::fixed(710.0, 270.0, 120.0, H),
            Platform::fixed(910.0, 330.0, 110.0, H),
            Platform::fixed(1100.0, 280.0, 110.0, H),
            Platform::fixed(910.0, 230.0, 110.0, H),
            Platform::fixed(1100.0, 180.0, 110.0, H),
            Platform::fixed(1290.0, 240.0, 120.0, H),
            Platform::fixed(1490.0, 300.0, 120.0, H),
            Platform::fixed(1690.0, 250.0, 130.0, H),
            Platform::fixed(1900.0, 310.0, 130.0, H),
            Platform::fixed(2110.0, 260.0, 140.0, H),
            Platform::fixed(2330.0, 210.0, 150.0, H),
            Platform::fixed(2560.0, 270.0, 200.0, H),
        ],
        hazards: &[
            spike(280.0, 505.0),
            spike(470.0, 455.0),
            spike(660.0, 405.0),
            spike(860.0, 355.0),
            spike(1050.0, 315.0),
            spike(1240.0, 265.0),
            spike(1440.0, 285.0),
            spike(1850.0, 295.0),
        ],
        power_ups: &[power_up(1000.0, 230.0, Magnet)],
        birds: &[],
        goal: goal(2700.0, 220.0),
        spawn: Vec2::new(50.0, 420.0),
    },
    Level {
        id: LevelId(4),
        name: "Misty Mountains",
        gravity: GravityMode::Normal,
        weather: Weather::None,
        backdrop: Backdrop::new("bg4.jpg", 0x475569),
        platforms: &[
            Platform::fixed(0.0, 530.0, 200.0, H),
            Platform::fixed(270.0, 490.0, 90.0, H),
            Platform::fixed(430.0, 450.0, 90.0, H),
            Platform::fixed(270.0, 410.0, 90.0, H),
            Platform::fixed(430.0, 370.0, 90.0, H),
            Platform::fixed(590.0, 330.0, 100.0, H),
            Platform::fixed(760.0, 280.0, 90.0, H),
            Platform::fixed(590.0, 240.0, 90.0, H),
            Platform::fixed(760.0, 200.0, 90.0, H),
            Platform::fixed(920.0, 260.0, 100.0, H),
            Platform::fixed(1090.0, 320.0, 100.0, H),
            Platform::fixed(1260.0, 270.0, 90.0, H),
            Platform::fixed(1420.0, 230.0, 90.0, H),
            Platform::fixed(1260.0, 190.0, 90.0, H),
            Platform::fixed(1420.0, 150.0, 90.0, H),
            Platform::fixed(1580.0, 210.0, 100.0, H),
            Platform::fixed(1750.0, 270.0, 110.0, H),
            Platform::fixed(1930.0, 220.0, 100.0, H),
            Platform::fixed(2100.0, 280.0, 110.0, H),
            Platform::fixed(2280.0, 230.0, 110.0, H),
            Platform::fixed(2460.0, 180.0, 120.0, H),
            Platform::fixed(2650.0, 240.0, 150.0, H),
            Platform::fixed(2870.0, 190.0, 200.0, H),
        ],
        hazards: &[
            spike(220.0, 515.0),
            spike(380.0, 475.0),
            spike(540.0, 435.0),
            spike(710.0, 395.0),
            spike(870.0, 355.0),
            spike(1040.0, 315.0),
            spike(1210.0, 275.0),
            spike(1370.0, 255.0),
            spike(1530.0, 215.0),
            spike(1700.0, 255.0),
            spike(2050.0, 305.0),
            spike(2230.0, 255.0),
        ],
        power_ups: &[],
        birds: &[],
        goal: goal(3000.0, 140.0),
        spawn: Vec2::new(50.0, 430.0),
    },
    Level {
        id: LevelId(5),
        name: "Neon City",
        gravity: GravityMode::Low,
        weather: Weather::None,
        backdrop: Backdrop::new("bg1.jpg", 0xff00ff).tinted(0x1a0033),
        platforms: &[
            Platform::fixed(0.0, 540.0, 250.0, H).colored(0x00ffff),
            Platform::fixed(350.0, 480.0, 120.0, H).colored(0xff00ff).moving(150.0, 2.0),
            Platform::fixed(550.0, 420.0, 120.0, H).colored(0xffff00).moving(100.0, 1.5),
            Platform::fixed(750.0, 360.0, 150.0, H).colored(0x00ff00),
            Platform::fixed(1000.0, 300.0, 120.0, H).colored(0xff0000).moving(120.0, 2.5),
            Platform::fixed(1200.0, 360.0, 120.0, H).colored(0x00ffff).moving(80.0, 1.8),
            Platform::fixed(1400.0, 300.0, 150.0, H).colored(0xff00ff),
            Platform::fixed(1650.0, 240.0, 120.0, H).colored(0xffff00).moving(100.0, 2.0),
            Platform::fixed(1850.0, 300.0, 150.0, H).colored(0x00ff00).moving(90.0, 1.5),
            Platform::fixed(2100.0, 240.0, 200.0, H).colored(0xff00ff),
        ],
        hazards: &[
            spike(300.0, 525.0),
            spike(500.0, 465.0),
            spike(700.0, 405.0),
            spike(950.0, 345.0),
        ],
        power_ups: &[power_up(900.0, 250.0, DoubleJump)],
        birds: &[],
        goal: goal(2250.0, 190.0),
        spawn: Vec2::new(50.0, 440.0),
    },
    Level {
        id: LevelId(6),
        name: "Gravity Shift",
        gravity: GravityMode::Reverse,
        weather: Weather::None,
        backdrop: Backdrop::new("bg2.jpg", 0x8b008b).tinted(0x330033),
        // Played hanging under the platforms: spawn, goal and power-up sit
        // on the underside.
        platforms: &[
            Platform::fixed(0.0, 100.0, 250.0, H),
            Platform::fixed(350.0, 160.0, 120.0, H),
            Platform::fixed(550.0, 220.0, 120.0, H),
            Platform::fixed(750.0, 280.0, 150.0, H),
            Platform::fixed(1000.0, 200.0, 120.0, H),
            Platform::fixed(1200.0, 260.0, 120.0, H),
            Platform::fixed(1400.0, 320.0, 150.0, H),
            Platform::fixed(1650.0, 240.0, 120.0, H),
            Platform::fixed(1850.0, 180.0, 200.0, H),
        ],
        hazards: &[spike(300.0, 125.0), spike(500.0, 185.0), spike(700.0, 245.0)],
        power_ups: &[power_up(850.0, 310.0, Shield)],
        birds: &[],
        goal: goal(2000.0, 205.0),
        spawn: Vec2::new(50.0, 130.0),
    },
    Level {
        id: LevelId(7),
        name: "Rainbow Realm",
        gravity: GravityMode::Normal,
        weather: Weather::Rainbow,
        backdrop: Backdrop::new("bg3.jpg", 0xff69b4),
        platforms: &[
            Platform::fixed(0.0, 520.0, 200.0, H).moving(100.0, 1.0),
            Platform::fixed(300.0, 460.0, 150.0, H).colored(0xff0000),
            Platform::fixed(550.0, 400.0, 150.0, H).colored(0xff7f00),
            Platform::fixed(800.0, 340.0, 150.0, H).colored(0xffff00),
            Platform::fixed(1050.0, 280.0, 150.0, H).colored(0x00ff00),
            Platform::fixed(1300.0, 340.0, 150.0, H).colored(0x0000ff),
            Platform::fixed(1550.0, 280.0, 150.0, H).colored(0x4b0082),
            Platform::fixed(1800.0, 220.0, 200.0, H).colored(0x9400d3),
        ],
        hazards: &[spike(250.0, 505.0), spike(500.0, 445.0), spike(750.0, 385.0)],
        power_ups: &[power_up(900.0, 290.0, Magnet)],
        birds: &[],
        goal: goal(1950.0, 170.0),
        spawn: Vec2::new(50.0, 420.0),
    },
    Level {
        id: LevelId(8),
        name: "Ultimate Challenge",
        gravity: GravityMode::Normal,
        weather: Weather::None,
        backdrop: Backdrop::new("bg4.jpg", 0xff1493),
        platforms: &[
            Platform::fixed(0.0, 540.0, 180.0, H),
            Platform::fixed(250.0, 500.0, 80.0, H),
            Platform::fixed(400.0, 460.0, 80.0, H),
            Platform::fixed(250.0, 420.0, 80.0, H),
            Platform::fixed(400.0, 380.0, 80.0, H),
            Platform::fixed(550.0, 340.0, 90.0, H),
            Platform::fixed(710.0, 300.0, 80.0, H),
            Platform::fixed(860.0, 260.0, 80.0, H),
            Platform::fixed(710.0, 220.0, 80.0, H),
            Platform::fixed(860.0, 180.0, 80.0, H),
            Platform::fixed(1010.0, 240.0, 90.0, H),
            Platform::fixed(1170.0, 200.0, 80.0, H),
            Platform::fixed(1320.0, 260.0, 80.0, H),
            Platform::fixed(1470.0, 220.0, 90.0, H),
            Platform::fixed(1630.0, 180.0, 80.0, H),
            Platform::fixed(1780.0, 240.0, 80.0, H),
            Platform::fixed(1930.0, 200.0, 90.0, H),
            Platform::fixed(2090.0, 160.0, 80.0, H),
            Platform::fixed(2240.0, 220.0, 100.0, H),
            Platform::fixed(2420.0, 180.0, 150.0, H),
        ],
        hazards: &[
            spike(200.0, 525.0),
            spike(350.0, 485.0),
            spike(500.0, 445.0),
            spike(660.0, 405.0),
            spike(810.0, 365.0),
            spike(960.0, 325.0),
            spike(1120.0, 285.0),
            spike(1270.0, 245.0),
            spike(1420.0, 205.0),
            spike(1580.0, 225.0),
            spike(1730.0, 265.0),
            spike(1880.0, 225.0),
            spike(2040.0, 185.0),
            spike(2190.0, 245.0),
        ],
        power_ups: &[
            power_up(650.0, 290.0, DoubleJump),
            power_up(1100.0, 150.0, Shield),
            power_up(1850.0, 190.0, Magnet),
        ],
        birds: &[],
        goal: goal(2520.0, 130.0),
        spawn: Vec2::new(50.0, 440.0),
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::overlaps;

    #[test]
    fn test_level_id_bounds() {
        assert!(LevelId::new(0).is_none());
        assert!(LevelId::new(9).is_none());
        assert_eq!(LevelId::new(8), Some(LevelId::LAST));
        assert_eq!(LevelId::FIRST.prev(), None);
        assert_eq!(LevelId::LAST.next(), None);
        assert_eq!(LevelId::all().count(), 8);
        assert_eq!(Level::by_number(9).unwrap_err(), GameError::InvalidLevel(9));
    }

    #[test]
    fn test_catalog_is_indexed_by_id() {
        for id in LevelId::all() {
            assert_eq!(Level::get(id).id, id);
        }
        assert_eq!(Level::get(LevelId::FIRST).name, "Green Fields");
        assert!(Level::get(LevelId::new(6).unwrap()).gravity.is_inverted());
        assert_eq!(Level::get(LevelId::new(5).unwrap()).gravity, GravityMode::Low);
    }

    #[test]
    fn test_every_level_has_ground_under_spawn() {
        let size = Vec2::new(30.0, 30.0);
        for id in LevelId::all() {
            let level = Level::get(id);
            let stand = level.standing_point(level.spawn.x, 0.0, size);
            assert_eq!(stand.x, level.spawn.x, "level {id}");
            if level.gravity.is_inverted() {
                assert!(stand.y <= level.spawn.y, "level {id}");
            } else {
                assert!(stand.y >= level.spawn.y, "level {id}");
            }
        }
    }

    #[test]
    fn test_static_platforms_ignore_time() {
        let platform = Platform::fixed(10.0, 20.0, 30.0, 40.0);
        assert_eq!(platform.rect_at(0.0), platform.rect_at(12.5));
    }

    #[test]
    fn test_motion_stays_within_range() {
        let platform = Platform::fixed(350.0, 480.0, 120.0, H).moving(150.0, 2.0);
        assert_eq!(platform.rect_at(0.0).x, 350.0);
        for i in 0..600 {
            let x = platform.rect_at(i as f32 / 60.0).x;
            assert!((275.0 - 0.01..=425.0 + 0.01).contains(&x));
        }
        // Peak speed is about two pixels per frame near the base position
        let step = platform.rect_at(1.0 / 60.0).x - platform.rect_at(0.0).x;
        assert!((step - 2.0).abs() < 0.05);
        // Descriptor is untouched
        assert_eq!(platform.rect.x, 350.0);
    }

    #[test]
    fn test_standing_point_over_gap_uses_nearest_platform() {
        let level = Level::get(LevelId::FIRST);
        let size = Vec2::new(30.0, 30.0);
        // 420..500 is a gap between the first two platforms
        let stand = level.standing_point(440.0, 0.0, size);
        let player = Rect::at(stand + Vec2::new(0.0, 1.0), size);
        assert!(level.platforms_at(0.0).any(|p| overlaps(&player, &p)));
    }

    #[test]
    fn test_standing_point_inverted_hangs_below() {
        let level = Level::get(LevelId::new(6).unwrap());
        let stand = level.standing_point(100.0, 0.0, Vec2::new(30.0, 30.0));
        assert_eq!(stand, Vec2::new(100.0, 125.0));
    }

    #[test]
    fn test_level_id_serde() {
        let id: LevelId = serde_json::from_str("3").unwrap();
        assert_eq!(id.number(), 3);
        assert_eq!(serde_json::to_string(&id).unwrap(), "3");
        assert!(serde_json::from_str::<LevelId>("12").is_err());
    }
}
