//! Game state and core simulation types
//!
//! `GameState` is the explicit simulation context: it is owned by the
//! progression controller and passed by reference into every step.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::entity::{Bird, Coin, PowerUp, PowerUpKind};
use crate::levels::{Level, LevelId};
use crate::tuning::Tuning;

/// Visual state of the player, driven by power-ups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Look {
    #[default]
    Normal,
    Shielded,
    Magnetized,
}

impl Look {
    /// Body color for the renderer (0xRRGGBB)
    pub fn color(self) -> u32 {
        match self {
            Look::Normal => 0x3b82f6,
            Look::Shielded => 0xffff00,
            Look::Magnetized => 0xff00ff,
        }
    }
}

/// The player-controlled character
///
/// States are implicit in the flag combination; `grounded` is recomputed
/// from platform contacts every step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Velocity in pixels per reference frame
    pub vel: Vec2,
    pub size: Vec2,
    /// -1 facing left, +1 facing right
    pub facing: i8,
    pub grounded: bool,
    /// Airborne jumps remaining (0-2)
    pub jumps_left: u8,
    pub shield: bool,
    /// Horizontal input held this step (cosmetic)
    pub moving: bool,
    pub look: Look,
    /// Jump input held on the previous step, for edge detection
    pub jump_held: bool,
    /// Contact that broke the shield, ignored until the player leaves it
    pub absorbed: Option<Contact>,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size: Vec2::new(tuning.player_width, tuning.player_height),
            facing: 1,
            grounded: false,
            jumps_left: 1,
            shield: false,
            moving: false,
            look: Look::Normal,
            jump_held: false,
            absorbed: None,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::at(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Apply horizontal input (-1, 0, +1)
    ///
    /// Input sets velocity outright; no input decays it by friction.
    pub fn steer(&mut self, direction: i8, tuning: &Tuning, frames: f32) {
        if direction != 0 {
            self.vel.x = direction.signum() as f32 * tuning.run_speed;
            self.facing = direction.signum();
            self.moving = true;
        } else {
            self.vel.x *= tuning.friction.powf(frames);
            self.moving = false;
        }
    }

    /// Jump if allowed; returns true if a jump happened
    ///
    /// Grounded jumps are free, airborne jumps spend a charge.
    pub fn jump(&mut self, inverted: bool, tuning: &Tuning) -> bool {
        if !self.grounded {
            if self.jumps_left == 0 {
                return false;
            }
            self.jumps_left -= 1;
        }
        self.vel.y = if inverted {
            tuning.jump_power
        } else {
            -tuning.jump_power
        };
        self.grounded = false;
        true
    }

    /// Rest on a surface; `surface` is the platform edge the player touches
    pub fn land(&mut self, surface: f32, inverted: bool, double_jump: bool) {
        self.pos.y = if inverted {
            surface
        } else {
            surface - self.size.y
        };
        self.vel.y = 0.0;
        self.grounded = true;
        self.jumps_left = if double_jump { 2 } else { 1 };
    }

    /// Spend the shield on a hit; returns false if there was none
    pub fn absorb_hit(&mut self, contact: Contact) -> bool {
        if !self.shield {
            return false;
        }
        self.shield = false;
        self.look = Look::Normal;
        self.absorbed = Some(contact);
        true
    }

    /// Whether `contact` is the one the shield already absorbed
    pub fn has_absorbed(&self, contact: Contact) -> bool {
        self.absorbed == Some(contact)
    }

    /// Place at `pos` at rest
    pub fn reset_to(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.grounded = false;
        self.absorbed = None;
    }
}

/// Power-up flags active for the current level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUps {
    pub double_jump: bool,
    pub shield: bool,
    pub magnet: bool,
}

/// Camera position (top-left of the view) in world coordinates
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Camera {
    pub pos: Vec2,
}

impl Camera {
    /// Keep the player a third of the way into the view, never left of or above the origin
    pub fn follow(&mut self, player: &Player, tuning: &Tuning) {
        self.pos.x = (player.pos.x - tuning.viewport_width / 3.0).max(0.0);
        self.pos.y = (player.pos.y - tuning.viewport_height / 2.0).max(0.0);
    }

    pub fn view(&self, tuning: &Tuning) -> Rect {
        Rect::new(
            self.pos.x,
            self.pos.y,
            tuning.viewport_width,
            tuning.viewport_height,
        )
    }
}

/// A lethal object the player can touch, by index into the level's hazards
/// or the active bird list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contact {
    Hazard(usize),
    Enemy(usize),
}

impl Contact {
    pub fn cause(self) -> DeathCause {
        match self {
            Contact::Hazard(_) => DeathCause::Hazard,
            Contact::Enemy(_) => DeathCause::Enemy,
        }
    }
}

/// What killed the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Hazard,
    Enemy,
    Fall,
}

/// Discrete cues for the presentation layer (audio, particles, overlays)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted(LevelId),
    Jump,
    CoinCollected { combo: u32, points: u64 },
    PowerUpCollected(PowerUpKind),
    ShieldBroken,
    CheckpointReached { x: f32 },
    Died { cause: DeathCause, lives_left: u8 },
    GameOver,
    LevelComplete {
        level: LevelId,
        seconds: u32,
        time_bonus: u64,
        combo_bonus: u64,
    },
    AllComplete,
}

/// Complete simulation context for the active run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed (coin layouts)
    pub seed: u64,
    pub level: LevelId,
    /// Simulation runs only while true
    pub playing: bool,
    pub score: u64,
    /// Coins collected this run
    pub coins: u32,
    pub lives: u8,
    pub combo: u32,
    pub max_combo: u32,
    /// Checkpoint x once reached this level
    pub checkpoint: Option<f32>,
    pub power_ups: PowerUps,
    /// Gravity and jumps point toward decreasing y
    pub reverse_gravity: bool,
    /// Seconds of simulated play on the current level
    pub level_time: f32,
    /// Steps simulated on the current level
    pub frame: u64,
    pub player: Player,
    pub coin_list: Vec<Coin>,
    pub power_up_list: Vec<PowerUp>,
    pub birds: Vec<Bird>,
    pub camera: Camera,
    /// Whether the current level's backdrop image has loaded
    #[serde(skip)]
    pub backdrop_ready: bool,
    /// Cues raised since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh run on level 1, not yet playing
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        let level = Level::get(LevelId::FIRST);
        Self {
            seed,
            level: level.id,
            playing: false,
            score: 0,
            coins: 0,
            lives: tuning.max_lives,
            combo: 0,
            max_combo: 0,
            checkpoint: None,
            power_ups: PowerUps::default(),
            reverse_gravity: level.gravity.is_inverted(),
            level_time: 0.0,
            frame: 0,
            player: Player::new(level.spawn, tuning),
            coin_list: Vec::new(),
            power_up_list: Vec::new(),
            birds: Vec::new(),
            camera: Camera::default(),
            backdrop_ready: false,
            events: Vec::new(),
        }
    }

    /// Reset all per-level state and begin playing `level`
    ///
    /// Score, coin count and lives carry over.
    pub fn start_level(&mut self, level: &Level, tuning: &Tuning) {
        self.level = level.id;
        self.playing = true;
        self.combo = 0;
        self.max_combo = 0;
        self.checkpoint = None;
        self.power_ups = PowerUps::default();
        self.reverse_gravity = level.gravity.is_inverted();
        self.level_time = 0.0;
        self.frame = 0;
        self.player = Player::new(level.spawn, tuning);
        self.coin_list = layout_coins(level, self.seed);
        self.power_up_list = level.power_ups.iter().map(PowerUp::from).collect();
        self.birds = level.birds.iter().map(Bird::from).collect();
        self.camera = Camera::default();
        self.backdrop_ready = false;
        self.events.push(GameEvent::LevelStarted(level.id));
    }

    /// Where the player comes back after losing a life
    pub fn respawn_point(&self, level: &Level) -> Vec2 {
        match self.checkpoint {
            Some(x) => level.standing_point(x, self.level_time, self.player.size),
            None => level.spawn,
        }
    }

    /// Put the player back at the respawn point and break the combo
    pub fn respawn(&mut self, level: &Level) {
        let pos = self.respawn_point(level);
        self.player.reset_to(pos);
        self.combo = 0;
    }

    /// Seconds elapsed on the current level, rounded down
    pub fn elapsed_seconds(&self) -> u32 {
        self.level_time.max(0.0) as u32
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Distance of a coin's top edge above a platform top
const COIN_LIFT: f32 = 40.0;
/// Distance of a coin's top edge below a platform underside (inverted gravity)
const COIN_DROP: f32 = 15.0;

/// Place 1-3 coins on every platform except the first and last
fn layout_coins(level: &Level, seed: u64) -> Vec<Coin> {
    let level_seed = seed ^ (level.id.number() as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
    let mut rng = Pcg32::seed_from_u64(level_seed);
    let inverted = level.gravity.is_inverted();
    let last = level.platforms.len().saturating_sub(1);

    let mut coins = Vec::new();
    for (i, platform) in level.platforms.iter().enumerate() {
        if i == 0 || i == last {
            continue;
        }
        let rect = platform.rect;
        let count: u32 = rng.random_range(1..=3);
        let spacing = rect.width / (count + 1) as f32;
        let y = if inverted {
            rect.bottom() + COIN_DROP
        } else {
            rect.y - COIN_LIFT
        };
        for k in 0..count {
            coins.push(Coin::new(Vec2::new(rect.x + spacing * (k + 1) as f32, y)));
        }
    }
    coins
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_waits_on_level_one() {
        let tuning = Tuning::default();
        let state = GameState::new(7, &tuning);
        assert!(!state.playing);
        assert_eq!(state.level, LevelId::FIRST);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_start_level_resets_transient_state() {
        let tuning = Tuning::default();
        let mut state = GameState::new(7, &tuning);
        state.score = 500;
        state.coins = 12;
        state.combo = 4;
        state.max_combo = 6;
        state.checkpoint = Some(900.0);
        state.power_ups.magnet = true;
        state.player.shield = true;

        let level = Level::get(LevelId::new(6).unwrap());
        state.start_level(level, &tuning);

        assert!(state.playing);
        assert_eq!(state.combo, 0);
        assert_eq!(state.max_combo, 0);
        assert!(state.checkpoint.is_none());
        assert_eq!(state.power_ups, PowerUps::default());
        assert!(!state.player.shield);
        assert_eq!(state.player.jumps_left, 1);
        assert!(state.reverse_gravity);
        assert_eq!(state.player.pos, level.spawn);
        // Run totals persist
        assert_eq!(state.score, 500);
        assert_eq!(state.coins, 12);
        assert_eq!(state.events, vec![GameEvent::LevelStarted(level.id)]);
    }

    #[test]
    fn test_coin_layout_is_seeded() {
        let level = Level::get(LevelId::FIRST);
        let a = layout_coins(level, 42);
        let b = layout_coins(level, 42);
        assert_eq!(a.len(), b.len());
        assert!(a.iter().zip(&b).all(|(x, y)| x.pos == y.pos));

        // Interior platforms only, 1-3 coins each
        let interior = level.platforms.len() - 2;
        assert!(a.len() >= interior && a.len() <= interior * 3);
        let first = level.platforms[0].rect;
        assert!(a.iter().all(|c| c.pos.x >= level.platforms[1].rect.x && c.pos.x > first.right()));
    }

    #[test]
    fn test_coin_layout_hangs_below_in_reverse_gravity() {
        let level = Level::get(LevelId::new(6).unwrap());
        let coins = layout_coins(level, 1);
        let second = level.platforms[1].rect;
        let on_second: Vec<_> = coins
            .iter()
            .filter(|c| c.pos.x > second.x && c.pos.x < second.right())
            .collect();
        assert!(!on_second.is_empty());
        assert!(on_second.iter().all(|c| c.pos.y == second.bottom() + COIN_DROP));
    }

    #[test]
    fn test_jump_charges() {
        let tuning = Tuning::default();
        let mut player = Player::new(Vec2::ZERO, &tuning);
        player.land(100.0, false, false);
        assert_eq!(player.jumps_left, 1);
        assert_eq!(player.pos.y, 70.0);

        // Grounded jump is free
        assert!(player.jump(false, &tuning));
        assert_eq!(player.jumps_left, 1);
        assert_eq!(player.vel.y, -15.0);
        assert!(!player.grounded);

        // Airborne jump spends the charge
        assert!(player.jump(false, &tuning));
        assert_eq!(player.jumps_left, 0);
        assert!(!player.jump(false, &tuning));
        assert_eq!(player.jumps_left, 0);

        // Landing with double jump refills to two
        player.land(100.0, false, true);
        assert_eq!(player.jumps_left, 2);
    }

    #[test]
    fn test_inverted_jump_and_landing() {
        let tuning = Tuning::default();
        let mut player = Player::new(Vec2::ZERO, &tuning);
        player.land(125.0, true, false);
        assert_eq!(player.pos.y, 125.0);
        assert!(player.jump(true, &tuning));
        assert_eq!(player.vel.y, 15.0);
    }

    #[test]
    fn test_steer_and_friction() {
        let tuning = Tuning::default();
        let mut player = Player::new(Vec2::ZERO, &tuning);
        player.steer(-1, &tuning, 1.0);
        assert_eq!(player.vel.x, -5.0);
        assert_eq!(player.facing, -1);
        assert!(player.moving);

        player.steer(0, &tuning, 1.0);
        assert!((player.vel.x + 4.0).abs() < 1e-5);
        assert!(!player.moving);
        // Facing is kept without input
        assert_eq!(player.facing, -1);
        // Decay never snaps straight to zero
        player.steer(0, &tuning, 1.0);
        assert!(player.vel.x < 0.0);
    }

    #[test]
    fn test_shield_absorbs_once() {
        let tuning = Tuning::default();
        let mut player = Player::new(Vec2::ZERO, &tuning);
        player.shield = true;
        player.look = Look::Shielded;
        assert!(player.absorb_hit(Contact::Hazard(0)));
        assert!(!player.shield);
        assert_eq!(player.look, Look::Normal);
        assert!(player.has_absorbed(Contact::Hazard(0)));
        assert!(!player.has_absorbed(Contact::Enemy(0)));
        // A second, different contact is not absorbed
        assert!(!player.absorb_hit(Contact::Enemy(0)));
        assert!(player.has_absorbed(Contact::Hazard(0)));
    }

    #[test]
    fn test_camera_follow_clamps() {
        let tuning = Tuning::default();
        let mut camera = Camera::default();
        let mut player = Player::new(Vec2::new(50.0, 400.0), &tuning);
        camera.follow(&player, &tuning);
        assert_eq!(camera.pos, Vec2::new(0.0, 40.0));

        // Never above the world origin
        player.pos = Vec2::new(50.0, 300.0);
        camera.follow(&player, &tuning);
        assert_eq!(camera.pos, Vec2::ZERO);

        player.pos = Vec2::new(2000.0, 900.0);
        camera.follow(&player, &tuning);
        assert!((camera.pos.x - (2000.0 - 1280.0 / 3.0)).abs() < 0.001);
        assert_eq!(camera.pos.y, 540.0);
    }

    #[test]
    fn test_respawn_prefers_checkpoint() {
        let tuning = Tuning::default();
        let level = Level::get(LevelId::FIRST);
        let mut state = GameState::new(3, &tuning);
        state.start_level(level, &tuning);
        state.combo = 3;

        state.respawn(level);
        assert_eq!(state.player.pos, level.spawn);
        assert_eq!(state.combo, 0);

        // Checkpoint over the 1100..1300 platform (top at 350)
        state.checkpoint = Some(1230.0);
        state.player.vel = Vec2::new(3.0, 7.0);
        state.respawn(level);
        assert_eq!(state.player.pos, Vec2::new(1230.0, 320.0));
        assert_eq!(state.player.vel, Vec2::ZERO);
    }
}
