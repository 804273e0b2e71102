//! Fixed timestep simulation step
//!
//! One call advances the active level by `dt` seconds. Collision categories
//! are resolved in a fixed order: platforms, hazards, enemies, coins,
//! power-ups, goal, fall-off. Terminal results (death, goal) are returned to
//! the progression controller, which owns lives and level flow.

use super::collision::{Rect, overlaps};
use super::entity::{Entity, EntityClock, PowerUpKind};
use super::state::{Contact, DeathCause, GameEvent, GameState, Look};
use crate::levels::{GravityMode, Level};
use crate::tuning::Tuning;

/// Logical inputs held during a step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl StepInput {
    /// Horizontal direction; left wins when both are held
    pub fn direction(&self) -> i8 {
        if self.left {
            -1
        } else if self.right {
            1
        } else {
            0
        }
    }
}

/// Result of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Not playing; nothing simulated
    Idle,
    Continue,
    /// Unshielded contact with a hazard or enemy, or fell out of the world
    Died(DeathCause),
    GoalReached,
}

/// Advance the game state by one step
pub fn step(
    state: &mut GameState,
    level: &Level,
    input: &StepInput,
    tuning: &Tuning,
    dt: f32,
) -> StepOutcome {
    if !state.playing {
        return StepOutcome::Idle;
    }

    let frames = crate::frames(dt);
    let prev_time = state.level_time;
    state.level_time += dt;
    state.frame += 1;
    let time = state.level_time;

    // Checkpoint (one-shot per level)
    let checkpoint_x = level.goal.x * tuning.checkpoint_fraction;
    if state.checkpoint.is_none() && state.player.pos.x > checkpoint_x {
        let x = state.player.pos.x;
        state.checkpoint = Some(x);
        state.events.push(GameEvent::CheckpointReached { x });
        log::debug!("Checkpoint reached at x={x:.0} on level {}", level.id);
    }

    // Input
    state.player.steer(input.direction(), tuning, frames);
    let jump_pressed = input.jump && !state.player.jump_held;
    state.player.jump_held = input.jump;
    if jump_pressed && state.player.jump(state.reverse_gravity, tuning) {
        state.events.push(GameEvent::Jump);
    }

    // Gravity and integration
    let mut gravity = tuning.gravity;
    if level.gravity == GravityMode::Low {
        gravity *= tuning.low_gravity_factor;
    }
    if state.reverse_gravity {
        gravity = -gravity;
    }
    state.player.vel.y += gravity * frames;
    state.player.pos += state.player.vel * frames;

    resolve_platforms(state, level, prev_time, time);

    // Goal contact outranks a lethal contact in the same step
    let at_goal = overlaps(&state.player.bounds(), &level.goal);

    // Birds move every step, including one that ends in a death
    let clock = EntityClock {
        frames,
        time,
        view: state.camera.view(tuning),
    };
    for bird in &mut state.birds {
        bird.advance(&clock);
    }

    // Hazards, then enemies
    let body = state.player.bounds();
    let touching: Vec<Contact> = level
        .hazards
        .iter()
        .enumerate()
        .filter(|(_, hazard)| overlaps(&body, hazard))
        .map(|(i, _)| Contact::Hazard(i))
        .chain(
            state
                .birds
                .iter()
                .enumerate()
                .filter(|(_, bird)| overlaps(&body, &bird.bounds()))
                .map(|(i, _)| Contact::Enemy(i)),
        )
        .collect();

    // The contact that broke the shield is forgotten once the player is clear of it
    if let Some(absorbed) = state.player.absorbed {
        if !touching.contains(&absorbed) {
            state.player.absorbed = None;
        }
    }
    for contact in touching {
        if let Some(cause) = take_hit(state, contact) {
            if !at_goal {
                return StepOutcome::Died(cause);
            }
        }
    }

    collect_coins(state, tuning, &clock);
    collect_power_ups(state, tuning, &clock);

    if at_goal {
        return StepOutcome::GoalReached;
    }

    if fell_out(state, tuning) {
        return StepOutcome::Died(DeathCause::Fall);
    }

    state.camera.follow(&state.player, tuning);
    StepOutcome::Continue
}

/// Land the player on platforms it is moving into from the gravity side
///
/// Grounded is cleared first, so it only holds with a supporting contact
/// this step. A player resting on a moving platform is carried with it.
fn resolve_platforms(state: &mut GameState, level: &Level, prev_time: f32, time: f32) {
    let inverted = state.reverse_gravity;
    let double_jump = state.power_ups.double_jump;
    let player = &mut state.player;
    player.grounded = false;

    let mut carry = 0.0;
    for platform in level.platforms {
        let rect = platform.rect_at(time);
        if !overlaps(&player.bounds(), &rect) {
            continue;
        }
        let (approaching, surface) = if inverted {
            (player.vel.y < 0.0, rect.bottom())
        } else {
            (player.vel.y > 0.0, rect.y)
        };
        if approaching {
            player.land(surface, inverted, double_jump);
            carry = rect.x - platform.rect_at(prev_time).x;
        }
    }
    player.pos.x += carry;
}

/// Apply a hazard or enemy contact; returns the cause if it is lethal
///
/// The shield absorbs one contact. Staying inside that same contact is
/// harmless, any other contact kills.
fn take_hit(state: &mut GameState, contact: Contact) -> Option<DeathCause> {
    if state.player.has_absorbed(contact) {
        return None;
    }
    if state.player.absorb_hit(contact) {
        state.power_ups.shield = false;
        state.events.push(GameEvent::ShieldBroken);
        log::debug!("Shield absorbed {contact:?}");
        return None;
    }
    Some(contact.cause())
}

fn collect_coins(state: &mut GameState, tuning: &Tuning, clock: &EntityClock) {
    let player_box = state.player.bounds();
    let player_center = state.player.center();
    let magnet = state.power_ups.magnet;

    for coin in &mut state.coin_list {
        coin.advance(clock);
        if coin.collected {
            continue;
        }
        if magnet && coin.center().distance(player_center) < tuning.magnet_radius {
            coin.drift_toward(player_center, tuning.magnet_pull);
        }
        if overlaps(&player_box, &coin.bounds()) && coin.collect() {
            state.coins += 1;
            state.combo += 1;
            state.max_combo = state.max_combo.max(state.combo);
            let points = tuning.coin_points(state.combo);
            state.score += points;
            state.events.push(GameEvent::CoinCollected {
                combo: state.combo,
                points,
            });
        }
    }
}

fn collect_power_ups(state: &mut GameState, tuning: &Tuning, clock: &EntityClock) {
    let player_box: Rect = state.player.bounds();

    for power_up in &mut state.power_up_list {
        power_up.advance(clock);
        if power_up.collected || !overlaps(&player_box, &power_up.bounds()) {
            continue;
        }
        power_up.collect();
        state.score += tuning.power_up_value;

        let player = &mut state.player;
        match power_up.kind {
            PowerUpKind::DoubleJump => {
                state.power_ups.double_jump = true;
                player.jumps_left = 2;
            }
            PowerUpKind::Shield => {
                state.power_ups.shield = true;
                player.shield = true;
                player.look = Look::Shielded;
            }
            PowerUpKind::Magnet => {
                state.power_ups.magnet = true;
                player.look = Look::Magnetized;
            }
        }
        state.events.push(GameEvent::PowerUpCollected(power_up.kind));
        log::debug!("Collected {:?}", power_up.kind);
    }
}

/// Whether the player has left the playable area on the gravity side
fn fell_out(state: &GameState, tuning: &Tuning) -> bool {
    if state.reverse_gravity {
        state.player.pos.y < -tuning.fall_margin
    } else {
        state.player.pos.y > tuning.world_height + tuning.fall_margin
    }
}
