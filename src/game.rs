//! Progression controller
//!
//! Owns the simulation context and drives it with a fixed timestep. Handles
//! the transitions the per-frame step only reports: deaths, game over,
//! level completion and the delayed advance to the next level.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::error::GameError;
use crate::levels::{Level, LevelId};
use crate::persistence::Storage;
use crate::progress::Progress;
use crate::sim::{DeathCause, GameEvent, GameState, StepInput, StepOutcome, step};
use crate::tuning::Tuning;

/// Longest frame the accumulator will absorb
const MAX_FRAME_DT: f32 = 0.1;

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Level select; nothing is simulated
    Menu,
    Playing,
    /// Level finished, waiting to start the next one
    LevelTransition,
    /// Out of lives; waits for retry or menu
    GameOver,
    /// Final level finished
    AllComplete,
}

/// A delayed level start, valid only while the game is still where it was
/// when the request was made
#[derive(Debug, Clone, Copy)]
struct ScheduledAdvance {
    target: LevelId,
    from: LevelId,
    fires_at: f64,
}

/// Game instance holding the run, progress and level flow
pub struct Game<S: Storage> {
    tuning: Tuning,
    storage: S,
    progress: Progress,
    state: GameState,
    phase: Phase,
    scheduled: Option<ScheduledAdvance>,
    /// Seconds of host time seen by `update`
    clock: f64,
    accumulator: f32,
}

impl<S: Storage> Game<S> {
    /// Create a game in the menu, loading progress from `storage`
    pub fn new(tuning: Tuning, storage: S, seed: u64) -> Self {
        let progress = Progress::load(&storage);
        let state = GameState::new(seed, &tuning);
        Self {
            tuning,
            storage,
            progress,
            state,
            phase: Phase::Menu,
            scheduled: None,
            clock: 0.0,
            accumulator: 0.0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access to the running context (host tools and tests)
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The level currently loaded
    pub fn level(&self) -> &'static Level {
        Level::get(self.state.level)
    }

    /// Start a level by number
    ///
    /// Rejects numbers outside the catalog and levels that are still locked.
    /// Any scheduled advance is superseded.
    pub fn start_level(&mut self, number: u8) -> Result<(), GameError> {
        let level = Level::by_number(number)?;
        if !self.progress.is_unlocked(level.id) {
            return Err(GameError::LevelLocked(level.id));
        }
        self.begin(level);
        Ok(())
    }

    fn begin(&mut self, level: &'static Level) {
        self.scheduled = None;
        self.accumulator = 0.0;
        self.state.start_level(level, &self.tuning);
        self.phase = Phase::Playing;
        log::info!("Starting level {} ({})", level.id, level.name);
    }

    /// Advance host time by `dt` seconds and run as many fixed steps as fit
    pub fn update(&mut self, input: &StepInput, dt: f32) {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.clock += dt as f64;
        self.fire_scheduled();

        if self.phase != Phase::Playing {
            self.accumulator = 0.0;
            return;
        }

        self.accumulator += dt;
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.advance(input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            if self.phase != Phase::Playing {
                self.accumulator = 0.0;
                break;
            }
        }
    }

    /// Run exactly one fixed step and apply its outcome
    pub fn advance(&mut self, input: &StepInput) -> StepOutcome {
        let level = self.level();
        let outcome = step(&mut self.state, level, input, &self.tuning, SIM_DT);
        match outcome {
            StepOutcome::Died(cause) => self.lose_life(level, cause),
            StepOutcome::GoalReached => self.complete_level(level),
            StepOutcome::Idle | StepOutcome::Continue => {}
        }
        outcome
    }

    fn lose_life(&mut self, level: &Level, cause: DeathCause) {
        self.state.lives = self.state.lives.saturating_sub(1);
        let lives_left = self.state.lives;
        self.state.events.push(GameEvent::Died { cause, lives_left });

        if lives_left > 0 {
            self.state.respawn(level);
            log::debug!("Died ({cause:?}) on level {}, {lives_left} lives left", level.id);
            return;
        }

        self.state.playing = false;
        self.state.lives = self.tuning.max_lives;
        self.state.combo = 0;
        self.state.player.reset_to(level.spawn);
        self.phase = Phase::GameOver;
        self.state.events.push(GameEvent::GameOver);
        log::info!("Game over on level {} (score {})", level.id, self.state.score);
    }

    fn complete_level(&mut self, level: &Level) {
        self.state.playing = false;
        self.state.lives = self.tuning.max_lives;

        let seconds = self.state.elapsed_seconds();
        let time_bonus = self.tuning.time_bonus(seconds);
        let combo_bonus = self.state.max_combo as u64 * self.tuning.combo_bonus;
        self.state.score += time_bonus + combo_bonus;

        let new_best = self.progress.record_completion(level.id, seconds);
        self.state.events.push(GameEvent::LevelComplete {
            level: level.id,
            seconds,
            time_bonus,
            combo_bonus,
        });
        log::info!(
            "Level {} complete in {}s (+{} time, +{} combo{})",
            level.id,
            seconds,
            time_bonus,
            combo_bonus,
            if new_best { ", new best" } else { "" }
        );

        if let Err(e) = self.progress.save(&mut self.storage) {
            log::warn!("Failed to save progress: {e}");
        }

        match level.id.next() {
            Some(target) => {
                self.phase = Phase::LevelTransition;
                self.scheduled = Some(ScheduledAdvance {
                    target,
                    from: level.id,
                    fires_at: self.clock + self.tuning.advance_delay as f64,
                });
            }
            None => {
                self.phase = Phase::AllComplete;
                self.state.events.push(GameEvent::AllComplete);
                log::info!("All levels complete (score {})", self.state.score);
            }
        }
    }

    /// Start the scheduled level once its delay has elapsed
    ///
    /// The request is dropped if the game has left the transition it was
    /// made in.
    fn fire_scheduled(&mut self) {
        let Some(scheduled) = self.scheduled else {
            return;
        };
        if self.clock < scheduled.fires_at {
            return;
        }
        self.scheduled = None;

        if self.phase != Phase::LevelTransition || self.state.level != scheduled.from {
            log::warn!(
                "Dropping stale advance to level {} (phase {:?})",
                scheduled.target,
                self.phase
            );
            return;
        }
        self.begin(Level::get(scheduled.target));
    }

    /// Restart the current level after a game over
    ///
    /// Returns false outside `GameOver`.
    pub fn retry(&mut self) -> bool {
        if self.phase != Phase::GameOver {
            return false;
        }
        self.begin(self.level());
        true
    }

    /// Leave play for the menu
    pub fn return_to_menu(&mut self) {
        self.state.playing = false;
        self.accumulator = 0.0;
        self.phase = Phase::Menu;
    }

    /// Start the next level now instead of waiting for the scheduled advance
    ///
    /// Returns false outside `LevelTransition`.
    pub fn next_level(&mut self) -> bool {
        if self.phase != Phase::LevelTransition {
            return false;
        }
        match self.state.level.next() {
            Some(next) => {
                self.begin(Level::get(next));
                true
            }
            None => false,
        }
    }

    /// Report the result of loading a level's backdrop image
    pub fn backdrop_loaded(&mut self, level: LevelId, ok: bool) {
        if level != self.state.level {
            log::debug!("Ignoring backdrop for level {level}, level {} is loaded", self.state.level);
            return;
        }
        if ok {
            self.state.backdrop_ready = true;
        } else {
            log::warn!(
                "Backdrop {} failed to load, using flat color",
                self.level().backdrop.image
            );
        }
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}
