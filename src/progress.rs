//! Level progress
//!
//! Completed levels and best completion times, persisted through a
//! [`Storage`] backend. The completed set is stored as a JSON array of level
//! numbers so it round-trips exactly.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::levels::LevelId;
use crate::persistence::Storage;

/// Stars shown for a completed level
pub const STARS_PER_LEVEL: u8 = 3;

/// Progress record carried across runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    completed: BTreeSet<LevelId>,
    /// Best completion time in whole seconds
    best_times: BTreeMap<LevelId, u32>,
}

impl Progress {
    /// Storage key for the completed-levels array
    pub const STORAGE_KEY: &'static str = "gameProgress";
    /// Storage key for best times
    pub const BEST_TIMES_KEY: &'static str = "bestTimes";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_completed(&self, level: LevelId) -> bool {
        self.completed.contains(&level)
    }

    /// Level 1 is always open; every other level needs its predecessor
    pub fn is_unlocked(&self, level: LevelId) -> bool {
        match level.prev() {
            None => true,
            Some(prev) => self.is_completed(prev),
        }
    }

    pub fn stars(&self, level: LevelId) -> u8 {
        if self.is_completed(level) {
            STARS_PER_LEVEL
        } else {
            0
        }
    }

    pub fn best_time(&self, level: LevelId) -> Option<u32> {
        self.best_times.get(&level).copied()
    }

    /// Completed levels in ascending order
    pub fn completed(&self) -> impl Iterator<Item = LevelId> + '_ {
        self.completed.iter().copied()
    }

    /// Mark `level` completed in `seconds`
    ///
    /// Returns true if the time is a new best (strictly faster, or the first).
    pub fn record_completion(&mut self, level: LevelId, seconds: u32) -> bool {
        self.completed.insert(level);
        match self.best_times.get(&level) {
            Some(&best) if seconds >= best => false,
            _ => {
                self.best_times.insert(level, seconds);
                true
            }
        }
    }

    /// Load progress from storage
    ///
    /// Missing or malformed data means no progress. Unknown level numbers
    /// are dropped.
    pub fn load<S: Storage + ?Sized>(storage: &S) -> Self {
        let mut progress = Self::new();

        match read_json::<Vec<i64>, S>(storage, Self::STORAGE_KEY) {
            Ok(Some(numbers)) => {
                for number in numbers {
                    match u8::try_from(number).ok().and_then(LevelId::new) {
                        Some(id) => {
                            progress.completed.insert(id);
                        }
                        None => log::warn!("Ignoring unknown level {number} in saved progress"),
                    }
                }
                log::info!("Loaded progress ({} levels completed)", progress.completed.len());
            }
            Ok(None) => log::info!("No saved progress, starting fresh"),
            Err(e) => log::warn!("Saved progress is unreadable, starting fresh: {e}"),
        }

        match read_json::<BTreeMap<LevelId, u32>, S>(storage, Self::BEST_TIMES_KEY) {
            Ok(Some(times)) => progress.best_times = times,
            Ok(None) => {}
            Err(e) => log::warn!("Saved best times are unreadable, ignoring: {e}"),
        }

        progress
    }

    /// Write progress to storage
    pub fn save<S: Storage + ?Sized>(&self, storage: &mut S) -> Result<(), StorageError> {
        storage.write(Self::STORAGE_KEY, &self.completed_json()?)?;
        storage.write(Self::BEST_TIMES_KEY, &serde_json::to_string(&self.best_times)?)?;
        log::info!("Progress saved ({} levels completed)", self.completed.len());
        Ok(())
    }

    /// Completed levels as a JSON array of level numbers
    pub fn completed_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(&self.completed)?)
    }
}

fn read_json<T, S>(storage: &S, key: &str) -> Result<Option<T>, StorageError>
where
    T: serde::de::DeserializeOwned,
    S: Storage + ?Sized,
{
    match storage.read(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}
