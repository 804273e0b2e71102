//! Error types

use crate::levels::LevelId;

/// Errors raised by the progression controller
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Level number outside the catalog
    #[error("no level {0} (levels are numbered 1-{max})", max = crate::consts::LEVEL_COUNT)]
    InvalidLevel(u8),

    /// Level exists but its predecessor has not been completed
    #[error("level {0} is locked")]
    LevelLocked(LevelId),
}

/// Errors from a storage backend
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    /// IO error from the filesystem
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored value could not be encoded or decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors loading a tuning file
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid tuning JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
