use std::path::PathBuf;
use std::time::Duration;

use crate::game::{Cell, Token};

/// Reasons a play is rejected. A rejected play never mutates the board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {col} is outside the board (0..{ncols})")]
    InvalidColumn { col: usize, ncols: usize },

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("cannot play an empty cell")]
    InvalidToken,

    #[error("no column was selected")]
    NoColumn,

    #[error("game is over")]
    GameOver,

    #[error("{0} is not an interactive participant")]
    NotInteractive(String),
}

/// Contract violations when undoing a play.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CancelError {
    #[error("column {col} is outside the board (0..{ncols})")]
    InvalidColumn { col: usize, ncols: usize },

    #[error("cannot cancel a play of an empty cell")]
    InvalidToken,

    #[error("cannot cancel play at column {0}: column is empty")]
    EmptyColumn(usize),

    #[error("cannot cancel play at column {col}: expected {expected:?} on top, found {found:?}")]
    TokenMismatch {
        col: usize,
        expected: Token,
        found: Cell,
    },
}

/// Failures of a bounded move computation.
#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    #[error("move computation timed out after {0:?}")]
    TimedOut(Duration),

    #[error("move worker stopped without answering")]
    WorkerFailed,

    #[error("failed to spawn move worker: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors surfaced by the game loop itself.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("input channel closed while waiting for a move")]
    InputClosed,
}
