// src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store lock poisoned")]
    LockPoisoned,

    #[error("Performance tracker is no longer running")]
    TrackerClosed,

    #[error("Problem not found: {0}")]
    UnknownProblem(i64),
}

pub type Result<T> = std::result::Result<T, Error>;
