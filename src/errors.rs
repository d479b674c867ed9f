//! Unified application error type.
//! Every module (db, core, remote, cli) returns AppError so that error
//! handling stays consistent; the attendance updater reports its own
//! narrower UpdateError, which converts into AppError when needed.

use std::io;
use thiserror::Error;

/// Outcome of a failed attendance increment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpdateError {
    /// Rejected locally: the id is outside `[0, max)`. No remote call was made.
    #[error("Invalid student id {id}: expected a value in 0..{max}")]
    InvalidStudent { id: i64, max: u32 },

    /// The stored count is already at the largest representable value.
    /// Nothing was written.
    #[error("Attendance counter of student {id} cannot grow past {count}")]
    CounterOverflow { id: i64, count: u64 },

    /// The new count could not be written back; the increment is lost.
    #[error("Remote write failed: {0}")]
    RemoteWriteFailed(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Sheet database
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Remote row store
    // ---------------------------
    #[error("Invalid range expression: {0}")]
    InvalidRange(String),

    #[error("Row store error: {0}")]
    Store(String),

    #[error("Connectivity unavailable: {0}")]
    ConnectivityUnavailable(String),

    #[error(transparent)]
    Update(#[from] UpdateError),

    // ---------------------------
    // Card reader
    // ---------------------------
    #[error("Invalid reader script token '{token}' at line {line}")]
    ReaderScript { token: String, line: usize },

    // ---------------------------
    // Roster
    // ---------------------------
    #[error("Roster error: {0}")]
    Roster(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
