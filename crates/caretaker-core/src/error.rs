//! Error types for caretaker-core

use thiserror::Error;

/// Result type alias using caretaker-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in caretaker-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// `SQLite` error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Alert not found
    #[error("Alert not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// The remote alert feed reported a delivery failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// The subscription was cancelled or denied by the remote side.
    #[error("Alert feed cancelled: {0}")]
    Cancelled(String),

    /// The snapshot could not be fetched.
    #[error("Alert feed unavailable: {0}")]
    Unavailable(String),

    /// The snapshot payload could not be decoded.
    #[error("Alert feed payload invalid: {0}")]
    InvalidPayload(String),
}

/// The acknowledge write to the remote store failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteWriteError {
    #[error("Alert not found in remote store: {0}")]
    NotFound(String),

    #[error("Remote store rejected write: {0}")]
    Rejected(String),

    #[error("Remote store unreachable: {0}")]
    Unreachable(String),
}

/// The local alert surface could not be raised or retracted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Notifier error: {0}")]
pub struct NotifierError(pub String);
