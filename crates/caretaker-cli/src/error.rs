use std::io;

use caretaker_core::FeedError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] caretaker_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Feed(#[from] FeedError),
    #[error("HTTP client error: {0}")]
    Http(String),
    #[error("Gateway rejected request: {0}")]
    Gateway(String),
    #[error("Alert ID cannot be empty")]
    EmptyAlertId,
    #[error("Alert type cannot be empty")]
    EmptyAlertType,
    #[error("Acknowledge failed: {0}")]
    AcknowledgeFailed(String),
    #[error("Alert feed task failed: {0}")]
    FeedTask(String),
}
