//! Command implementations.

pub mod access;
pub mod alerts;

use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The data directory or a slot could not be read or written.
    #[error("storage error: {0}")]
    Storage(#[from] farmalink_panel::storage::StorageError),

    /// The alert log could not be updated.
    #[error("alert log error: {0}")]
    AlertLog(#[from] farmalink_panel::services::AlertLogError),

    /// JSON output could not be produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid command-line input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The credential was rejected.
    #[error(transparent)]
    Login(#[from] farmalink_panel::services::LoginError),

    /// Reading stdin failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
