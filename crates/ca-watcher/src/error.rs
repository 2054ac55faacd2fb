//! Error types for ca-watcher

use std::path::PathBuf;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from ca-sync
    #[error(transparent)]
    Sync(#[from] ca_sync::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Config file could not be read or parsed
    #[error("Invalid config file {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Logging could not be initialised
    #[error("Failed to initialise logging: {0}")]
    Logging(String),

    /// The blocking iteration task panicked or was cancelled
    #[error("Iteration task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
