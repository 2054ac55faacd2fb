//! Error types for ca-sync

use std::path::PathBuf;

/// Result type for ca-sync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in ca-sync operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A watched directory could not be enumerated; fatal for the current pass
    #[error("Cannot list directory {path}: {source}")]
    ListDir {
        path: PathBuf,
        #[source]
        source: ca_fs::Error,
    },

    /// Source and destination resolve to the same directory
    #[error("Source and destination must differ, both are {path}")]
    SameDirectory { path: PathBuf },

    /// Value is not a 14-digit copy tag
    #[error("Invalid copy tag: {value:?}")]
    InvalidTag { value: String },

    /// File name cannot be carried through a tagged name
    #[error("Invalid file name: {name:?}")]
    InvalidFileName { name: String },

    /// Filesystem error from ca-fs
    #[error(transparent)]
    Fs(#[from] ca_fs::Error),
}
