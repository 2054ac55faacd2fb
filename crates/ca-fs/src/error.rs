//! Error types for ca-fs

use std::path::PathBuf;

/// Result type for ca-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in ca-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The path the failed operation was acting on.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } => path,
        }
    }

    /// The kind of the underlying I/O error.
    pub fn kind(&self) -> std::io::ErrorKind {
        match self {
            Self::Io { source, .. } => source.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn io_error_display_contains_path() {
        let err = Error::io("/etc/ssl/certs", io::Error::from(io::ErrorKind::NotFound));
        let display = err.to_string();
        assert!(
            display.contains("/etc/ssl/certs"),
            "Error display should contain the path, got: {}",
            display
        );
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert_eq!(err.path(), std::path::Path::new("/etc/ssl/certs"));
    }
}
