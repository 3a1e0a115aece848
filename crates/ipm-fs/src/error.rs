//! Error types for ipm-fs

use std::path::PathBuf;

/// Result type for ipm-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in ipm-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Path does not exist or cannot be read: {path}")]
    PathUnreadable { path: PathBuf },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Failed to serialize {format} config to {path}: {message}")]
    ConfigSerialize {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Map an I/O failure to `PathUnreadable` when the entry is missing.
    pub fn from_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
                Self::PathUnreadable { path }
            }
            _ => Self::Io { path, source },
        }
    }

    /// True for the "path unreadable" class of failures.
    pub fn is_unreadable(&self) -> bool {
        matches!(self, Self::PathUnreadable { .. })
    }
}
