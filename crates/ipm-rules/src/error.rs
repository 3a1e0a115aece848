//! Error types for ipm-rules

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The entry an operation was evaluated against does not exist or
    /// cannot be read
    #[error("Path unreadable: {path}")]
    PathUnreadable { path: PathBuf },

    #[error("Missing parameter '{name}' for {operation}")]
    MissingParameter {
        operation: &'static str,
        name: &'static str,
    },

    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter { name: &'static str, message: String },

    #[error("Invalid regular expression '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error(transparent)]
    Fs(ipm_fs::Error),
}

impl From<ipm_fs::Error> for Error {
    fn from(err: ipm_fs::Error) -> Self {
        match err {
            ipm_fs::Error::PathUnreadable { path } => Self::PathUnreadable { path },
            other => Self::Fs(other),
        }
    }
}
