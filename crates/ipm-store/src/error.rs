//! Error types for ipm-store

pub type Result<T> = std::result::Result<T, Error>;

/// Store failures are fatal for the calling engine operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Domain object not found: {id}")]
    ObjectNotFound { id: String },

    #[error("Store inconsistency: {message}")]
    Inconsistent { message: String },

    #[error(transparent)]
    Fs(#[from] ipm_fs::Error),
}

impl Error {
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        Self::ObjectNotFound { id: id.to_string() }
    }
}
