//! Error types for ipm-profile

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] ipm_fs::Error),

    #[error("Profile not found at {path}")]
    ProfileNotFound { path: PathBuf },

    #[error("Invalid profile {id}: {message}")]
    InvalidProfile { id: String, message: String },

    #[error("Unknown node type: {name}")]
    UnknownNodeType { name: String },

    #[error("Unknown property type: {name}")]
    UnknownPropertyType { name: String },
}
