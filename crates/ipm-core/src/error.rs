//! Error types for ipm-core

use crate::tree::NodeId;

/// Result type for ipm-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in ipm-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Node id does not address a live node of the tree
    #[error("Node not found: {id}")]
    NodeNotFound { id: NodeId },

    /// Operation called on a node in the wrong state
    #[error("Invalid precondition: {message}")]
    InvalidPrecondition { message: String },

    #[error("Transform {transform} is not applicable to {path}")]
    TransformNotApplicable { transform: String, path: String },

    /// Property type not declared by the node's type
    #[error("Node type '{node_type}' does not admit property '{property}'")]
    PropertyNotAdmitted { node_type: String, property: String },

    #[error("Node type '{node_type}' admits at most {max} value(s) of '{property}'")]
    TooManyValues {
        node_type: String,
        property: String,
        max: u32,
    },

    /// Reconciliation plan cannot be applied as a whole
    #[error("Invalid merge plan: {message}")]
    InvalidMergePlan { message: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from ipm-fs
    #[error(transparent)]
    Fs(#[from] ipm_fs::Error),

    /// Profile error from ipm-profile
    #[error(transparent)]
    Profile(#[from] ipm_profile::Error),

    /// Rule evaluation error from ipm-rules
    #[error(transparent)]
    Rules(#[from] ipm_rules::Error),

    /// Object store error from ipm-store
    #[error(transparent)]
    Store(#[from] ipm_store::Error),
}

impl Error {
    pub(crate) fn precondition(message: impl Into<String>) -> Self {
        Self::InvalidPrecondition {
            message: message.into(),
        }
    }

    pub(crate) fn merge_plan(message: impl Into<String>) -> Self {
        Self::InvalidMergePlan {
            message: message.into(),
        }
    }
}
