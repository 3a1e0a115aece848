//! Domain profile model for the Internal Package Model engine.
//!
//! A domain profile is an immutable catalog of node types, property types
//! and node transforms. Profiles are loaded once per session (one primary
//! plus any number of secondaries) and then only read.

pub mod catalog;
pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use catalog::ProfileCatalog;
pub use error::{Error, Result};
pub use loader::ProfileLoader;
pub use schema::{
    DomainProfile, MigrationPolicy, NodeTransform, NodeType, ProfileMeta, PropertyConstraint,
    PropertyType, ValueKind,
};
pub use validation::{IssueLevel, ProfileIssue};
