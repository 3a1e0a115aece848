//! Shared test fixtures for the IPM engine workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`tree`]: [`TestTree`] builder for scratch directory hierarchies
//! - [`profiles`]: sample domain profiles and catalogs

pub mod profiles;
pub mod tree;

pub use profiles::{archive_catalog, archive_profile, photo_profile, ARCHIVE_PROFILE_TOML};
pub use tree::TestTree;
