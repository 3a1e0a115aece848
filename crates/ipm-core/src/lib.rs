//! Internal Package Model engine
//!
//! Builds typed package trees from file-system content and keeps them in
//! step with the file system:
//!
//! - **Tree model**: arena-backed [`IpmTree`] mirroring a directory
//!   hierarchy
//! - **Domain profile service**: backtracking type assignment, validation,
//!   node transforms and property inheritance
//! - **IPM service**: scanning, ignore state, compare and merge
//! - **Session**: profile, rule and file-system wiring from a config file
//!
//! # Architecture
//!
//! ```text
//!                      host / UI
//!                          |
//!                      ipm-core
//!                          |
//!     +----------+---------+---------+
//!     |          |         |         |
//!  ipm-fs   ipm-profile ipm-rules ipm-store
//! ```
//!
//! # Example
//!
//! ```ignore
//! use ipm_core::{Session, SessionConfig};
//! use ipm_fs::NormalizedPath;
//! use ipm_store::InMemoryStore;
//!
//! let session = Session::open(SessionConfig::new("profiles/archive.toml"))?;
//! let mut tree = session
//!     .ipm_service()
//!     .create_tree_from_file_system(&NormalizedPath::new("/data/papers"))?;
//! let mut store = InMemoryStore::new();
//! let root = tree.root();
//! session.profile_service().assign_node_types(&mut tree, &mut store, root)?;
//! ```

pub mod config;
pub mod error;
pub mod ipm_service;
pub mod logging;
mod objects;
pub mod profile_service;
pub mod session;
pub mod tree;

pub use config::{FormatDetection, SessionConfig};
pub use error::{Error, Result};
pub use ipm_service::{
    ChangeKind, ComparisonResult, IpmService, MergeReport, NodeComparison, NodeComparisonStatus,
    ScanOptions, TreeSnapshot,
};
pub use profile_service::DomainProfileService;
pub use session::Session;
pub use tree::{IpmTree, Node, NodeId};
