//! IPM service: tree construction and reconciliation
//!
//! The service builds [`IpmTree`](crate::IpmTree)s from the file system,
//! toggles ignore state, and reconciles a curated tree with a fresh
//! rescan:
//!
//! ```text
//! scan ──> existing tree ──(user curation)──> curated tree
//! rescan ──> comparison tree ─┐                    │
//!                             └──> compare_tree <──┘
//!                                       │
//!                          (caller filters the result)
//!                                       │
//!                                  merge_tree ──> curated tree, updated
//! ```

mod compare;
mod ignore;
mod merge;
mod scan;

pub use compare::{ChangeKind, ComparisonResult, NodeComparison, NodeComparisonStatus, TreeSnapshot};
pub use merge::MergeReport;
pub use scan::ScanOptions;

use ipm_fs::FileSystem;
use ipm_profile::ProfileCatalog;

/// Builds and reconciles IPM trees over a file-system collaborator.
pub struct IpmService<'a> {
    fs: &'a dyn FileSystem,
    options: ScanOptions,
    catalog: Option<&'a ProfileCatalog>,
}

impl<'a> IpmService<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self {
            fs,
            options: ScanOptions::default(),
            catalog: None,
        }
    }

    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    /// Profiles used to conform domain objects whose type a merge changes.
    /// Merging type changes fails without one.
    pub fn with_catalog(mut self, catalog: &'a ProfileCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }
}
