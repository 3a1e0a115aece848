//! File-system collaborator for the Internal Package Model engine
//!
//! Provides normalized paths, read-only traversal with basic attributes,
//! content-format detection, and format-agnostic config loading.

pub mod config;
pub mod detect;
pub mod error;
pub mod io;
pub mod metadata;
pub mod path;
pub mod system;

pub use config::ConfigStore;
pub use detect::{FormatDetector, MimeDetector, PronomDetector};
pub use error::{Error, Result};
pub use metadata::{FileKind, FileMetadata};
pub use path::NormalizedPath;
pub use system::{FileSystem, LocalFileSystem};
