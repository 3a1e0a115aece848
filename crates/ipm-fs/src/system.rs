//! Read-only file-system traversal
//!
//! The engine only ever lists children, reads basic attributes and asks
//! for a content format. [`FileSystem`] is that seam; [`LocalFileSystem`]
//! is the implementation backed by `std::fs`.

use std::fs;

use crate::{Error, FileMetadata, FormatDetector, MimeDetector, NormalizedPath, Result};

/// Read-only file-system collaborator.
pub trait FileSystem {
    /// Basic attributes of `path`.
    ///
    /// Fails with [`Error::PathUnreadable`] when the entry does not exist
    /// or cannot be read.
    fn metadata(&self, path: &NormalizedPath) -> Result<FileMetadata>;

    /// Direct children of a directory, sorted by name. Files have none.
    fn list_children(&self, path: &NormalizedPath) -> Result<Vec<NormalizedPath>>;

    /// Detected format identifier (MIME type or PRONOM URI).
    fn detect_format(&self, path: &NormalizedPath) -> Result<Option<String>>;
}

/// [`FileSystem`] over the local disk.
pub struct LocalFileSystem {
    detector: Box<dyn FormatDetector>,
    follow_links: bool,
}

impl Default for LocalFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalFileSystem {
    /// Local file system with MIME detection, not following symlinks.
    pub fn new() -> Self {
        Self {
            detector: Box::new(MimeDetector),
            follow_links: false,
        }
    }

    pub fn with_detector(detector: Box<dyn FormatDetector>) -> Self {
        Self {
            detector,
            follow_links: false,
        }
    }

    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Resolve a scan root to an absolute normalized path.
    pub fn canonicalize(&self, path: &NormalizedPath) -> Result<NormalizedPath> {
        let native = path.to_native();
        dunce::canonicalize(&native)
            .map(NormalizedPath::new)
            .map_err(|e| Error::from_read(&native, e))
    }

    fn std_metadata(&self, path: &NormalizedPath) -> Result<fs::Metadata> {
        let native = path.to_native();
        let meta = if self.follow_links {
            fs::metadata(&native)
        } else {
            fs::symlink_metadata(&native)
        };
        meta.map_err(|e| Error::from_read(&native, e))
    }
}

impl FileSystem for LocalFileSystem {
    fn metadata(&self, path: &NormalizedPath) -> Result<FileMetadata> {
        let meta = self.std_metadata(path)?;
        Ok(FileMetadata::from_std(path.clone(), &meta))
    }

    fn list_children(&self, path: &NormalizedPath) -> Result<Vec<NormalizedPath>> {
        let meta = self.std_metadata(path)?;
        if !meta.is_dir() {
            return Ok(Vec::new());
        }

        let native = path.to_native();
        let entries = fs::read_dir(&native).map_err(|e| Error::from_read(&native, e))?;

        let mut children = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(&native, e))?;
            children.push(path.join(&entry.file_name().to_string_lossy()));
        }
        children.sort();
        tracing::trace!(path = %path, count = children.len(), "listed children");
        Ok(children)
    }

    fn detect_format(&self, path: &NormalizedPath) -> Result<Option<String>> {
        let meta = self.metadata(path)?;
        self.detector.detect(path, meta.kind)
    }
}
