//! [`TestTree`] builder for scan, rule and merge scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use ipm_fs::NormalizedPath;
use tempfile::TempDir;

/// A temporary directory hierarchy with helpers for setup and assertion.
///
/// # Example
///
/// ```rust,no_run
/// use ipm_test_utils::TestTree;
///
/// let tree = TestTree::new()
///     .with_file("a.txt", "alpha")
///     .with_file("sub/b.txt", "beta");
/// assert!(tree.path("sub/b.txt").is_file());
/// ```
pub struct TestTree {
    /// Removes the hierarchy on drop
    _temp_dir: TempDir,
    root: PathBuf,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        // Resolve symlinked temp locations so scanned paths compare equal.
        let root = dunce::canonicalize(temp_dir.path()).unwrap();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// `root/{a.txt, sub/{b.txt}}`
    pub fn sample() -> Self {
        Self::new()
            .with_file("a.txt", "alpha")
            .with_file("sub/b.txt", "beta")
    }

    /// Filesystem root of the hierarchy.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Normalized path of the hierarchy root.
    pub fn root_path(&self) -> NormalizedPath {
        NormalizedPath::new(&self.root)
    }

    /// Normalized path of `rel` below the root.
    pub fn path(&self, rel: &str) -> NormalizedPath {
        self.root_path().join(rel)
    }

    pub fn with_file(self, rel: &str, content: &str) -> Self {
        self.write(rel, content);
        self
    }

    pub fn with_dir(self, rel: &str) -> Self {
        self.mkdir(rel);
        self
    }

    /// Write a file, creating missing parent directories.
    pub fn write(&self, rel: &str, content: &str) {
        let full_path = self.root.join(rel);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
    }

    pub fn mkdir(&self, rel: &str) {
        fs::create_dir_all(self.root.join(rel)).unwrap();
    }

    /// Remove a file or a whole directory.
    pub fn remove(&self, rel: &str) {
        let full_path = self.root.join(rel);
        if full_path.is_dir() {
            fs::remove_dir_all(&full_path).unwrap();
        } else {
            fs::remove_file(&full_path).unwrap();
        }
    }

    /// Rename keeping the modification time, as a move on one volume does.
    pub fn rename(&self, from: &str, to: &str) {
        let target = self.root.join(to);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::rename(self.root.join(from), target).unwrap();
    }

    /// Assert that `rel` exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_exists(&self, rel: &str) {
        let full_path = self.root.join(rel);
        assert!(
            full_path.exists(),
            "Expected path to exist: {}",
            full_path.display()
        );
    }
}
