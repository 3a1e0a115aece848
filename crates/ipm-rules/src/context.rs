//! Evaluation context

use ipm_fs::NormalizedPath;

/// The only input to a rule operation: the entry under evaluation, the
/// root of the tree it belongs to, and whether its node is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContext {
    pub file: NormalizedPath,
    pub root: NormalizedPath,
    pub ignored: bool,
}

impl FileContext {
    pub fn new(file: NormalizedPath, root: NormalizedPath) -> Self {
        Self {
            file,
            root,
            ignored: false,
        }
    }

    pub fn ignored(mut self, ignored: bool) -> Self {
        self.ignored = ignored;
        self
    }

    /// Context for another entry of the same tree.
    pub fn for_file(&self, file: NormalizedPath) -> Self {
        Self {
            file,
            root: self.root.clone(),
            ignored: self.ignored,
        }
    }

    pub fn is_root(&self) -> bool {
        self.file == self.root
    }
}
