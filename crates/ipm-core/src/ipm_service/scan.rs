use ipm_fs::NormalizedPath;
use ipm_rules::Evaluator;
use serde::{Deserialize, Serialize};

use super::IpmService;
use crate::{IpmTree, Result};

/// Options for building a tree from the file system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    /// Include entries whose name starts with a dot
    pub include_hidden: bool,
    /// Deepest level scanned below the root; the root is level 0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            include_hidden: true,
            max_depth: None,
        }
    }
}

impl ScanOptions {
    fn admits(&self, path: &NormalizedPath) -> bool {
        self.include_hidden || !path.file_name().is_some_and(|n| n.starts_with('.'))
    }

    fn descends(&self, depth: usize) -> bool {
        self.max_depth.is_none_or(|max| depth < max)
    }
}

impl IpmService<'_> {
    /// Build a tree mirroring the file-system subtree at `path`.
    ///
    /// Children are inserted in name order. Entries that disappear or
    /// become unreadable while the walk is in progress are skipped; an
    /// unreadable root fails the scan.
    pub fn create_tree_from_file_system(&self, path: &NormalizedPath) -> Result<IpmTree> {
        let evaluator = Evaluator::new(self.fs);
        let mut tree = IpmTree::new(evaluator.describe(path)?);
        let root = tree.root();

        let mut pending = vec![(root, 0usize)];
        while let Some((id, depth)) = pending.pop() {
            let node = tree.node(id)?;
            if !node.is_dir() || !self.options.descends(depth) {
                continue;
            }
            let dir = node.path().clone();

            let children = match self.fs.list_children(&dir) {
                Ok(children) => children,
                Err(e) if id != root && e.is_unreadable() => {
                    tracing::debug!(path = %dir, "skipping unreadable directory");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            for child in children.into_iter().filter(|c| self.options.admits(c)) {
                let record = match evaluator.describe(&child) {
                    Ok(record) => record,
                    Err(ipm_rules::Error::PathUnreadable { .. }) => {
                        tracing::debug!(path = %child, "skipping unreadable entry");
                        continue;
                    }
                    Err(e) => return Err(e.into()),
                };
                let child_id = tree.add_child(id, record)?;
                pending.push((child_id, depth + 1));
            }
        }

        tracing::debug!(root = %path, nodes = tree.len(), "scanned tree");
        Ok(tree)
    }
}
