use std::collections::{BTreeMap, BTreeSet};

use ipm_fs::FileKind;
use ipm_store::{ObjectStore, PropertyValue};
use serde::{Deserialize, Serialize};

use super::IpmService;
use crate::{IpmTree, Node, NodeId, Result};

/// What changed about a node present in both trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Kind, size, modification time or format
    Metadata,
    Type,
    Properties,
    /// The node was moved
    Location,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "changes", rename_all = "lowercase")]
pub enum NodeComparisonStatus {
    /// Only in the comparison tree
    Added,
    /// Only in the existing tree
    Deleted,
    Modified(Vec<ChangeKind>),
    Unchanged,
}

impl NodeComparisonStatus {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    pub fn changes(&self) -> &[ChangeKind] {
        match self {
            Self::Modified(changes) => changes,
            _ => &[],
        }
    }

    pub fn has_change(&self, kind: ChangeKind) -> bool {
        self.changes().contains(&kind)
    }
}

/// Classification of one correlated node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeComparison {
    /// Path relative to the tree root, on the comparison side when the
    /// node exists there
    pub path: String,
    pub existing: Option<NodeId>,
    pub comparison: Option<NodeId>,
    pub status: NodeComparisonStatus,
}

/// Outcome of [`IpmService::compare_tree`]; filter it with
/// [`ComparisonResult::accepted`] before merging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonResult {
    entries: Vec<NodeComparison>,
}

impl ComparisonResult {
    pub fn entries(&self) -> &[NodeComparison] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&NodeComparison> {
        self.entries.iter().find(|e| e.path == path)
    }

    pub fn status_of(&self, path: &str) -> Option<&NodeComparisonStatus> {
        self.get(path).map(|e| &e.status)
    }

    /// Every node unchanged.
    pub fn is_unchanged(&self) -> bool {
        self.entries.iter().all(|e| e.status.is_unchanged())
    }

    /// Entries that are not unchanged.
    pub fn changes(&self) -> impl Iterator<Item = &NodeComparison> {
        self.entries.iter().filter(|e| !e.status.is_unchanged())
    }

    /// The subset of entries the caller accepts for merging.
    pub fn accepted(&self, mut predicate: impl FnMut(&NodeComparison) -> bool) -> Self {
        Self {
            entries: self.entries.iter().filter(|e| predicate(e)).cloned().collect(),
        }
    }
}

/// A tree together with the store holding its domain objects.
#[derive(Clone, Copy)]
pub struct TreeSnapshot<'a> {
    pub tree: &'a IpmTree,
    pub store: &'a dyn ObjectStore,
}

impl<'a> TreeSnapshot<'a> {
    pub fn new(tree: &'a IpmTree, store: &'a dyn ObjectStore) -> Self {
        Self { tree, store }
    }

    /// Relative path -> node, in pre-order.
    pub(crate) fn index(&self) -> Vec<(String, NodeId)> {
        let tree = self.tree;
        tree.pre_order(tree.root())
            .into_iter()
            .filter_map(|id| tree.relative_path(id).map(|rel| (rel, id)))
            .collect()
    }

    pub(crate) fn properties(&self, node: &Node) -> Result<Vec<PropertyValue>> {
        match node.object_id {
            Some(oid) if self.store.contains(oid) => Ok(self.store.get_properties(oid)?),
            _ => Ok(Vec::new()),
        }
    }
}

impl IpmService<'_> {
    /// Classify every node of both trees without mutating either.
    ///
    /// Nodes correlate by their path relative to each tree's root. An
    /// unmatched deleted file and an unmatched added file with the same
    /// name, size and modification time are reported as one node modified
    /// by [`ChangeKind::Location`].
    pub fn compare_tree(
        &self,
        existing: TreeSnapshot<'_>,
        comparison: TreeSnapshot<'_>,
    ) -> Result<ComparisonResult> {
        let comparison_index = comparison.index();
        let comparison_paths: BTreeMap<&str, NodeId> = comparison_index
            .iter()
            .map(|(rel, id)| (rel.as_str(), *id))
            .collect();

        let mut entries = Vec::new();
        let mut matched = BTreeSet::new();
        for (rel, old_id) in existing.index() {
            match comparison_paths.get(rel.as_str()) {
                Some(&new_id) => {
                    matched.insert(new_id);
                    let changes = diff(existing, old_id, comparison, new_id)?;
                    let status = if changes.is_empty() {
                        NodeComparisonStatus::Unchanged
                    } else {
                        NodeComparisonStatus::Modified(changes)
                    };
                    entries.push(NodeComparison {
                        path: rel,
                        existing: Some(old_id),
                        comparison: Some(new_id),
                        status,
                    });
                }
                None => entries.push(NodeComparison {
                    path: rel,
                    existing: Some(old_id),
                    comparison: None,
                    status: NodeComparisonStatus::Deleted,
                }),
            }
        }

        let mut added: Vec<(String, NodeId)> = comparison_index
            .into_iter()
            .filter(|(_, id)| !matched.contains(id))
            .collect();

        for entry in entries
            .iter_mut()
            .filter(|e| e.status == NodeComparisonStatus::Deleted)
        {
            let Some(old_id) = entry.existing else {
                continue;
            };
            let old = existing.tree.node(old_id)?;
            let position = added.iter().position(|(_, new_id)| {
                comparison
                    .tree
                    .get(*new_id)
                    .is_some_and(|new| same_file(old, new))
            });
            let Some(position) = position else {
                continue;
            };
            let (rel, new_id) = added.remove(position);
            let mut changes = diff(existing, old_id, comparison, new_id)?;
            changes.push(ChangeKind::Location);
            changes.sort();
            changes.dedup();
            tracing::debug!(from = %entry.path, to = %rel, "detected moved file");
            entry.path = rel;
            entry.comparison = Some(new_id);
            entry.status = NodeComparisonStatus::Modified(changes);
        }

        entries.extend(added.into_iter().map(|(rel, new_id)| NodeComparison {
            path: rel,
            existing: None,
            comparison: Some(new_id),
            status: NodeComparisonStatus::Added,
        }));

        let result = ComparisonResult { entries };
        tracing::debug!(
            nodes = result.len(),
            changes = result.changes().count(),
            "compared trees"
        );
        Ok(result)
    }
}

/// Change kinds between two correlated nodes.
fn diff(
    existing: TreeSnapshot<'_>,
    old_id: NodeId,
    comparison: TreeSnapshot<'_>,
    new_id: NodeId,
) -> Result<Vec<ChangeKind>> {
    let old = existing.tree.node(old_id)?;
    let new = comparison.tree.node(new_id)?;
    let mut changes = Vec::new();

    if metadata_differs(old, new) {
        changes.push(ChangeKind::Metadata);
    }
    if new.node_type.is_some() && new.node_type != old.node_type {
        changes.push(ChangeKind::Type);
    }

    let new_props = comparison.properties(new)?;
    if !new_props.is_empty() {
        let old_props = existing.properties(old)?;
        let carried: BTreeSet<&str> = new_props.iter().map(|p| p.property.as_str()).collect();
        if carried
            .into_iter()
            .any(|name| values_of(&old_props, name) != values_of(&new_props, name))
        {
            changes.push(ChangeKind::Properties);
        }
    }
    Ok(changes)
}

/// Directory timestamps follow their children, which are compared on
/// their own, so only file timestamps count.
fn metadata_differs(old: &Node, new: &Node) -> bool {
    let (a, b) = (&old.record.metadata, &new.record.metadata);
    a.kind != b.kind
        || a.size != b.size
        || old.record.format != new.record.format
        || (a.kind == FileKind::File && a.modified != b.modified)
}

fn same_file(old: &Node, new: &Node) -> bool {
    let (a, b) = (&old.record.metadata, &new.record.metadata);
    a.kind == FileKind::File
        && b.kind == FileKind::File
        && old.name() == new.name()
        && a.size == b.size
        && a.modified.is_some()
        && a.modified == b.modified
}

fn values_of<'a>(props: &'a [PropertyValue], name: &str) -> Vec<(&'a str, Option<&'a str>)> {
    let mut values: Vec<_> = props
        .iter()
        .filter(|p| p.property == name)
        .map(|p| (p.value.as_str(), p.group.as_deref()))
        .collect();
    values.sort();
    values
}
