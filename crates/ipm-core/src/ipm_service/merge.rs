use std::collections::{BTreeMap, BTreeSet};

use ipm_profile::ProfileCatalog;
use ipm_store::{HAS_CHILD, ObjectStore, Relationship};

use super::{ChangeKind, ComparisonResult, IpmService, NodeComparison, NodeComparisonStatus, TreeSnapshot};
use crate::objects::{conform_properties, link_child};
use crate::{Error, IpmTree, NodeId, Result};

/// Counts of what a merge applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub added: usize,
    pub moved: usize,
    pub modified: usize,
    pub deleted: usize,
}

impl MergeReport {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl IpmService<'_> {
    /// Apply an accepted subset of a comparison to the existing tree.
    ///
    /// The whole plan is validated before anything changes. Additions and
    /// moves go first, parents before children; then modifications; then
    /// deletions, which also remove the domain objects of the deleted
    /// subtree. Nodes and properties the plan does not touch keep their
    /// identity and values. A merged type change conforms the node's
    /// existing values to the new type, which needs a catalog
    /// ([`IpmService::with_catalog`]).
    pub fn merge_tree(
        &self,
        existing: &mut IpmTree,
        store: &mut dyn ObjectStore,
        comparison: TreeSnapshot<'_>,
        plan: &ComparisonResult,
    ) -> Result<MergeReport> {
        validate_plan(existing, comparison, plan, self.catalog)?;

        let mut report = MergeReport::default();
        let order: BTreeMap<NodeId, usize> = comparison
            .tree
            .pre_order(comparison.tree.root())
            .into_iter()
            .enumerate()
            .map(|(i, id)| (id, i))
            .collect();

        let mut placements: Vec<&NodeComparison> = plan
            .entries()
            .iter()
            .filter(|e| is_addition(e) || is_move(e))
            .collect();
        placements.sort_by_key(|e| e.comparison.and_then(|id| order.get(&id).copied()));

        for entry in placements {
            let Some(new_id) = entry.comparison else {
                continue;
            };
            let parent = placement_parent(existing, &entry.path)?;
            match entry.existing {
                None => {
                    add_node(existing, store, comparison, new_id, parent)?;
                    report.added += 1;
                }
                Some(old_id) => {
                    move_node(existing, store, old_id, parent)?;
                    report.moved += 1;
                }
            }
            tracing::debug!(path = %entry.path, "placed node");
        }

        for entry in plan.entries() {
            let NodeComparisonStatus::Modified(changes) = &entry.status else {
                continue;
            };
            let (Some(old_id), Some(new_id)) = (entry.existing, entry.comparison) else {
                continue;
            };
            let changed: Vec<ChangeKind> = changes
                .iter()
                .copied()
                .filter(|c| *c != ChangeKind::Location)
                .collect();
            if changed.is_empty() {
                continue;
            }
            modify_node(existing, store, comparison, self.catalog, old_id, new_id, &changed)?;
            report.modified += 1;
        }

        for entry in plan.entries() {
            if entry.status != NodeComparisonStatus::Deleted {
                continue;
            }
            let Some(old_id) = entry.existing else {
                continue;
            };
            // Already gone with an ancestor deleted earlier in the plan.
            if !existing.contains(old_id) {
                continue;
            }
            for node in existing.remove_subtree(old_id)? {
                if let Some(oid) = node.object_id.filter(|oid| store.contains(*oid)) {
                    store.remove_object(oid)?;
                }
            }
            report.deleted += 1;
            tracing::debug!(path = %entry.path, "deleted subtree");
        }

        tracing::debug!(?report, "merged comparison");
        Ok(report)
    }
}

fn is_addition(entry: &NodeComparison) -> bool {
    entry.status == NodeComparisonStatus::Added
}

fn is_move(entry: &NodeComparison) -> bool {
    entry.status.has_change(ChangeKind::Location)
}

fn parent_rel(rel: &str) -> Option<&str> {
    if rel.is_empty() {
        return None;
    }
    Some(rel.rfind('/').map_or("", |idx| &rel[..idx]))
}

/// Check the whole plan against both trees before mutating anything.
fn validate_plan(
    existing: &IpmTree,
    comparison: TreeSnapshot<'_>,
    plan: &ComparisonResult,
    catalog: Option<&ProfileCatalog>,
) -> Result<()> {
    let mut deleted = BTreeSet::new();
    let mut incoming = BTreeSet::new();

    for entry in plan.changes() {
        if let Some(old_id) = entry.existing {
            if !existing.contains(old_id) {
                return Err(Error::merge_plan(format!(
                    "'{}' refers to a node missing from the existing tree",
                    entry.path
                )));
            }
        }
        if let Some(new_id) = entry.comparison {
            if !comparison.tree.contains(new_id) {
                return Err(Error::merge_plan(format!(
                    "'{}' refers to a node missing from the comparison tree",
                    entry.path
                )));
            }
        }

        match &entry.status {
            NodeComparisonStatus::Added => {
                if entry.comparison.is_none() || entry.path.is_empty() {
                    return Err(Error::merge_plan(format!(
                        "addition of '{}' has no comparison node",
                        entry.path
                    )));
                }
                if existing.find_by_relative(&entry.path).is_some() {
                    return Err(Error::merge_plan(format!(
                        "'{}' already exists in the existing tree",
                        entry.path
                    )));
                }
                incoming.insert(entry.path.as_str());
            }
            NodeComparisonStatus::Deleted => match entry.existing {
                Some(id) if id == existing.root() => {
                    return Err(Error::merge_plan("the tree root cannot be deleted"));
                }
                Some(id) => {
                    if let Some(rel) = existing.relative_path(id) {
                        deleted.insert(rel);
                    }
                }
                None => {
                    return Err(Error::merge_plan(format!(
                        "deletion of '{}' has no existing node",
                        entry.path
                    )));
                }
            },
            NodeComparisonStatus::Modified(changes) => {
                let Some(new_id) = entry.comparison.filter(|_| entry.existing.is_some()) else {
                    return Err(Error::merge_plan(format!(
                        "modification of '{}' needs nodes on both sides",
                        entry.path
                    )));
                };
                if changes.contains(&ChangeKind::Type) {
                    let incoming = comparison.tree.node(new_id)?.node_type();
                    match (catalog, incoming) {
                        (None, _) => {
                            return Err(Error::merge_plan(format!(
                                "type change of '{}' needs a profile catalog",
                                entry.path
                            )));
                        }
                        (Some(catalog), Some(node_type)) if catalog.node_type(node_type).is_none() => {
                            return Err(Error::merge_plan(format!(
                                "'{}' changes to unknown type '{}'",
                                entry.path, node_type
                            )));
                        }
                        _ => {}
                    }
                }
                if is_move(entry) {
                    if entry.existing == Some(existing.root()) {
                        return Err(Error::merge_plan("the tree root cannot be moved"));
                    }
                    if existing.find_by_relative(&entry.path).is_some() {
                        return Err(Error::merge_plan(format!(
                            "cannot move a node onto existing '{}'",
                            entry.path
                        )));
                    }
                    incoming.insert(entry.path.as_str());
                }
            }
            NodeComparisonStatus::Unchanged => {}
        }
    }

    let under_deletion = |rel: &str| {
        deleted
            .iter()
            .any(|d| rel == d || rel.starts_with(&format!("{}/", d)))
    };
    for entry in plan.changes().filter(|e| is_addition(e) || is_move(e)) {
        let Some(parent) = parent_rel(&entry.path) else {
            continue;
        };
        let present = existing.find_by_relative(parent).is_some() && !under_deletion(parent);
        if !present && !incoming.contains(parent) {
            return Err(Error::merge_plan(format!(
                "parent '{}' of '{}' is neither present nor accepted",
                parent, entry.path
            )));
        }
    }
    Ok(())
}

fn placement_parent(existing: &IpmTree, rel: &str) -> Result<NodeId> {
    parent_rel(rel)
        .and_then(|parent| existing.find_by_relative(parent))
        .ok_or_else(|| Error::merge_plan(format!("no parent to place '{}' under", rel)))
}

fn add_node(
    existing: &mut IpmTree,
    store: &mut dyn ObjectStore,
    comparison: TreeSnapshot<'_>,
    new_id: NodeId,
    parent: NodeId,
) -> Result<NodeId> {
    let source = comparison.tree.node(new_id)?;
    let mut record = source.record.clone();
    record.metadata.path = existing.node(parent)?.path().join(source.name());

    let id = existing.add_child(parent, record)?;
    let parent_object = existing.node(parent)?.object_id;
    let node = existing.node_mut(id)?;
    node.ignored = source.ignored;

    if let Some(node_type) = &source.node_type {
        let oid = store.create_object(node_type)?;
        for value in comparison.properties(source)? {
            store.add_property(oid, value)?;
        }
        node.node_type = Some(node_type.clone());
        node.object_id = Some(oid);
        if let Some(parent) = parent_object.filter(|p| store.contains(*p)) {
            link_child(store, parent, oid)?;
        }
    }
    Ok(id)
}

fn move_node(
    existing: &mut IpmTree,
    store: &mut dyn ObjectStore,
    old_id: NodeId,
    parent: NodeId,
) -> Result<()> {
    let old_parent_object = existing
        .parent(old_id)
        .and_then(|p| existing.get(p))
        .and_then(|p| p.object_id);
    existing.move_node(old_id, parent)?;

    if let Some(oid) = existing.node(old_id)?.object_id {
        if let Some(old_parent) = old_parent_object {
            store.remove_relationship(&Relationship::new(old_parent, HAS_CHILD, oid))?;
        }
        if let Some(new_parent) = existing.node(parent)?.object_id.filter(|p| store.contains(*p)) {
            link_child(store, new_parent, oid)?;
        }
    }
    Ok(())
}

fn modify_node(
    existing: &mut IpmTree,
    store: &mut dyn ObjectStore,
    comparison: TreeSnapshot<'_>,
    catalog: Option<&ProfileCatalog>,
    old_id: NodeId,
    new_id: NodeId,
    changes: &[ChangeKind],
) -> Result<()> {
    let source = comparison.tree.node(new_id)?;
    let parent_object = existing
        .parent(old_id)
        .and_then(|p| existing.get(p))
        .and_then(|p| p.object_id);
    let node = existing.node_mut(old_id)?;

    if changes.contains(&ChangeKind::Metadata) {
        let path = node.path().clone();
        node.record = source.record.clone();
        node.record.metadata.path = path;
    }

    if changes.contains(&ChangeKind::Type) {
        if let (Some(node_type), Some(catalog)) = (&source.node_type, catalog) {
            match node.object_id.filter(|oid| store.contains(*oid)) {
                Some(oid) => {
                    store.update_object(oid, node_type)?;
                    let dropped = conform_properties(catalog, store, oid, node_type)?;
                    tracing::trace!(path = %node.path(), %node_type, dropped, "retyped object");
                }
                None => {
                    let oid = store.create_object(node_type)?;
                    node.object_id = Some(oid);
                    if let Some(parent) = parent_object.filter(|p| store.contains(*p)) {
                        link_child(store, parent, oid)?;
                    }
                }
            }
            node.node_type = Some(node_type.clone());
        }
    }

    if changes.contains(&ChangeKind::Properties) {
        if let Some(oid) = node.object_id.filter(|oid| store.contains(*oid)) {
            let incoming = comparison.properties(source)?;
            let names: BTreeSet<&str> = incoming.iter().map(|p| p.property.as_str()).collect();
            for name in names {
                let values = incoming
                    .iter()
                    .filter(|p| p.property == name)
                    .cloned()
                    .collect();
                store.replace_property(oid, name, values)?;
            }
        }
    }
    Ok(())
}
