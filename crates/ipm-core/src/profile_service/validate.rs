use ipm_store::ObjectStore;

use super::DomainProfileService;
use crate::{IpmTree, NodeId, Result};

impl DomainProfileService<'_> {
    /// Whether the subtree at `id` satisfies the profile.
    ///
    /// Every non-ignored node must carry a known type that is permitted
    /// under its parent's type, or root-eligible at the tree root. With
    /// `check_properties`, each node's property value counts must also
    /// fall within its type's constraints. Ignored subtrees are skipped.
    pub fn validate_tree(
        &self,
        tree: &IpmTree,
        store: &dyn ObjectStore,
        id: NodeId,
        check_properties: bool,
    ) -> Result<bool> {
        tree.node(id)?;
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            let node = tree.node(current)?;
            if node.ignored {
                continue;
            }
            if let Some(reason) = self.violation(tree, store, current, check_properties)? {
                tracing::debug!(path = %node.path(), %reason, "tree is not valid");
                return Ok(false);
            }
            pending.extend(tree.children(current).iter().rev().copied());
        }
        Ok(true)
    }

    /// First constraint `id` breaks, if any.
    pub(super) fn violation(
        &self,
        tree: &IpmTree,
        store: &dyn ObjectStore,
        id: NodeId,
        check_properties: bool,
    ) -> Result<Option<String>> {
        let node = tree.node(id)?;
        let Some(type_name) = node.node_type() else {
            return Ok(Some("untyped".to_string()));
        };
        let Some(node_type) = self.catalog.node_type(type_name) else {
            return Ok(Some(format!("unknown node type '{}'", type_name)));
        };
        if !self.fits_parent(tree, id, type_name)? {
            return Ok(Some(format!("'{}' is not permitted here", type_name)));
        }
        if !check_properties {
            return Ok(None);
        }

        let values = match node.object_id.filter(|oid| store.contains(*oid)) {
            Some(oid) => store.get_properties(oid)?,
            None => Vec::new(),
        };
        for constraint in &node_type.properties {
            let count = values
                .iter()
                .filter(|v| v.property == constraint.property)
                .count();
            if !constraint.admits(count) {
                return Ok(Some(format!(
                    "{} value(s) of '{}' outside [{}, {}]",
                    count,
                    constraint.property,
                    constraint.min,
                    constraint
                        .max
                        .map_or_else(|| "unbounded".to_string(), |m| m.to_string())
                )));
            }
        }
        if let Some(stray) = values.iter().find(|v| node_type.constraint(&v.property).is_none()) {
            return Ok(Some(format!(
                "'{}' does not admit property '{}'",
                type_name, stray.property
            )));
        }
        Ok(None)
    }
}
