use std::collections::BTreeSet;

use ipm_profile::{NodeTransform, ProfileCatalog};
use ipm_store::{ObjectStore, PropertyValue};

use super::{DomainProfileService, active_children};
use crate::{Error, IpmTree, NodeId, Result};

impl DomainProfileService<'_> {
    /// Transforms offered for a typed node.
    ///
    /// A transform is offered when its source is the node's type and its
    /// target is permitted both under the node's parent and over every
    /// non-ignored typed child.
    pub fn get_node_transforms(&self, tree: &IpmTree, id: NodeId) -> Result<Vec<NodeTransform>> {
        let node = tree.node(id)?;
        let Some(source) = node.node_type() else {
            return Ok(Vec::new());
        };

        let mut offered = Vec::new();
        for transform in self.catalog.transforms_from(source) {
            if self.catalog.node_type(&transform.target).is_some()
                && self.fits_parent(tree, id, &transform.target)?
                && self.fits_children(tree, id, &transform.target)
            {
                offered.push(transform.clone());
            }
        }
        Ok(offered)
    }

    /// Change a node's type through an offered transform, migrating its
    /// property values by the transform's policy.
    ///
    /// Returns whether the node and its direct children validate in their
    /// positions afterwards.
    pub fn transform_node(
        &self,
        tree: &mut IpmTree,
        store: &mut dyn ObjectStore,
        id: NodeId,
        transform: &NodeTransform,
    ) -> Result<bool> {
        if !self.get_node_transforms(tree, id)?.contains(transform) {
            return Err(Error::TransformNotApplicable {
                transform: transform.to_string(),
                path: tree.node(id)?.path().to_string(),
            });
        }
        let (_, oid) = self.typed_object(tree, store, id)?;

        let old = store.get_properties(oid)?;
        let migrated = migrate(self.catalog, transform, &old);
        let names: BTreeSet<&str> = old.iter().map(|v| v.property.as_str()).collect();
        for name in names {
            store.remove_property(oid, name, None)?;
        }
        store.update_object(oid, &transform.target)?;
        let kept = migrated.len();
        for value in migrated {
            store.add_property(oid, value)?;
        }
        tree.node_mut(id)?.node_type = Some(transform.target.clone());

        let mut valid = self.violation(tree, store, id, false)?.is_none();
        for child in active_children(tree, id) {
            if tree.node(child)?.is_typed() {
                valid &= self.violation(tree, store, child, false)?.is_none();
            }
        }
        tracing::debug!(node = %id, %transform, kept, dropped = old.len() - kept, valid, "transformed node");
        Ok(valid)
    }
}

/// Values surviving `transform`, in their original order.
fn migrate(
    catalog: &ProfileCatalog,
    transform: &NodeTransform,
    values: &[PropertyValue],
) -> Vec<PropertyValue> {
    let mut migrated: Vec<PropertyValue> = Vec::new();
    for value in values {
        let Some(name) = transform.migrated_name(&value.property) else {
            continue;
        };
        let Some(constraint) = catalog.constraint(&transform.target, name) else {
            continue;
        };
        let count = migrated.iter().filter(|m| m.property == name).count();
        if constraint.has_room(count) {
            migrated.push(value.renamed(name));
        }
    }
    migrated
}
