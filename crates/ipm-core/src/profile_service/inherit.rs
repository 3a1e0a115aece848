use ipm_store::{ObjectStore, PropertyValue};

use super::DomainProfileService;
use crate::{IpmTree, NodeId, Result};

impl DomainProfileService<'_> {
    /// Copy the node's inheritable property values to its descendants.
    ///
    /// A typed, non-ignored descendant receives the values of a property
    /// only when it has none of its own and its type admits the property,
    /// up to the type's maximum. Returns the number of values copied.
    pub fn propagate_inherited_properties(
        &self,
        tree: &IpmTree,
        store: &mut dyn ObjectStore,
        id: NodeId,
    ) -> Result<usize> {
        let (_, oid) = self.typed_object(tree, store, id)?;
        let inherited: Vec<PropertyValue> = store
            .get_properties(oid)?
            .into_iter()
            .filter(|v| self.catalog.is_inheritable(&v.property))
            .collect();
        if inherited.is_empty() {
            return Ok(0);
        }

        let mut copied = 0;
        let mut pending: Vec<NodeId> = tree.children(id).iter().rev().copied().collect();
        while let Some(current) = pending.pop() {
            let node = tree.node(current)?;
            if node.ignored {
                continue;
            }
            pending.extend(tree.children(current).iter().rev().copied());

            let (Some(node_type), Some(target)) = (node.node_type(), node.object_id) else {
                continue;
            };
            if !store.contains(target) {
                continue;
            }
            let object = store.get_object(target)?;
            for value in &inherited {
                let Some(constraint) = self.catalog.constraint(node_type, &value.property) else {
                    continue;
                };
                if object.count_of(&value.property) > 0 {
                    continue;
                }
                let already = store
                    .get_properties(target)?
                    .iter()
                    .filter(|v| v.property == value.property)
                    .count();
                if constraint.has_room(already) {
                    store.add_property(target, value.clone())?;
                    copied += 1;
                }
            }
        }
        tracing::debug!(node = %id, copied, "propagated inherited properties");
        Ok(copied)
    }
}
