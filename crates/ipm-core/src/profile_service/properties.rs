use ipm_store::{ObjectStore, PropertyValue};

use super::DomainProfileService;
use crate::{Error, IpmTree, NodeId, Result};

impl DomainProfileService<'_> {
    /// Node types the node could take in its current position: permitted
    /// under its parent, passing type rules, and accepting every
    /// non-ignored typed child. Catalog order, current type first.
    pub fn valid_node_types(&self, tree: &IpmTree, id: NodeId) -> Result<Vec<String>> {
        let parent_type = match self.parent_type(tree, id)? {
            None => None,
            Some(Some(parent)) => Some(parent),
            Some(None) => return Ok(Vec::new()),
        };
        let evaluator = self.evaluator();
        let candidates = self.candidates(&evaluator, tree, id, parent_type.as_deref())?;
        Ok(candidates
            .into_iter()
            .filter(|t| self.fits_children(tree, id, t))
            .collect())
    }

    /// Add one value to a typed node, respecting its type's constraints.
    pub fn set_property(
        &self,
        tree: &IpmTree,
        store: &mut dyn ObjectStore,
        id: NodeId,
        value: PropertyValue,
    ) -> Result<()> {
        let (node_type, oid) = self.typed_object(tree, store, id)?;
        let Some(constraint) = self.catalog.constraint(&node_type, &value.property) else {
            return Err(Error::PropertyNotAdmitted {
                node_type,
                property: value.property,
            });
        };
        let count = store.get_object(oid)?.count_of(&value.property);
        if !constraint.has_room(count) {
            return Err(Error::TooManyValues {
                node_type,
                property: value.property,
                max: constraint.max.unwrap_or_default(),
            });
        }
        store.add_property(oid, value)?;
        Ok(())
    }

    /// Remove values of `property` from a typed node, all of them when
    /// `value` is `None`. Returns how many were removed.
    pub fn remove_property(
        &self,
        tree: &IpmTree,
        store: &mut dyn ObjectStore,
        id: NodeId,
        property: &str,
        value: Option<&str>,
    ) -> Result<usize> {
        let (_, oid) = self.typed_object(tree, store, id)?;
        Ok(store.remove_property(oid, property, value)?)
    }
}
