//! Domain profile service
//!
//! Assigns node types to tree nodes, keeps their domain objects in step,
//! validates trees against the profile catalog, applies node transforms
//! and propagates inheritable properties.
//!
//! The catalog is borrowed for the lifetime of the service and never
//! changes; tree and store are passed to each call by exclusive reference.

mod assign;
mod inherit;
mod properties;
mod transform;
mod validate;

use ipm_fs::FileSystem;
use ipm_profile::ProfileCatalog;
use ipm_rules::{Evaluator, RuleSet};
use ipm_store::{ObjectId, ObjectStore};

use crate::{Error, IpmTree, NodeId, Result};

pub struct DomainProfileService<'a> {
    catalog: &'a ProfileCatalog,
    fs: &'a dyn FileSystem,
    rules: Option<&'a RuleSet>,
}

impl<'a> DomainProfileService<'a> {
    pub fn new(catalog: &'a ProfileCatalog, fs: &'a dyn FileSystem) -> Self {
        Self {
            catalog,
            fs,
            rules: None,
        }
    }

    /// Filter candidate types and derive property values with `rules`.
    pub fn with_rules(mut self, rules: &'a RuleSet) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn catalog(&self) -> &ProfileCatalog {
        self.catalog
    }

    fn evaluator(&self) -> Evaluator<'a> {
        Evaluator::new(self.fs)
    }

    /// Type and live domain object of a typed node.
    fn typed_object(
        &self,
        tree: &IpmTree,
        store: &dyn ObjectStore,
        id: NodeId,
    ) -> Result<(String, ObjectId)> {
        let node = tree.node(id)?;
        match (&node.node_type, node.object_id) {
            (Some(node_type), Some(oid)) if store.contains(oid) => Ok((node_type.clone(), oid)),
            _ => Err(Error::precondition(format!(
                "{} has no assigned type",
                node.path()
            ))),
        }
    }

    /// Type of the parent of `id`; `Ok(None)` for the root.
    fn parent_type(&self, tree: &IpmTree, id: NodeId) -> Result<Option<Option<String>>> {
        match tree.parent(id) {
            Some(parent) => Ok(Some(tree.node(parent)?.node_type.clone())),
            None => Ok(None),
        }
    }

    /// Whether `node_type` may sit where `id` sits, given its parent.
    fn fits_parent(&self, tree: &IpmTree, id: NodeId, node_type: &str) -> Result<bool> {
        Ok(match self.parent_type(tree, id)? {
            None => self.catalog.is_root_type(node_type),
            Some(Some(parent)) => self.catalog.allows(&parent, node_type),
            Some(None) => false,
        })
    }

    /// Whether every non-ignored typed child of `id` may sit under `node_type`.
    fn fits_children(&self, tree: &IpmTree, id: NodeId, node_type: &str) -> bool {
        tree.children(id)
            .iter()
            .filter_map(|c| tree.get(*c))
            .filter(|c| !c.ignored)
            .filter_map(|c| c.node_type())
            .all(|child| self.catalog.allows(node_type, child))
    }
}

/// Non-ignored children of a node.
fn active_children(tree: &IpmTree, id: NodeId) -> Vec<NodeId> {
    tree.children(id)
        .iter()
        .copied()
        .filter(|c| tree.get(*c).is_some_and(|n| !n.ignored))
        .collect()
}
