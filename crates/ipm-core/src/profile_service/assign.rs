use std::collections::HashMap;

use ipm_rules::Evaluator;
use ipm_store::{ObjectId, ObjectStore};

use super::{DomainProfileService, active_children};
use crate::objects::{conform_properties, link_child};
use crate::{Error, IpmTree, NodeId, Result};

/// Solved sub-problems: (node, parent type) -> chosen type, or `None`
/// when no type of the node's subtree fits under that parent type.
type Memo = HashMap<(NodeId, Option<String>), Option<String>>;

/// Depth-first backtracking over one subtree.
struct Search<'s, 'a> {
    service: &'s DomainProfileService<'a>,
    evaluator: &'s Evaluator<'a>,
    tree: &'s IpmTree,
    memo: Memo,
}

impl Search<'_, '_> {
    fn solve(&mut self, id: NodeId, parent_type: Option<&str>) -> Result<Option<String>> {
        let key = (id, parent_type.map(str::to_string));
        if let Some(solved) = self.memo.get(&key) {
            return Ok(solved.clone());
        }

        let children = active_children(self.tree, id);
        let mut chosen = None;
        for candidate in self
            .service
            .candidates(self.evaluator, self.tree, id, parent_type)?
        {
            let mut satisfied = true;
            for &child in &children {
                if self.solve(child, Some(candidate.as_str()))?.is_none() {
                    satisfied = false;
                    break;
                }
            }
            if satisfied {
                chosen = Some(candidate);
                break;
            }
            tracing::trace!(node = %id, candidate = %candidate, "backtracking");
        }

        self.memo.insert(key, chosen.clone());
        Ok(chosen)
    }

    /// Chosen `(node, type)` pairs of the solved subtree, parents first.
    fn assignment(&self, id: NodeId, node_type: String, out: &mut Vec<(NodeId, String)>) {
        let children = active_children(self.tree, id);
        out.push((id, node_type.clone()));
        for child in children {
            if let Some(Some(child_type)) = self.memo.get(&(child, Some(node_type.clone()))) {
                self.assignment(child, child_type.clone(), out);
            }
        }
    }
}

impl DomainProfileService<'_> {
    /// Assign node types to `id` and its non-ignored descendants.
    ///
    /// Returns `Ok(false)` and changes nothing when no assignment satisfies
    /// the profile. On success every node of the subtree is typed, has a
    /// domain object linked to its parent's, and objects created by this
    /// call receive the values of matching property rules.
    pub fn assign_node_types(
        &self,
        tree: &mut IpmTree,
        store: &mut dyn ObjectStore,
        id: NodeId,
    ) -> Result<bool> {
        let node = tree.node(id)?;
        if node.ignored {
            tracing::debug!(path = %node.path(), "skipping ignored node");
            return Ok(true);
        }
        let parent_type = match self.parent_type(tree, id)? {
            None => None,
            Some(Some(parent)) => Some(parent),
            Some(None) => {
                return Err(Error::precondition(format!(
                    "parent of {} has no assigned type",
                    node.path()
                )));
            }
        };

        let evaluator = self.evaluator();
        let mut search = Search {
            service: self,
            evaluator: &evaluator,
            tree: &*tree,
            memo: Memo::new(),
        };
        let Some(node_type) = search.solve(id, parent_type.as_deref())? else {
            tracing::debug!(node = %id, "no valid type assignment");
            return Ok(false);
        };
        let mut assignment = Vec::new();
        search.assignment(id, node_type, &mut assignment);
        tracing::debug!(
            node = %id,
            nodes = assignment.len(),
            solved = search.memo.len(),
            "found type assignment"
        );

        for (node_id, node_type) in assignment {
            self.commit(&evaluator, tree, store, node_id, &node_type)?;
        }
        Ok(true)
    }

    /// Candidate types for a node under `parent_type`, current type first
    /// then catalog order, filtered by type rules.
    pub(super) fn candidates(
        &self,
        evaluator: &Evaluator<'_>,
        tree: &IpmTree,
        id: NodeId,
        parent_type: Option<&str>,
    ) -> Result<Vec<String>> {
        let node = tree.node(id)?;
        let mut ordered: Vec<&str> = node.node_type().into_iter().collect();
        for node_type in self.catalog.node_types() {
            if !ordered.contains(&node_type.name.as_str()) {
                ordered.push(&node_type.name);
            }
        }

        let ctx = tree.context(id)?;
        let mut candidates = Vec::new();
        for name in ordered {
            let placed = match parent_type {
                None => self.catalog.is_root_type(name),
                Some(parent) => self.catalog.allows(parent, name),
            };
            if !placed {
                continue;
            }
            if let Some(rules) = self.rules {
                if !rules.admits_type(evaluator, &ctx, name)? {
                    continue;
                }
            }
            candidates.push(name.to_string());
        }
        Ok(candidates)
    }

    fn commit(
        &self,
        evaluator: &Evaluator<'_>,
        tree: &mut IpmTree,
        store: &mut dyn ObjectStore,
        id: NodeId,
        node_type: &str,
    ) -> Result<()> {
        let parent_object = tree
            .parent(id)
            .and_then(|p| tree.get(p))
            .and_then(|p| p.object_id);
        let current = tree.node(id)?.object_id.filter(|oid| store.contains(*oid));

        let (oid, created) = match current {
            Some(oid) => {
                if store.get_object(oid)?.node_type != node_type {
                    store.update_object(oid, node_type)?;
                    conform_properties(self.catalog, store, oid, node_type)?;
                }
                (oid, false)
            }
            None => (store.create_object(node_type)?, true),
        };

        let node = tree.node_mut(id)?;
        node.node_type = Some(node_type.to_string());
        node.object_id = Some(oid);

        if let Some(parent) = parent_object {
            link_child(store, parent, oid)?;
        }
        if created {
            self.apply_property_rules(evaluator, tree, store, id, oid, node_type)?;
        }
        Ok(())
    }

    fn apply_property_rules(
        &self,
        evaluator: &Evaluator<'_>,
        tree: &IpmTree,
        store: &mut dyn ObjectStore,
        id: NodeId,
        oid: ObjectId,
        node_type: &str,
    ) -> Result<()> {
        let Some(rules) = self.rules else {
            return Ok(());
        };
        let ctx = tree.context(id)?;
        for (property, value) in rules.derive_properties(evaluator, &ctx, node_type)? {
            let Some(constraint) = self.catalog.constraint(node_type, &property) else {
                continue;
            };
            if constraint.has_room(store.get_object(oid)?.count_of(&property)) {
                store.add_property(oid, ipm_store::PropertyValue::new(property, value))?;
            }
        }
        Ok(())
    }
}
