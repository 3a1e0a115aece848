use ipm_fs::NormalizedPath;
use ipm_rules::{FileContext, FileRecord};

use super::{Node, NodeId};
use crate::{Error, Result};

/// Arena-backed tree of [`Node`]s.
///
/// Parent and child links are kept mutual by every mutating method; the
/// root never has a parent and cannot be removed.
#[derive(Debug, Clone)]
pub struct IpmTree {
    nodes: Vec<Option<Node>>,
    root: NodeId,
    /// Anchor for relative paths; fixed at construction
    root_path: NormalizedPath,
}

impl IpmTree {
    /// Tree with a single root node.
    pub fn new(root: FileRecord) -> Self {
        Self {
            root_path: root.metadata.path.clone(),
            nodes: vec![Some(Node::new(root, None))],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_path(&self) -> &NormalizedPath {
        &self.root_path
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.get(id).ok_or(Error::NodeNotFound { id })
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(Error::NodeNotFound { id })
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live nodes in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.as_ref().map(|n| (NodeId(i), n)))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Insert a new child under `parent`, keeping children in name order.
    pub fn add_child(&mut self, parent: NodeId, record: FileRecord) -> Result<NodeId> {
        self.node(parent)?;
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Node::new(record, Some(parent))));
        self.link(parent, id)?;
        Ok(id)
    }

    /// Remove `id` and its descendants, returning the removed nodes in
    /// pre-order.
    pub fn remove_subtree(&mut self, id: NodeId) -> Result<Vec<Node>> {
        if id == self.root {
            return Err(Error::precondition("the tree root cannot be removed"));
        }
        let order = self.pre_order(id);
        if order.is_empty() {
            return Err(Error::NodeNotFound { id });
        }
        self.unlink(id)?;

        let mut removed = Vec::with_capacity(order.len());
        for node_id in order {
            if let Some(node) = self.nodes.get_mut(node_id.0).and_then(Option::take) {
                removed.push(node);
            }
        }
        Ok(removed)
    }

    /// Re-parent `id` under `new_parent`, rebasing the paths of the moved
    /// subtree.
    pub fn move_node(&mut self, id: NodeId, new_parent: NodeId) -> Result<()> {
        if id == self.root {
            return Err(Error::precondition("the tree root cannot be moved"));
        }
        self.node(id)?;
        self.node(new_parent)?;
        if new_parent == id || self.ancestors(new_parent).contains(&id) {
            return Err(Error::precondition(format!(
                "cannot move {} below itself",
                self.node(id)?.path()
            )));
        }
        self.unlink(id)?;
        self.node_mut(id)?.parent = Some(new_parent);
        self.link(new_parent, id)?;
        self.rebase_paths(id)
    }

    /// `id` and its descendants, parents before children.
    pub fn pre_order(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        if !self.contains(id) {
            return order;
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            order.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        order
    }

    /// Descendants of `id` in pre-order, excluding `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = self.pre_order(id);
        if !order.is_empty() {
            order.remove(0);
        }
        order
    }

    /// Parent, grandparent, ... up to the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut ancestors = Vec::new();
        let mut current = self.parent(id);
        while let Some(parent) = current {
            ancestors.push(parent);
            current = self.parent(parent);
        }
        ancestors
    }

    /// Path of a node relative to the root; empty for the root itself.
    pub fn relative_path(&self, id: NodeId) -> Option<String> {
        self.get(id)?.path().relative_to(self.root_path())
    }

    /// Node at `rel` below the root, walking child names.
    pub fn find_by_relative(&self, rel: &str) -> Option<NodeId> {
        let mut current = self.root;
        for segment in rel.split('/').filter(|s| !s.is_empty()) {
            current = self
                .children(current)
                .iter()
                .copied()
                .find(|c| self.get(*c).is_some_and(|n| n.name() == segment))?;
        }
        Some(current)
    }

    pub fn find_by_path(&self, path: &NormalizedPath) -> Option<NodeId> {
        self.find_by_relative(&path.relative_to(self.root_path())?)
    }

    /// Rule-evaluation context for a node.
    pub fn context(&self, id: NodeId) -> Result<FileContext> {
        let node = self.node(id)?;
        Ok(FileContext::new(node.path().clone(), self.root_path().clone()).ignored(node.ignored))
    }

    fn link(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let name = self.node(child)?.name().to_string();
        let position = {
            let siblings = self.children(parent);
            siblings
                .iter()
                .position(|s| self.get(*s).is_some_and(|n| n.name() > name.as_str()))
                .unwrap_or(siblings.len())
        };
        self.node_mut(parent)?.children.insert(position, child);
        Ok(())
    }

    fn unlink(&mut self, id: NodeId) -> Result<()> {
        if let Some(parent) = self.node(id)?.parent {
            self.node_mut(parent)?.children.retain(|c| *c != id);
        }
        self.node_mut(id)?.parent = None;
        Ok(())
    }

    fn rebase_paths(&mut self, id: NodeId) -> Result<()> {
        for node_id in self.pre_order(id) {
            let Some(parent) = self.parent(node_id) else {
                continue;
            };
            let path = self.node(parent)?.path().join(self.node(node_id)?.name());
            self.node_mut(node_id)?.record.metadata.path = path;
        }
        Ok(())
    }
}
