use super::IpmService;
use crate::{IpmTree, NodeId, Result};

impl IpmService<'_> {
    /// Set the ignore flag of a node.
    ///
    /// Ignoring covers the node and all descendants. Unignoring covers the
    /// node, all descendants and all ancestors, so an unignored node is
    /// always reachable through unignored parents.
    pub fn ignore_node(&self, tree: &mut IpmTree, id: NodeId, ignored: bool) -> Result<()> {
        tree.node(id)?;
        let mut affected = tree.pre_order(id);
        if !ignored {
            affected.extend(tree.ancestors(id));
        }
        for node_id in affected {
            tree.node_mut(node_id)?.ignored = ignored;
        }
        tracing::debug!(node = %id, ignored, "updated ignore state");
        Ok(())
    }
}
