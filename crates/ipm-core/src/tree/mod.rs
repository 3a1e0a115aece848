//! IPM tree model
//!
//! An [`IpmTree`] mirrors a file-system hierarchy. Nodes live in an arena
//! and refer to each other through [`NodeId`] keys, which stay stable for
//! the lifetime of a node: removing a subtree leaves a hole instead of
//! shifting other nodes.

mod arena;
mod node;

pub use arena::IpmTree;
pub use node::{Node, NodeId};
