//! Node types and their structural constraints

use serde::{Deserialize, Serialize};

use super::PropertyConstraint;

/// A node type declared by a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeType {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// May root a tree
    #[serde(default)]
    pub root: bool,
    /// Allowed parent types; empty admits any parent that lists this type
    /// among its children
    #[serde(default)]
    pub parents: Vec<String>,
    /// Allowed child types
    #[serde(default)]
    pub children: Vec<String>,
    /// Property constraints in declaration order
    #[serde(default)]
    pub properties: Vec<PropertyConstraint>,
}

impl NodeType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            root: false,
            parents: Vec::new(),
            children: Vec::new(),
            properties: Vec::new(),
        }
    }

    pub fn root(mut self) -> Self {
        self.root = true;
        self
    }

    pub fn with_children(mut self, children: &[&str]) -> Self {
        self.children = children.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_parents(mut self, parents: &[&str]) -> Self {
        self.parents = parents.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_property(mut self, constraint: PropertyConstraint) -> Self {
        self.properties.push(constraint);
        self
    }

    pub fn accepts_child(&self, child: &str) -> bool {
        self.children.iter().any(|c| c == child)
    }

    pub fn accepts_parent(&self, parent: &str) -> bool {
        self.parents.is_empty() || self.parents.iter().any(|p| p == parent)
    }

    pub fn constraint(&self, property: &str) -> Option<&PropertyConstraint> {
        self.properties.iter().find(|c| c.property == property)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
