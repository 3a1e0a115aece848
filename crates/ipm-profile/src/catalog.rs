//! The active profile set for a session
//!
//! A catalog holds one primary profile and any number of secondaries.
//! Lookups search the primary first, so a name declared twice resolves to
//! the primary's definition. Iteration order is the catalog order: primary
//! declarations first, then each secondary in the order it was added.

use std::collections::HashSet;

use crate::schema::{DomainProfile, NodeTransform, NodeType, PropertyConstraint, PropertyType};
use crate::validation::{self, IssueLevel, ProfileIssue};
use crate::{Error, Result};

#[derive(Debug, Clone)]
pub struct ProfileCatalog {
    /// `profiles[0]` is the primary
    profiles: Vec<DomainProfile>,
}

impl ProfileCatalog {
    pub fn new(primary: DomainProfile) -> Self {
        Self {
            profiles: vec![primary],
        }
    }

    pub fn with_secondary(mut self, secondary: DomainProfile) -> Self {
        self.profiles.push(secondary);
        self
    }

    pub fn primary(&self) -> &DomainProfile {
        &self.profiles[0]
    }

    pub fn profiles(&self) -> &[DomainProfile] {
        &self.profiles
    }

    /// Node types in catalog order, shadowed duplicates skipped.
    pub fn node_types(&self) -> impl Iterator<Item = &NodeType> {
        let mut seen = HashSet::new();
        self.profiles
            .iter()
            .flat_map(|p| p.node_types.iter())
            .filter(move |t| seen.insert(t.name.as_str()))
    }

    pub fn node_type(&self, name: &str) -> Option<&NodeType> {
        self.profiles.iter().find_map(|p| p.node_type(name))
    }

    pub fn require_node_type(&self, name: &str) -> Result<&NodeType> {
        self.node_type(name).ok_or_else(|| Error::UnknownNodeType {
            name: name.to_string(),
        })
    }

    pub fn property_types(&self) -> impl Iterator<Item = &PropertyType> {
        let mut seen = HashSet::new();
        self.profiles
            .iter()
            .flat_map(|p| p.property_types.iter())
            .filter(move |t| seen.insert(t.name.as_str()))
    }

    pub fn property_type(&self, name: &str) -> Option<&PropertyType> {
        self.profiles.iter().find_map(|p| p.property_type(name))
    }

    pub fn transforms(&self) -> impl Iterator<Item = &NodeTransform> {
        self.profiles.iter().flat_map(|p| p.transforms.iter())
    }

    pub fn transforms_from<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a NodeTransform> {
        self.transforms().filter(move |t| t.source == source)
    }

    /// Root-eligible node types in catalog order.
    pub fn root_types(&self) -> impl Iterator<Item = &NodeType> {
        self.node_types().filter(|t| t.root)
    }

    /// Whether a `child` node may sit under a `parent` node.
    ///
    /// Both sides must agree: the parent lists the child type among its
    /// children, and the child's parent list is empty or names the parent.
    /// A type declared in a later profile extends the children of the
    /// earlier-profile types its parent list names, so a secondary profile
    /// can hang new types under primary ones without editing them.
    pub fn allows(&self, parent: &str, child: &str) -> bool {
        let (Some((p_origin, p)), Some((c_origin, c))) = (self.declaring(parent), self.declaring(child)) else {
            return false;
        };
        let extends = c_origin > p_origin && c.parents.iter().any(|x| x == parent);
        (p.accepts_child(child) || extends) && c.accepts_parent(parent)
    }

    /// Effective definition of `name` and the index of the profile
    /// declaring it.
    fn declaring(&self, name: &str) -> Option<(usize, &NodeType)> {
        self.profiles
            .iter()
            .enumerate()
            .find_map(|(i, p)| p.node_type(name).map(|t| (i, t)))
    }

    /// Whether `node_type` may root a tree.
    pub fn is_root_type(&self, node_type: &str) -> bool {
        self.node_type(node_type).is_some_and(|t| t.root)
    }

    pub fn constraint(&self, node_type: &str, property: &str) -> Option<&PropertyConstraint> {
        self.node_type(node_type)?.constraint(property)
    }

    pub fn is_inheritable(&self, property: &str) -> bool {
        self.property_type(property).is_some_and(|p| p.inheritable)
    }

    /// Consistency issues across the whole catalog.
    pub fn validate(&self) -> Vec<ProfileIssue> {
        validation::validate_catalog(self)
    }

    /// Fail when any error-level issue is present.
    pub fn ensure_valid(&self) -> Result<()> {
        let errors: Vec<String> = self
            .validate()
            .into_iter()
            .filter(|i| i.level == IssueLevel::Error)
            .map(|i| i.message)
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidProfile {
                id: self.primary().id().to_string(),
                message: errors.join("; "),
            })
        }
    }
}
