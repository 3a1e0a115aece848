//! The profile document

use serde::{Deserialize, Serialize};

use super::{NodeTransform, NodeType, PropertyType};

/// Profile header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileMeta {
    /// Unique profile identifier (e.g., "archive-basic")
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_version")]
    pub version: semver::Version,
}

fn default_version() -> semver::Version {
    semver::Version::new(1, 0, 0)
}

/// Complete domain profile loaded from a profile document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainProfile {
    pub meta: ProfileMeta,
    #[serde(default)]
    pub property_types: Vec<PropertyType>,
    #[serde(default)]
    pub node_types: Vec<NodeType>,
    #[serde(default)]
    pub transforms: Vec<NodeTransform>,
}

impl DomainProfile {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            meta: ProfileMeta {
                id: id.into(),
                name: None,
                version: default_version(),
            },
            property_types: Vec::new(),
            node_types: Vec::new(),
            transforms: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.meta.id
    }

    pub fn with_property_type(mut self, property_type: PropertyType) -> Self {
        self.property_types.push(property_type);
        self
    }

    pub fn with_node_type(mut self, node_type: NodeType) -> Self {
        self.node_types.push(node_type);
        self
    }

    pub fn with_transform(mut self, transform: NodeTransform) -> Self {
        self.transforms.push(transform);
        self
    }

    pub fn node_type(&self, name: &str) -> Option<&NodeType> {
        self.node_types.iter().find(|t| t.name == name)
    }

    pub fn property_type(&self, name: &str) -> Option<&PropertyType> {
        self.property_types.iter().find(|p| p.name == name)
    }
}
