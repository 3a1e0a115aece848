//! Node transforms: profile-approved type-to-type migrations

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What happens to a node's property values when its type changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MigrationPolicy {
    /// Keep values whose property type the target admits
    #[default]
    KeepMatching,
    /// Rename through `property_map`, then keep matching
    Rename,
    /// Drop every value
    Discard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeTransform {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub migration: MigrationPolicy,
    /// Source property -> target property, used by [`MigrationPolicy::Rename`]
    #[serde(default)]
    pub property_map: BTreeMap<String, String>,
}

impl NodeTransform {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            migration: MigrationPolicy::default(),
            property_map: BTreeMap::new(),
        }
    }

    pub fn with_migration(mut self, migration: MigrationPolicy) -> Self {
        self.migration = migration;
        self
    }

    pub fn rename(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.migration = MigrationPolicy::Rename;
        self.property_map.insert(from.into(), to.into());
        self
    }

    /// Property name a source value migrates to, or `None` if it is dropped
    /// by policy. Whether the target admits it is checked by the caller.
    pub fn migrated_name<'a>(&'a self, property: &'a str) -> Option<&'a str> {
        match self.migration {
            MigrationPolicy::KeepMatching => Some(property),
            MigrationPolicy::Rename => Some(
                self.property_map
                    .get(property)
                    .map(String::as_str)
                    .unwrap_or(property),
            ),
            MigrationPolicy::Discard => None,
        }
    }
}

impl std::fmt::Display for NodeTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}
