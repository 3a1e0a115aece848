//! Property types and occurrence constraints

use serde::{Deserialize, Serialize};

/// Kind of value a property holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueKind {
    #[default]
    String,
    Uri,
    Date,
    /// A complex group whose members are other property types
    Group,
}

/// A property type declared by a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyType {
    pub name: String,
    #[serde(default)]
    pub kind: ValueKind,
    /// Inheritable values flow from a node to descendants lacking their own
    #[serde(default)]
    pub inheritable: bool,
    /// Formatting hint for presentation, e.g. a date pattern
    #[serde(default)]
    pub format: Option<String>,
    /// Member property types of a group
    #[serde(default)]
    pub members: Vec<String>,
}

impl PropertyType {
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            kind,
            inheritable: false,
            format: None,
            members: Vec::new(),
        }
    }

    pub fn inheritable(mut self) -> Self {
        self.inheritable = true;
        self
    }
}

/// How many values of a property type a node type admits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyConstraint {
    pub property: String,
    #[serde(default)]
    pub min: u32,
    /// `None` means unbounded
    #[serde(default)]
    pub max: Option<u32>,
}

impl PropertyConstraint {
    pub fn new(property: impl Into<String>, min: u32, max: Option<u32>) -> Self {
        Self {
            property: property.into(),
            min,
            max,
        }
    }

    /// Whether `count` values satisfy `[min, max]`.
    pub fn admits(&self, count: usize) -> bool {
        let count = u64::try_from(count).unwrap_or(u64::MAX);
        count >= u64::from(self.min) && self.max.is_none_or(|max| count <= u64::from(max))
    }

    /// Whether one more value may be added to `count` existing ones.
    pub fn has_room(&self, count: usize) -> bool {
        self.max
            .is_none_or(|max| u64::try_from(count).unwrap_or(u64::MAX) < u64::from(max))
    }

    pub fn is_required(&self) -> bool {
        self.min > 0
    }
}
