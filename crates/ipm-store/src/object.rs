//! Domain objects, property values and relationships

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a domain object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(Uuid);

impl ObjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One value of a property type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyValue {
    /// Property type name
    pub property: String,
    pub value: String,
    /// Containing complex group, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl PropertyValue {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            group: None,
        }
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Same value under a different property type.
    pub fn renamed(&self, property: &str) -> Self {
        Self {
            property: property.to_string(),
            value: self.value.clone(),
            group: self.group.clone(),
        }
    }
}

/// A subject-predicate-object triple between two domain objects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relationship {
    pub subject: ObjectId,
    pub predicate: String,
    pub object: ObjectId,
}

impl Relationship {
    pub fn new(subject: ObjectId, predicate: impl Into<String>, object: ObjectId) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
        }
    }

    pub fn involves(&self, id: ObjectId) -> bool {
        self.subject == id || self.object == id
    }
}

/// The store's unit: one per typed node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainObject {
    pub id: ObjectId,
    pub node_type: String,
    #[serde(default)]
    pub properties: Vec<PropertyValue>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl DomainObject {
    pub fn new(node_type: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ObjectId::new(),
            node_type: node_type.into(),
            properties: Vec::new(),
            created: now,
            updated: now,
        }
    }

    /// Values of one property type, in insertion order.
    pub fn values_of<'a>(&'a self, property: &'a str) -> impl Iterator<Item = &'a PropertyValue> {
        self.properties.iter().filter(move |v| v.property == property)
    }

    pub fn count_of(&self, property: &str) -> usize {
        self.values_of(property).count()
    }

    pub fn touch(&mut self) {
        self.updated = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_ids_are_unique() {
        assert_ne!(ObjectId::new(), ObjectId::new());
    }

    #[test]
    fn test_values_of() {
        let mut object = DomainObject::new("Item");
        object.properties.push(PropertyValue::new("title", "A"));
        object.properties.push(PropertyValue::new("subject", "x"));
        object.properties.push(PropertyValue::new("subject", "y"));

        assert_eq!(object.count_of("subject"), 2);
        assert_eq!(object.count_of("title"), 1);
        assert_eq!(object.count_of("rights"), 0);
    }

    #[test]
    fn test_relationship_involves() {
        let a = ObjectId::new();
        let b = ObjectId::new();
        let rel = Relationship::new(a, "ipm:hasChild", b);
        assert!(rel.involves(a));
        assert!(rel.involves(b));
        assert!(!rel.involves(ObjectId::new()));
    }
}
