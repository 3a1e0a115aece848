//! In-memory object store with file snapshots

use std::collections::BTreeMap;

use ipm_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::{
    DomainObject, Error, ObjectId, ObjectStore, PropertyValue, Relationship, Result,
};

/// Object store held in memory.
///
/// `save`/`load` write and read a snapshot through [`ConfigStore`], so the
/// snapshot format follows the file extension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InMemoryStore {
    /// Snapshot format version
    version: String,
    #[serde(default)]
    objects: BTreeMap<ObjectId, DomainObject>,
    #[serde(default)]
    relationships: Vec<Relationship>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            version: "1.0".to_string(),
            objects: BTreeMap::new(),
            relationships: Vec::new(),
        }
    }

    /// Load a snapshot.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let store: Self = ConfigStore::new().load(path)?;
        for rel in &store.relationships {
            if !store.objects.contains_key(&rel.subject) || !store.objects.contains_key(&rel.object)
            {
                return Err(Error::Inconsistent {
                    message: format!(
                        "relationship {} {} {} references a missing object",
                        rel.subject, rel.predicate, rel.object
                    ),
                });
            }
        }
        tracing::debug!(path = %path, objects = store.objects.len(), "loaded object store");
        Ok(store)
    }

    /// Load a snapshot, or start empty when the file does not exist.
    pub fn load_or_create(path: &NormalizedPath) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }

    /// Write a snapshot atomically.
    pub fn save(&self, path: &NormalizedPath) -> Result<()> {
        ConfigStore::new().save(path, self)?;
        tracing::debug!(path = %path, objects = self.objects.len(), "saved object store");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> impl Iterator<Item = &DomainObject> {
        self.objects.values()
    }

    pub fn all_relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    fn object_mut(&mut self, id: ObjectId) -> Result<&mut DomainObject> {
        self.objects.get_mut(&id).ok_or_else(|| Error::not_found(id))
    }

    fn require(&self, id: ObjectId) -> Result<&DomainObject> {
        self.objects.get(&id).ok_or_else(|| Error::not_found(id))
    }
}

impl ObjectStore for InMemoryStore {
    fn create_object(&mut self, node_type: &str) -> Result<ObjectId> {
        let object = DomainObject::new(node_type);
        let id = object.id;
        self.objects.insert(id, object);
        Ok(id)
    }

    fn update_object(&mut self, id: ObjectId, node_type: &str) -> Result<()> {
        let object = self.object_mut(id)?;
        object.node_type = node_type.to_string();
        object.touch();
        Ok(())
    }

    fn remove_object(&mut self, id: ObjectId) -> Result<DomainObject> {
        let object = self.objects.remove(&id).ok_or_else(|| Error::not_found(id))?;
        self.relationships.retain(|r| !r.involves(id));
        Ok(object)
    }

    fn get_object(&self, id: ObjectId) -> Result<DomainObject> {
        self.require(id).cloned()
    }

    fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    fn add_property(&mut self, id: ObjectId, value: PropertyValue) -> Result<()> {
        let object = self.object_mut(id)?;
        object.properties.push(value);
        object.touch();
        Ok(())
    }

    fn remove_property(
        &mut self,
        id: ObjectId,
        property: &str,
        value: Option<&str>,
    ) -> Result<usize> {
        let object = self.object_mut(id)?;
        let before = object.properties.len();
        object
            .properties
            .retain(|v| v.property != property || value.is_some_and(|wanted| v.value != wanted));
        let removed = before - object.properties.len();
        if removed > 0 {
            object.touch();
        }
        Ok(removed)
    }

    fn get_properties(&self, id: ObjectId) -> Result<Vec<PropertyValue>> {
        Ok(self.require(id)?.properties.clone())
    }

    fn add_relationship(&mut self, relationship: Relationship) -> Result<()> {
        self.require(relationship.subject)?;
        self.require(relationship.object)?;
        if !self.relationships.contains(&relationship) {
            self.relationships.push(relationship);
        }
        Ok(())
    }

    fn remove_relationship(&mut self, relationship: &Relationship) -> Result<bool> {
        let before = self.relationships.len();
        self.relationships.retain(|r| r != relationship);
        Ok(self.relationships.len() != before)
    }

    fn has_relationship(
        &self,
        subject: ObjectId,
        predicate: &str,
        object: ObjectId,
    ) -> Result<bool> {
        Ok(self
            .relationships
            .iter()
            .any(|r| r.subject == subject && r.predicate == predicate && r.object == object))
    }

    fn relationships(&self, id: ObjectId) -> Result<Vec<Relationship>> {
        self.require(id)?;
        Ok(self
            .relationships
            .iter()
            .filter(|r| r.involves(id))
            .cloned()
            .collect())
    }
}
