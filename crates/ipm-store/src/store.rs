//! The object store contract
//!
//! The engine calls the store synchronously and never caches results
//! across calls. Any error returned here aborts the engine operation.

use crate::{DomainObject, ObjectId, PropertyValue, Relationship, Result};

/// Predicate linking a parent node's object to a child node's object.
pub const HAS_CHILD: &str = "ipm:hasChild";

pub trait ObjectStore {
    /// Create an object of `node_type` and return its identifier.
    fn create_object(&mut self, node_type: &str) -> Result<ObjectId>;

    /// Change an object's node type. Properties are left alone.
    fn update_object(&mut self, id: ObjectId, node_type: &str) -> Result<()>;

    /// Remove an object together with every relationship involving it.
    fn remove_object(&mut self, id: ObjectId) -> Result<DomainObject>;

    fn get_object(&self, id: ObjectId) -> Result<DomainObject>;

    fn contains(&self, id: ObjectId) -> bool;

    fn add_property(&mut self, id: ObjectId, value: PropertyValue) -> Result<()>;

    /// Remove values of `property`; only those equal to `value` when given.
    /// Returns how many values were removed.
    fn remove_property(&mut self, id: ObjectId, property: &str, value: Option<&str>)
    -> Result<usize>;

    fn get_properties(&self, id: ObjectId) -> Result<Vec<PropertyValue>>;

    /// Add a triple; adding an existing triple is a no-op.
    fn add_relationship(&mut self, relationship: Relationship) -> Result<()>;

    /// Returns whether the triple existed.
    fn remove_relationship(&mut self, relationship: &Relationship) -> Result<bool>;

    fn has_relationship(&self, subject: ObjectId, predicate: &str, object: ObjectId)
    -> Result<bool>;

    /// Relationships whose subject or object is `id`, in insertion order.
    fn relationships(&self, id: ObjectId) -> Result<Vec<Relationship>>;

    /// Replace every value of `property` with `values`.
    fn replace_property(
        &mut self,
        id: ObjectId,
        property: &str,
        values: Vec<PropertyValue>,
    ) -> Result<()> {
        self.remove_property(id, property, None)?;
        for value in values {
            self.add_property(id, value)?;
        }
        Ok(())
    }
}
