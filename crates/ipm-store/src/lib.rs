//! Domain object store for the Internal Package Model engine
//!
//! Every typed node of an IPM tree is mirrored by one domain object: its
//! node type, its property values, and subject-predicate-object
//! relationships to other objects. [`ObjectStore`] is the contract the
//! engine calls; [`InMemoryStore`] is the bundled implementation, which
//! can snapshot itself to a TOML/JSON/YAML file.

pub mod error;
pub mod memory;
pub mod object;
pub mod store;

pub use error::{Error, Result};
pub use memory::InMemoryStore;
pub use object::{DomainObject, ObjectId, PropertyValue, Relationship};
pub use store::{HAS_CHILD, ObjectStore};
