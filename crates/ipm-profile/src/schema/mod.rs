//! Schema definitions for domain profiles
//!
//! Profiles are authored as TOML (or JSON/YAML) documents:
//!
//! ```toml
//! [meta]
//! id = "archive-basic"
//! version = "1.0.0"
//!
//! [[property_types]]
//! name = "title"
//! kind = "string"
//!
//! [[node_types]]
//! name = "Collection"
//! root = true
//! children = ["Folder", "Item"]
//! properties = [{ property = "title", min = 1, max = 1 }]
//!
//! [[transforms]]
//! source = "Folder"
//! target = "Item"
//! ```

pub mod node_type;
pub mod profile;
pub mod property;
pub mod transform;

pub use node_type::NodeType;
pub use profile::{DomainProfile, ProfileMeta};
pub use property::{PropertyConstraint, PropertyType, ValueKind};
pub use transform::{MigrationPolicy, NodeTransform};
