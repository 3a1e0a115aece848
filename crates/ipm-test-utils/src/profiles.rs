//! Sample domain profiles.
//!
//! The archive profile declares `Item` before `Folder`, so a plain
//! assignment types files and empty directories as `Item` and has to
//! backtrack to `Folder` for directories with children.

use ipm_profile::{
    DomainProfile, MigrationPolicy, NodeTransform, NodeType, ProfileCatalog, PropertyConstraint,
    PropertyType, ValueKind,
};

fn at_most_one(property: &str) -> PropertyConstraint {
    PropertyConstraint::new(property, 0, Some(1))
}

/// Collection / Item / Folder / Record archive profile.
pub fn archive_profile() -> DomainProfile {
    DomainProfile::new("archive-test")
        .with_property_type(PropertyType::new("title", ValueKind::String))
        .with_property_type(PropertyType::new("rights", ValueKind::String).inheritable())
        .with_property_type(PropertyType::new("subject", ValueKind::String))
        .with_property_type(PropertyType::new("created", ValueKind::Date))
        .with_property_type(PropertyType::new("identifier", ValueKind::Uri))
        .with_node_type(
            NodeType::new("Collection")
                .root()
                .with_children(&["Item", "Folder", "Record"])
                .with_property(at_most_one("title"))
                .with_property(at_most_one("rights")),
        )
        .with_node_type(
            NodeType::new("Item")
                .with_parents(&["Collection", "Folder"])
                .with_property(at_most_one("title"))
                .with_property(at_most_one("rights"))
                .with_property(PropertyConstraint::new("subject", 0, None))
                .with_property(at_most_one("created")),
        )
        .with_node_type(
            NodeType::new("Folder")
                .with_parents(&["Collection", "Folder"])
                .with_children(&["Item", "Folder", "Record"])
                .with_property(at_most_one("title"))
                .with_property(at_most_one("rights")),
        )
        .with_node_type(
            NodeType::new("Record")
                .with_parents(&["Collection", "Folder"])
                .with_property(at_most_one("title"))
                .with_property(at_most_one("rights"))
                .with_property(PropertyConstraint::new("subject", 0, None))
                .with_property(at_most_one("created"))
                .with_property(at_most_one("identifier")),
        )
        .with_transform(NodeTransform::new("Item", "Record"))
        .with_transform(NodeTransform::new("Record", "Item").rename("identifier", "subject"))
        .with_transform(NodeTransform::new("Folder", "Item").with_migration(MigrationPolicy::Discard))
}

/// Secondary profile adding a `Photo` leaf under folders.
pub fn photo_profile() -> DomainProfile {
    DomainProfile::new("photo-test")
        .with_property_type(PropertyType::new("camera", ValueKind::String))
        .with_node_type(
            NodeType::new("Photo")
                .with_parents(&["Folder"])
                .with_property(at_most_one("camera"))
                .with_property(at_most_one("title")),
        )
        .with_transform(NodeTransform::new("Item", "Photo"))
}

pub fn archive_catalog() -> ProfileCatalog {
    ProfileCatalog::new(archive_profile())
}

/// A small archive profile in its on-disk form.
pub const ARCHIVE_PROFILE_TOML: &str = r#"
[meta]
id = "archive-disk"
version = "1.2.0"

[[property_types]]
name = "title"

[[property_types]]
name = "rights"
inheritable = true

[[node_types]]
name = "Collection"
root = true
children = ["Item", "Folder"]
properties = [{ property = "title", max = 1 }, { property = "rights", max = 1 }]

[[node_types]]
name = "Item"
parents = ["Collection", "Folder"]
properties = [{ property = "title", max = 1 }, { property = "rights", max = 1 }]

[[node_types]]
name = "Folder"
parents = ["Collection", "Folder"]
children = ["Item", "Folder"]
properties = [{ property = "title", max = 1 }, { property = "rights", max = 1 }]
"#;
