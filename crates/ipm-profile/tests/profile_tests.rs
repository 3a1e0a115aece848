//! Tests for profile loading and catalog assembly

use ipm_fs::NormalizedPath;
use ipm_profile::{Error, MigrationPolicy, ProfileLoader, ValueKind};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::fs;
use tempfile::TempDir;

const ARCHIVE_PROFILE: &str = r#"
[meta]
id = "archive-basic"
name = "Basic archive"
version = "2.1.0"

[[property_types]]
name = "title"
kind = "string"

[[property_types]]
name = "rights"
kind = "string"
inheritable = true

[[property_types]]
name = "created"
kind = "date"
format = "yyyy-MM-dd"

[[node_types]]
name = "Collection"
root = true
children = ["Folder", "Item"]
properties = [
    { property = "title", min = 1, max = 1 },
    { property = "rights" },
]

[[node_types]]
name = "Folder"
children = ["Folder", "Item"]
properties = [{ property = "title", max = 1 }, { property = "rights" }]

[[node_types]]
name = "Item"
parents = ["Collection", "Folder"]
properties = [{ property = "title", max = 1 }, { property = "rights" }, { property = "created" }]

[[transforms]]
source = "Folder"
target = "Item"
migration = "keep-matching"
"#;

const PHOTO_PROFILE: &str = r#"
[meta]
id = "photo-extension"

[[property_types]]
name = "camera"

[[node_types]]
name = "Photo"
parents = ["Folder"]
properties = [{ property = "camera" }, { property = "title" }]

[[transforms]]
source = "Item"
target = "Photo"
migration = "rename"
property_map = { created = "camera" }
"#;

fn write(dir: &TempDir, name: &str, content: &str) -> NormalizedPath {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    NormalizedPath::new(path)
}

#[test]
fn test_parse_full_profile() {
    let temp = TempDir::new().unwrap();
    let path = write(&temp, "archive.toml", ARCHIVE_PROFILE);

    let profile = ProfileLoader::new().load(&path).unwrap();

    assert_eq!(profile.meta.id, "archive-basic");
    assert_eq!(profile.meta.version, semver::Version::new(2, 1, 0));
    assert_eq!(profile.node_types.len(), 3);
    assert_eq!(profile.property_type("created").unwrap().kind, ValueKind::Date);
    assert!(profile.property_type("rights").unwrap().inheritable);

    let collection = profile.node_type("Collection").unwrap();
    assert!(collection.root);
    let title = collection.constraint("title").unwrap();
    assert_eq!((title.min, title.max), (1, Some(1)));
    let rights = collection.constraint("rights").unwrap();
    assert_eq!((rights.min, rights.max), (0, None));
}

#[test]
fn test_catalog_with_secondary() {
    let temp = TempDir::new().unwrap();
    let primary = write(&temp, "archive.toml", ARCHIVE_PROFILE);
    let secondary = write(&temp, "photo.toml", PHOTO_PROFILE);

    let catalog = ProfileLoader::new()
        .load_catalog(&primary, &[secondary])
        .unwrap();

    assert_eq!(catalog.profiles().len(), 2);
    assert!(catalog.node_type("Photo").is_some());
    assert!(catalog.property_type("camera").is_some());

    let from_item: Vec<_> = catalog.transforms_from("Item").collect();
    assert_eq!(from_item.len(), 1);
    assert_eq!(from_item[0].migration, MigrationPolicy::Rename);
}

#[rstest]
#[case("Collection", "Folder", true)]
#[case("Folder", "Item", true)]
#[case("Folder", "Photo", true)]
#[case("Collection", "Photo", false)]
#[case("Item", "Folder", false)]
#[case("Folder", "Collection", false)]
fn test_catalog_placement(#[case] parent: &str, #[case] child: &str, #[case] allowed: bool) {
    let temp = TempDir::new().unwrap();
    let primary = write(&temp, "archive.toml", ARCHIVE_PROFILE);
    let secondary = write(&temp, "photo.toml", PHOTO_PROFILE);
    let catalog = ProfileLoader::new()
        .load_catalog(&primary, &[secondary])
        .unwrap();

    assert_eq!(catalog.allows(parent, child), allowed);
}

#[test]
fn test_secondary_alone_is_invalid() {
    let temp = TempDir::new().unwrap();
    let secondary = write(&temp, "photo.toml", PHOTO_PROFILE);

    let err = ProfileLoader::new().load_catalog(&secondary, &[]).unwrap_err();
    match err {
        Error::InvalidProfile { id, message } => {
            assert_eq!(id, "photo-extension");
            assert!(message.contains("Folder"), "message: {}", message);
        }
        other => panic!("expected InvalidProfile, got {:?}", other),
    }
}

#[test]
fn test_load_dir_skips_broken_files() {
    let temp = TempDir::new().unwrap();
    write(&temp, "b-archive.toml", ARCHIVE_PROFILE);
    write(&temp, "a-photo.toml", PHOTO_PROFILE);
    write(&temp, "broken.toml", "[meta\nid = ");
    write(&temp, "notes.txt", "not a profile");

    let profiles = ProfileLoader::new()
        .load_dir(&NormalizedPath::new(temp.path()))
        .unwrap();

    let ids: Vec<&str> = profiles.iter().map(|p| p.id()).collect();
    assert_eq!(ids, vec!["archive-basic", "photo-extension"]);
}

#[test]
fn test_profile_from_json() {
    let temp = TempDir::new().unwrap();
    let path = write(
        &temp,
        "tiny.json",
        r#"{"meta": {"id": "tiny"}, "node_types": [{"name": "Root", "root": true}]}"#,
    );

    let profile = ProfileLoader::new().load(&path).unwrap();
    assert_eq!(profile.meta.version, semver::Version::new(1, 0, 0));
    assert!(profile.node_type("Root").unwrap().is_leaf());
}
