//! End-to-end workflow over a session
//!
//! This test exercises the complete flow: session config -> scan -> type
//! assignment -> curation -> rescan -> compare -> merge -> retype.

use ipm_core::{NodeComparisonStatus, Session, TreeSnapshot};
use ipm_fs::NormalizedPath;
use ipm_store::{InMemoryStore, ObjectStore, PropertyValue};
use ipm_test_utils::{ARCHIVE_PROFILE_TOML, TestTree, photo_profile};
use std::fs;
use tempfile::TempDir;

/// Write profiles, rules and a session config; return the config path.
fn setup_session(dir: &TempDir) -> NormalizedPath {
    let profiles = dir.path().join("profiles");
    fs::create_dir(&profiles).unwrap();
    fs::write(profiles.join("archive.toml"), ARCHIVE_PROFILE_TOML).unwrap();
    fs::write(
        profiles.join("photo.json"),
        serde_json::to_string_pretty(&photo_profile()).unwrap(),
    )
    .unwrap();

    fs::write(
        dir.path().join("rules.toml"),
        r#"
[[property_rules]]
property = "title"
value = { op = "file-metadata", attribute = "name" }
"#,
    )
    .unwrap();

    let config = dir.path().join("session.toml");
    fs::write(
        &config,
        r#"
profile = "profiles/archive.toml"
secondary_profiles = ["profiles/photo.json"]
rules = "rules.toml"
"#,
    )
    .unwrap();
    NormalizedPath::new(config)
}

#[test]
fn test_full_curation_workflow() {
    let config_dir = TempDir::new().unwrap();
    let session = Session::load(&setup_session(&config_dir)).unwrap();
    assert_eq!(session.catalog().profiles().len(), 2);

    let files = TestTree::sample();
    let ipm = session.ipm_service();
    let profiles = session.profile_service();

    // 1. Scan and type
    let mut tree = ipm.create_tree_from_file_system(&files.root_path()).unwrap();
    let mut store = InMemoryStore::new();
    let root = tree.root();
    assert!(profiles.assign_node_types(&mut tree, &mut store, root).unwrap());
    assert!(profiles.validate_tree(&tree, &store, root, true).unwrap());

    // 2. Curate: rights on the collection, inherited downwards
    profiles
        .set_property(&tree, &mut store, root, PropertyValue::new("rights", "CC-BY"))
        .unwrap();
    assert_eq!(
        profiles
            .propagate_inherited_properties(&tree, &mut store, root)
            .unwrap(),
        3
    );

    // 3. b.txt becomes a Photo; Photo does not admit rights
    let b = tree.find_by_relative("sub/b.txt").unwrap();
    let offered = profiles.get_node_transforms(&tree, b).unwrap();
    assert_eq!(offered.len(), 1);
    assert_eq!(offered[0].target, "Photo");
    assert!(profiles.transform_node(&mut tree, &mut store, b, &offered[0]).unwrap());
    let b_object = tree.node(b).unwrap().object_id.unwrap();
    assert_eq!(
        store.get_properties(b_object).unwrap(),
        vec![PropertyValue::new("title", "b.txt")]
    );

    // 4. Persist the object store
    let snapshot = NormalizedPath::new(config_dir.path().join("objects.json"));
    store.save(&snapshot).unwrap();
    let mut store = InMemoryStore::load(&snapshot).unwrap();
    assert_eq!(store.len(), 4);

    // 5. The directory changes on disk
    files.remove("a.txt");
    files.write("sub/c.txt", "gamma");
    let rescanned = ipm.create_tree_from_file_system(&files.root_path()).unwrap();
    let empty = InMemoryStore::new();
    let comparison = TreeSnapshot::new(&rescanned, &empty);

    let result = ipm
        .compare_tree(TreeSnapshot::new(&tree, &store), comparison)
        .unwrap();
    let changes: Vec<(&str, &NodeComparisonStatus)> = result
        .changes()
        .map(|e| (e.path.as_str(), &e.status))
        .collect();
    assert_eq!(
        changes,
        vec![
            ("a.txt", &NodeComparisonStatus::Deleted),
            ("sub/c.txt", &NodeComparisonStatus::Added),
        ]
    );

    // 6. Accept everything, then type the new file
    let report = ipm.merge_tree(&mut tree, &mut store, comparison, &result).unwrap();
    assert_eq!((report.added, report.deleted), (1, 1));
    assert!(profiles.assign_node_types(&mut tree, &mut store, root).unwrap());

    let c = tree.node(tree.find_by_relative("sub/c.txt").unwrap()).unwrap();
    assert_eq!(c.node_type(), Some("Item"));
    assert_eq!(
        store.get_properties(c.object_id.unwrap()).unwrap(),
        vec![PropertyValue::new("title", "c.txt")]
    );
    assert_eq!(tree.node(b).unwrap().node_type(), Some("Photo"));
    assert_eq!(store.len(), 4);
    assert!(profiles.validate_tree(&tree, &store, root, true).unwrap());
}
