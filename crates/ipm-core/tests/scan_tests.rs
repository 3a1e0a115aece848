//! Tests for building trees from the file system

use ipm_core::{IpmService, ScanOptions};
use ipm_fs::{FileKind, LocalFileSystem, NormalizedPath};
use ipm_test_utils::TestTree;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn relative_paths(service: &IpmService<'_>, files: &TestTree) -> Vec<String> {
    let tree = service
        .create_tree_from_file_system(&files.root_path())
        .unwrap();
    tree.pre_order(tree.root())
        .into_iter()
        .filter_map(|id| tree.relative_path(id))
        .collect()
}

#[test]
fn test_scan_mirrors_directory() {
    let files = TestTree::sample();
    let fs = LocalFileSystem::new();
    let tree = IpmService::new(&fs)
        .create_tree_from_file_system(&files.root_path())
        .unwrap();

    assert_eq!(tree.len(), 4);
    assert_eq!(tree.root_path(), &files.root_path());
    assert!(tree.iter().all(|(_, n)| n.node_type.is_none() && !n.ignored));

    let a = tree.node(tree.find_by_relative("a.txt").unwrap()).unwrap();
    assert_eq!(a.kind(), FileKind::File);
    assert_eq!(a.record.metadata.size, 5);
    assert_eq!(a.record.format.as_deref(), Some("text/plain"));
    assert_eq!(a.parent(), Some(tree.root()));

    let sub = tree.find_by_relative("sub").unwrap();
    assert!(tree.node(sub).unwrap().is_dir());
    assert_eq!(tree.children(sub).len(), 1);
}

#[test]
fn test_children_in_name_order() {
    let files = TestTree::new()
        .with_file("zeta.txt", "z")
        .with_file("alpha.txt", "a")
        .with_dir("mid");
    let fs = LocalFileSystem::new();

    assert_eq!(
        relative_paths(&IpmService::new(&fs), &files),
        vec!["", "alpha.txt", "mid", "zeta.txt"]
    );
}

#[rstest]
#[case(ScanOptions::default(), 5)]
#[case(ScanOptions { include_hidden: false, max_depth: None }, 4)]
#[case(ScanOptions { include_hidden: true, max_depth: Some(1) }, 4)]
#[case(ScanOptions { include_hidden: false, max_depth: Some(1) }, 3)]
#[case(ScanOptions { include_hidden: true, max_depth: Some(0) }, 1)]
fn test_scan_options(#[case] options: ScanOptions, #[case] nodes: usize) {
    let files = TestTree::sample().with_file(".hidden", "h");
    let fs = LocalFileSystem::new();

    let paths = relative_paths(&IpmService::new(&fs).with_options(options), &files);
    assert_eq!(paths.len(), nodes, "{:?}", paths);
}

#[test]
fn test_single_file_root() {
    let files = TestTree::sample();
    let fs = LocalFileSystem::new();
    let tree = IpmService::new(&fs)
        .create_tree_from_file_system(&files.path("a.txt"))
        .unwrap();

    assert_eq!(tree.len(), 1);
    assert_eq!(tree.node(tree.root()).unwrap().name(), "a.txt");
}

#[test]
fn test_missing_root_fails() {
    let files = TestTree::new();
    let fs = LocalFileSystem::new();
    let missing: NormalizedPath = files.path("absent");

    assert!(IpmService::new(&fs).create_tree_from_file_system(&missing).is_err());
}
