//! Scenario tests over real directory trees
//!
//! Each module drives the public services the way a host application
//! would: scan a directory, curate the tree, rescan and reconcile.

use ipm_core::{DomainProfileService, IpmService, IpmTree, NodeComparisonStatus, TreeSnapshot};
use ipm_fs::{FileKind, LocalFileSystem};
use ipm_store::InMemoryStore;
use ipm_test_utils::{TestTree, archive_catalog};
use pretty_assertions::assert_eq;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn scan(files: &TestTree, fs: &LocalFileSystem) -> IpmTree {
    IpmService::new(fs)
        .create_tree_from_file_system(&files.root_path())
        .unwrap()
}

/// Ignore flags by relative path, in pre-order.
fn ignore_flags(tree: &IpmTree) -> Vec<(String, bool)> {
    tree.pre_order(tree.root())
        .into_iter()
        .map(|id| {
            (
                tree.relative_path(id).unwrap(),
                tree.node(id).unwrap().ignored,
            )
        })
        .collect()
}

// =============================================================================
// Scenario 1: Scanning and ignore state
// =============================================================================

mod s1_scan_ignore {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scan_sample_directory() {
        let files = TestTree::sample();
        let fs = LocalFileSystem::new();
        let tree = scan(&files, &fs);

        assert_eq!(tree.len(), 4);
        let kind = |rel: &str| tree.node(tree.find_by_relative(rel).unwrap()).unwrap().kind();
        assert_eq!(kind(""), FileKind::Directory);
        assert_eq!(kind("sub"), FileKind::Directory);
        assert_eq!(kind("a.txt"), FileKind::File);
        assert_eq!(kind("sub/b.txt"), FileKind::File);
    }

    #[test]
    fn ignore_sub_then_unignore_leaf() {
        let files = TestTree::sample();
        let fs = LocalFileSystem::new();
        let service = IpmService::new(&fs);
        let mut tree = scan(&files, &fs);
        let sub = tree.find_by_relative("sub").unwrap();
        let b = tree.find_by_relative("sub/b.txt").unwrap();

        service.ignore_node(&mut tree, sub, true).unwrap();
        assert_eq!(
            ignore_flags(&tree),
            vec![
                ("".to_string(), false),
                ("a.txt".to_string(), false),
                ("sub".to_string(), true),
                ("sub/b.txt".to_string(), true),
            ]
        );

        service.ignore_node(&mut tree, b, false).unwrap();
        assert!(ignore_flags(&tree).iter().all(|(_, ignored)| !ignored));
    }
}

// =============================================================================
// Scenario 2: Type assignment
// =============================================================================

mod s2_assign {
    use super::*;
    use pretty_assertions::assert_eq;
    use ipm_rules::{FileOperation, RuleSet, TestOperation};

    #[test]
    fn assignment_implies_validity() {
        let files = TestTree::sample()
            .with_dir("empty")
            .with_file("sub/deep/c.txt", "gamma");
        let fs = LocalFileSystem::new();
        let catalog = archive_catalog();
        let service = DomainProfileService::new(&catalog, &fs);
        let mut tree = scan(&files, &fs);
        let mut store = InMemoryStore::new();
        let root = tree.root();

        assert!(service.assign_node_types(&mut tree, &mut store, root).unwrap());
        assert!(service.validate_tree(&tree, &store, root, false).unwrap());
        assert_eq!(store.len(), tree.len());
    }

    #[test]
    fn count_rule_separates_folders() {
        let files = TestTree::sample().with_dir("empty");
        let fs = LocalFileSystem::new();
        let catalog = archive_catalog();
        let has_children = TestOperation::count(Some(1), None, vec![FileOperation::children().into()]);
        let rules = RuleSet::new()
            .with_type_rule("Folder", has_children.clone())
            .with_type_rule("Item", TestOperation::not(has_children));
        let service = DomainProfileService::new(&catalog, &fs).with_rules(&rules);
        let mut tree = scan(&files, &fs);
        let mut store = InMemoryStore::new();
        let root = tree.root();

        assert!(service.assign_node_types(&mut tree, &mut store, root).unwrap());

        let type_of = |rel: &str| {
            tree.node(tree.find_by_relative(rel).unwrap())
                .unwrap()
                .node_type()
                .map(str::to_string)
        };
        assert_eq!(type_of("sub").as_deref(), Some("Folder"));
        assert_eq!(type_of("empty").as_deref(), Some("Item"));
        assert_eq!(type_of("a.txt").as_deref(), Some("Item"));
    }
}

// =============================================================================
// Scenario 3: Compare and merge
// =============================================================================

mod s3_compare_merge {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn copy_compares_unchanged() {
        let files = TestTree::sample();
        let fs = LocalFileSystem::new();
        let catalog = archive_catalog();
        let service = IpmService::new(&fs);
        let mut tree = scan(&files, &fs);
        let mut store = InMemoryStore::new();
        let root = tree.root();
        DomainProfileService::new(&catalog, &fs)
            .assign_node_types(&mut tree, &mut store, root)
            .unwrap();
        let copy = tree.clone();
        let copy_store = store.clone();
        let comparison = TreeSnapshot::new(&copy, &copy_store);

        let result = service
            .compare_tree(TreeSnapshot::new(&tree, &store), comparison)
            .unwrap();
        assert!(result.is_unchanged());

        let before = tree.clone();
        let report = service
            .merge_tree(&mut tree, &mut store, comparison, &result)
            .unwrap();
        assert!(report.is_empty());
        assert_eq!(tree.len(), before.len());
        for (id, node) in before.iter() {
            assert_eq!(tree.node(id).unwrap(), node);
        }
    }

    #[test]
    fn added_file_is_inserted_under_its_parent() {
        let files = TestTree::sample();
        let fs = LocalFileSystem::new();
        let service = IpmService::new(&fs);
        let mut existing = scan(&files, &fs);
        let mut store = InMemoryStore::new();
        files.write("sub/c.txt", "gamma");
        let rescanned = scan(&files, &fs);
        let empty = InMemoryStore::new();
        let comparison = TreeSnapshot::new(&rescanned, &empty);

        let result = service
            .compare_tree(TreeSnapshot::new(&existing, &store), comparison)
            .unwrap();
        let changes: Vec<_> = result.changes().collect();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].path, "sub/c.txt");
        assert_eq!(changes[0].status, NodeComparisonStatus::Added);

        let before = existing.clone();
        service
            .merge_tree(&mut existing, &mut store, comparison, &result)
            .unwrap();

        let c = existing.find_by_relative("sub/c.txt").unwrap();
        assert_eq!(existing.parent(c), existing.find_by_relative("sub"));
        assert_eq!(existing.len(), before.len() + 1);
        for (id, node) in before.iter() {
            if Some(id) == existing.find_by_relative("sub") {
                continue;
            }
            assert_eq!(existing.node(id).unwrap(), node);
        }
    }
}
