use ipm_fs::NormalizedPath;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_normalization_invariants(s in "\\PC*") {
        let path = NormalizedPath::new(&s);
        let as_str = path.as_str();

        prop_assert!(!as_str.contains('\\'));
        prop_assert!(!as_str.contains("//"));
        prop_assert!(as_str == "/" || !as_str.ends_with('/'));

        // Normalizing twice changes nothing
        let again = NormalizedPath::new(path.to_native());
        prop_assert_eq!(path, again);
    }

    #[test]
    fn test_join_then_relative(base in "/[a-z]{1,8}(/[a-z]{1,8}){0,3}", seg in "[a-z]{1,8}(/[a-z]{1,8}){0,2}") {
        let base = NormalizedPath::new(&base);
        let joined = base.join(&seg);

        prop_assert!(joined.starts_with(&base));
        prop_assert_eq!(joined.relative_to(&base), Some(seg));
    }
}
