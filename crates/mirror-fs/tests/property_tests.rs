use mirror_fs::RelativePath;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_normalization_invariants(s in "\\PC*") {
        let path = RelativePath::new(&s);
        let as_str = path.as_str();

        #[cfg(windows)]
        prop_assert!(!as_str.contains('\\'));
        prop_assert!(!as_str.contains("//"));
        prop_assert!(!as_str.starts_with('/'));

        // Normalizing an already-normalized path is the identity
        let again = RelativePath::new(as_str);
        prop_assert_eq!(&path, &again);

        // Resolving under a root and stripping it again round-trips
        let root = std::path::Path::new("root");
        let resolved = path.resolve(root);
        prop_assert_eq!(RelativePath::from_full(root, &resolved), Some(path));
    }

    #[test]
    #[cfg(windows)]
    fn test_separator_convention_is_irrelevant(parts in prop::collection::vec("[a-z0-9._-]{1,8}", 1..5)) {
        let unix = parts.join("/");
        let windows = parts.join("\\");
        prop_assert_eq!(RelativePath::new(&unix), RelativePath::new(&windows));
    }

    #[test]
    fn test_join_is_within_parent(a in "[a-z]{1,6}(/[a-z]{1,6}){0,3}", b in "[a-z]{1,6}") {
        let parent = RelativePath::new(&a);
        let child = parent.join(&b);
        prop_assert!(child.is_within(&parent));
        prop_assert_eq!(child.parent(), Some(parent));
    }
}
