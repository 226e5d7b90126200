//! Property tests for path normalization

use proptest::prelude::*;
use vfs_path::{NameRules, PathAlgebra, UnixNameRules, WindowsNameRules};

fn component() -> impl Strategy<Value = String> {
    "[a-z0-9_]{1,8}"
}

fn dotted_component() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => component(),
        1 => Just(".".to_string()),
        1 => Just("..".to_string()),
    ]
}

proptest! {
    #[test]
    fn normalize_is_idempotent_unix(
        parts in prop::collection::vec(dotted_component(), 0..8),
        backslashes in any::<bool>(),
    ) {
        let paths = PathAlgebra::unix();
        let separator = if backslashes { "\\" } else { "/" };
        let raw = format!("{separator}{}", parts.join(separator));

        if let Ok(once) = paths.normalize(&raw) {
            let twice = paths.normalize(once.as_str()).unwrap();
            prop_assert_eq!(once, twice);
        }
    }

    #[test]
    fn normalize_is_idempotent_windows(
        drive in "[a-z]",
        parts in prop::collection::vec(dotted_component(), 0..8),
    ) {
        let paths = PathAlgebra::windows();
        let raw = format!("{drive}:\\{}", parts.join("/"));

        if let Ok(once) = paths.normalize(&raw) {
            let twice = paths.normalize(once.as_str()).unwrap();
            prop_assert!(WindowsNameRules.is_valid_path(once.as_str()));
            prop_assert_eq!(once, twice);
        }
    }

    #[test]
    fn split_then_join_round_trips(parts in prop::collection::vec(component(), 0..8)) {
        let paths = PathAlgebra::unix();
        let raw = format!("/{}", parts.join("/"));

        let components = paths.split(&raw).unwrap();
        let rebuilt = paths.components_to_path(&components);
        let normalized = paths.normalize(&raw).unwrap();
        prop_assert_eq!(rebuilt.as_str(), normalized.as_str());
        prop_assert_eq!(rebuilt, raw);
    }

    #[test]
    fn normalized_absolute_paths_stay_valid(parts in prop::collection::vec(dotted_component(), 0..8)) {
        let paths = PathAlgebra::unix();
        let raw = format!("/{}", parts.join("/"));

        if let Ok(normalized) = paths.normalize(&raw) {
            prop_assert!(UnixNameRules.is_valid_path(normalized.as_str()));
            prop_assert!(!normalized.as_str().split('/').any(|c| c == "." || c == ".."));
        }
    }
}
