//! Path label normalization properties.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use aloha_core::label::{path_label, ROOT_LABEL};
use proptest::prelude::*;

#[test]
fn known_paths() {
    assert_eq!(path_label("/foo/Bar-1"), "foo_bar_1");
    assert_eq!(path_label("/"), "root");
    assert_eq!(path_label("///"), "root");
    assert_eq!(path_label(""), "root");
    assert_eq!(path_label("/version"), "version");
    assert_eq!(path_label("/api/v2//Users/42/"), "api_v2_users_42");
}

#[test]
fn runs_collapse_to_one_underscore() {
    assert_eq!(path_label("a--__..b"), "a_b");
    assert_eq!(path_label("_a_"), "a");
    assert_eq!(path_label("/ünï/cödé"), "n_c_d");
}

#[test]
fn root_label_is_stable() {
    assert_eq!(path_label(ROOT_LABEL), ROOT_LABEL);
}

proptest! {
    #[test]
    fn output_is_safe(raw in ".*") {
        let label = path_label(&raw);
        prop_assert!(!label.is_empty());
        prop_assert!(!label.starts_with('_'));
        prop_assert!(!label.ends_with('_'));
        prop_assert!(!label.contains("__"));
        prop_assert!(label
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
    }

    #[test]
    fn idempotent(raw in ".*") {
        let once = path_label(&raw);
        prop_assert_eq!(path_label(&once), once.clone());
    }

    #[test]
    fn symbol_only_input_is_root(raw in "[^a-zA-Z0-9]*") {
        prop_assert_eq!(path_label(&raw), ROOT_LABEL);
    }
}
