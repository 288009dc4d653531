//! Property tests for query splitting and parsing.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use pomona_query::{Mode, parse_query, split_query};
use proptest::prelude::*;

/// A single token with no separators, colons or whitespace.
fn plain_token() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9.,'-]{1,12}"
}

/// Free-text terms, some of them field-qualified.
fn term() -> impl Strategy<Value = String> {
    prop_oneof![
        plain_token(),
        plain_token().prop_map(|t| format!("name: {t}")),
        plain_token().prop_map(|t| format!("family: starts with: {t}")),
        (0u32..500).prop_map(|n| format!("calories: >= {n}")),
    ]
}

proptest! {
    #[test]
    fn plain_token_is_its_own_term(token in plain_token(), pad in " {0,3}") {
        let query = split_query(&format!("{pad}{token}{pad}"));
        prop_assert_eq!(query.mode, Mode::Or);
        prop_assert_eq!(query.terms, vec![token]);
    }

    #[test]
    fn rejoined_query_splits_the_same(
        terms in prop::collection::vec(term(), 1..5),
        and in any::<bool>(),
    ) {
        let separator = if and { " && " } else { " || " };
        let first = split_query(&terms.join(separator));
        let second = split_query(&first.to_query_string());
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(parse_query(&first.to_query_string()), parse_query(&terms.join(separator)));
    }

    #[test]
    fn parsing_never_panics(text in "\\PC{0,40}") {
        let query = parse_query(&text);
        prop_assert!(query.terms.len() <= text.len());
    }
}
