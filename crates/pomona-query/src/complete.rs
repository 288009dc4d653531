//! Term completeness check.
//!
//! Decides whether free text typed so far is worth evaluating. Text that stops right after a
//! grammar keyword (`name:`, `starts with:`, `calories: >=`) is incomplete: evaluating it
//! would match on an empty value and flood the result list.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::field::Field;

/// Completeness of a piece of query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Completeness {
    /// Nothing but whitespace.
    Empty,
    /// Ends on a qualifier, modifier or operator with no value yet.
    Incomplete,
    /// Ready to evaluate.
    Complete,
}

impl Completeness {
    /// Returns true when evaluation should run.
    pub fn is_complete(self) -> bool {
        self == Self::Complete
    }
}

/// A field qualifier with nothing after its colon.
static BARE_QUALIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*((?-u:\w)+)\s*:\s*$").expect("valid regex"));

/// A modifier keyword with nothing after its colon.
static BARE_MODIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:starts|ends)\s+with\s*:\s*$").expect("valid regex")
});

/// A field-qualified modifier keyword with nothing after its colon.
static QUALIFIED_MODIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*((?-u:\w)+)\s*:\s*(?:starts|ends)\s+with\s*:\s*$")
        .expect("valid regex")
});

/// A field-qualified comparison operator with no number.
static QUALIFIED_OPERATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*((?-u:\w)+)\s*:\s*(?:>=|<=)\s*$").expect("valid regex")
});

/// The known field named by the first capture of `pattern`, if `text` matches.
fn qualifier(pattern: &Regex, text: &str) -> Option<Field> {
    Field::lookup(pattern.captures(text)?.get(1)?.as_str())
}

/// Returns true if `text` stops right where a value must follow.
///
/// Unknown qualifiers never count: the parser reads them as free text. Operators only wait
/// for a value after a numeric field, since elsewhere they are matched literally.
fn awaits_value(text: &str) -> bool {
    BARE_MODIFIER.is_match(text)
        || qualifier(&BARE_QUALIFIER, text).is_some()
        || qualifier(&QUALIFIED_MODIFIER, text).is_some()
        || qualifier(&QUALIFIED_OPERATOR, text).is_some_and(Field::is_numeric)
}

/// Classifies `text` as empty, incomplete or complete.
pub fn completeness(text: &str) -> Completeness {
    if text.trim().is_empty() {
        Completeness::Empty
    } else if awaits_value(text) {
        Completeness::Incomplete
    } else {
        Completeness::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text() {
        assert_eq!(completeness(""), Completeness::Empty);
        assert_eq!(completeness("   "), Completeness::Empty);
    }

    #[test]
    fn bare_qualifier_is_incomplete() {
        assert_eq!(completeness("name:"), Completeness::Incomplete);
        assert_eq!(completeness("  calories : "), Completeness::Incomplete);
    }

    #[test]
    fn bare_modifier_is_incomplete() {
        assert_eq!(completeness("starts with:"), Completeness::Incomplete);
        assert_eq!(completeness("Ends With: "), Completeness::Incomplete);
    }

    #[test]
    fn qualified_modifier_is_incomplete() {
        assert_eq!(completeness("name: starts with:"), Completeness::Incomplete);
        assert_eq!(completeness("name:ends with: "), Completeness::Incomplete);
    }

    #[test]
    fn qualified_operator_is_incomplete() {
        assert_eq!(completeness("calories: >="), Completeness::Incomplete);
        assert_eq!(completeness("fat:<= "), Completeness::Incomplete);
    }

    #[test]
    fn values_make_text_complete() {
        for text in [
            "apple",
            "name: app",
            "starts with: p",
            "name: starts with: p",
            "calories: >= 5",
            "starts with",
        ] {
            assert!(completeness(text).is_complete(), "{text:?} should be complete");
        }
    }

    #[test]
    fn unknown_qualifier_is_free_text() {
        assert_eq!(completeness("colour:"), Completeness::Complete);
        assert_eq!(completeness("colour: starts with:"), Completeness::Complete);
        assert_eq!(completeness("colour: >="), Completeness::Complete);
    }

    #[test]
    fn operator_after_text_field_is_a_value() {
        assert_eq!(completeness("name: >="), Completeness::Complete);
        assert_eq!(completeness("genus: <= "), Completeness::Complete);
    }

    #[test]
    fn qualifier_lookup_ignores_case() {
        assert_eq!(completeness("CALORIES: >="), Completeness::Incomplete);
        assert_eq!(completeness("Name:"), Completeness::Incomplete);
    }
}
