//! Term parser.
//!
//! Converts one raw term string into a [`TermPredicate`] by trying an ordered list of
//! recognizers. Each recognizer either produces a predicate or defers to the next one; the
//! last resort is an unscoped substring term, so parsing never fails.
//!
//! # Recognition order
//!
//! ```text
//! 1. field: >= N | field: <= N        numeric field comparison
//! 2. starts with: value               unscoped prefix
//! 3. ends with: value                 unscoped suffix
//! 4. field: starts with: value        scoped prefix
//! 5. field: ends with: value          scoped suffix
//! 6. field: value                     scoped substring
//! 7. starts with value                unscoped prefix (no colon)
//! 8. anything else                    unscoped substring
//! ```
//!
//! Field names and modifier keywords are case-insensitive. An unknown field name before a
//! colon is not an error: the whole term becomes free text.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::{
    ast::{CompareOp, MatchKind, Mode, Query, TermPredicate},
    field::{Field, FieldKind},
    lexer::split_query_with,
};

/// `identifier : rest` with the rest trimmed.
static QUALIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\s*((?-u:\w)+)\s*:\s*(.*?)\s*$").expect("valid regex"));

/// `>= N` or `<= N` after a qualifier.
static COMPARISON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(>=|<=)\s*([-+]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+))$").expect("valid regex")
});

/// `starts with: value`.
static STARTS_WITH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)^\s*starts\s+with\s*:\s*(.*?)\s*$").expect("valid regex"));

/// `ends with: value`.
static ENDS_WITH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)^\s*ends\s+with\s*:\s*(.*?)\s*$").expect("valid regex"));

/// `starts with value`, without a colon.
static BARE_STARTS_WITH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)^\s*starts\s+with\s+(.+?)\s*$").expect("valid regex"));

/// A recognition rule: produces a predicate or defers to the next rule.
type Recognizer = fn(&str) -> Option<TermPredicate>;

/// Recognizers in precedence order, named for diagnostics.
const RULES: &[(&str, Recognizer)] = &[
    ("numeric comparison", numeric_comparison),
    ("unscoped starts with", unscoped_starts_with),
    ("unscoped ends with", unscoped_ends_with),
    ("scoped starts with", scoped_starts_with),
    ("scoped ends with", scoped_ends_with),
    ("field qualifier", field_qualifier),
    ("bare starts with", bare_starts_with),
];

/// Splits a term into a known field and the trimmed text after its colon.
fn qualified(term: &str) -> Option<(Field, &str)> {
    let caps = QUALIFIER.captures(term)?;
    let field = Field::lookup(caps.get(1)?.as_str())?;
    Some((field, caps.get(2)?.as_str()))
}

/// Returns the modifier pattern for a match kind.
fn modifier_pattern(kind: MatchKind) -> Option<&'static Regex> {
    match kind {
        MatchKind::StartsWith => Some(&*STARTS_WITH),
        MatchKind::EndsWith => Some(&*ENDS_WITH),
        MatchKind::Contains => None,
    }
}

/// Extracts the value after a modifier keyword.
fn modifier_value(kind: MatchKind, text: &str) -> Option<String> {
    let caps = modifier_pattern(kind)?.captures(text)?;
    Some(caps.get(1)?.as_str().to_string())
}

/// Rule 1: `field: >= N` on a numeric field.
fn numeric_comparison(term: &str) -> Option<TermPredicate> {
    let (field, rest) = qualified(term)?;
    if field.kind() != FieldKind::Numeric {
        return None;
    }
    let caps = COMPARISON.captures(rest)?;
    let op = CompareOp::from_symbol(caps.get(1)?.as_str())?;
    let value = caps.get(2)?.as_str().parse::<f64>().ok()?;
    Some(TermPredicate::NumericCompare { field, op, value })
}

/// Rule 2: `starts with: value`.
fn unscoped_starts_with(term: &str) -> Option<TermPredicate> {
    unscoped_modifier(term, MatchKind::StartsWith)
}

/// Rule 3: `ends with: value`.
fn unscoped_ends_with(term: &str) -> Option<TermPredicate> {
    unscoped_modifier(term, MatchKind::EndsWith)
}

/// Shared body of rules 2 and 3.
fn unscoped_modifier(term: &str, kind: MatchKind) -> Option<TermPredicate> {
    let value = modifier_value(kind, term)?;
    Some(TermPredicate::Unscoped { kind, value })
}

/// Rule 4: `field: starts with: value`.
fn scoped_starts_with(term: &str) -> Option<TermPredicate> {
    scoped_modifier(term, MatchKind::StartsWith)
}

/// Rule 5: `field: ends with: value`.
fn scoped_ends_with(term: &str) -> Option<TermPredicate> {
    scoped_modifier(term, MatchKind::EndsWith)
}

/// Shared body of rules 4 and 5.
fn scoped_modifier(term: &str, kind: MatchKind) -> Option<TermPredicate> {
    let (field, rest) = qualified(term)?;
    let value = modifier_value(kind, rest)?;
    Some(TermPredicate::ScopedText { field, kind, value })
}

/// Rule 6: `field: value`.
fn field_qualifier(term: &str) -> Option<TermPredicate> {
    let (field, rest) = qualified(term)?;
    let value = rest.to_string();
    Some(match field.kind() {
        FieldKind::Numeric => TermPredicate::ScopedSubstring { field, value },
        FieldKind::Text => TermPredicate::ScopedText {
            field,
            kind: MatchKind::Contains,
            value,
        },
    })
}

/// Rule 7: `starts with value` without any colon.
fn bare_starts_with(term: &str) -> Option<TermPredicate> {
    if term.contains(':') {
        return None;
    }
    let caps = BARE_STARTS_WITH.captures(term)?;
    Some(TermPredicate::Unscoped {
        kind: MatchKind::StartsWith,
        value: caps.get(1)?.as_str().to_string(),
    })
}

/// Parses one raw term into a predicate. Total over all input strings.
pub fn parse_term(term: &str) -> TermPredicate {
    for (name, rule) in RULES {
        if let Some(predicate) = rule(term) {
            debug!(term, rule = *name, "recognized term");
            return predicate;
        }
    }
    debug!(term, rule = "free text", "recognized term");
    TermPredicate::contains(term.trim())
}

/// Splits and parses `text` using OR as the default mode.
pub fn parse_query(text: &str) -> Query {
    parse_query_with(text, Mode::Or)
}

/// Splits and parses `text`, falling back to `default_mode` when no separator is present.
pub fn parse_query_with(text: &str, default_mode: Mode) -> Query {
    let raw = split_query_with(text, default_mode);
    Query::new(raw.mode, raw.terms.iter().map(|t| parse_term(t)).collect())
}
