//! Predicate evaluation.
//!
//! Matching is total: a missing field reads as empty text for string matches and never
//! satisfies a numeric comparison. All text comparisons are case-insensitive.

use pomona_query::{Field, MatchKind, Mode, Query, TermPredicate};
use tracing::debug;

use crate::record::Record;

/// Tests one field of `record` as lowercase text.
fn text_matches(record: &Record, field: Field, kind: MatchKind, needle: &str) -> bool {
    let haystack = record.field(field).as_text().to_lowercase();
    kind.test(&haystack, needle)
}

/// Returns true if `record` satisfies `predicate`.
pub fn matches(record: &Record, predicate: &TermPredicate) -> bool {
    match predicate {
        TermPredicate::Unscoped { kind, value } => {
            let needle = value.to_lowercase();
            Field::TEXT
                .into_iter()
                .any(|field| text_matches(record, field, *kind, &needle))
        }
        TermPredicate::ScopedText { field, kind, value } => {
            text_matches(record, *field, *kind, &value.to_lowercase())
        }
        TermPredicate::ScopedSubstring { field, value } => {
            text_matches(record, *field, MatchKind::Contains, &value.to_lowercase())
        }
        TermPredicate::NumericCompare { field, op, value } => record
            .field(*field)
            .as_number()
            .is_some_and(|n| op.compare(n, *value)),
    }
}

/// Returns true if `record` satisfies `query` under its combination mode.
///
/// A query without terms matches nothing.
pub fn matches_query(record: &Record, query: &Query) -> bool {
    if query.terms.is_empty() {
        return false;
    }
    match query.mode {
        Mode::And => query.terms.iter().all(|term| matches(record, term)),
        Mode::Or => query.terms.iter().any(|term| matches(record, term)),
    }
}

/// Returns the records matching `query`, preserving input order.
pub fn evaluate<'a>(records: &'a [Record], query: &Query) -> Vec<&'a Record> {
    let matched: Vec<&Record> = records
        .iter()
        .filter(|record| matches_query(record, query))
        .collect();
    debug!(
        records = records.len(),
        terms = query.terms.len(),
        mode = %query.mode,
        matched = matched.len(),
        "evaluated query"
    );
    matched
}
