//! Autocomplete for partially typed terms.
//!
//! The grammar position is recovered from the text alone:
//!
//! - no colon yet: suggest field names
//! - `field:` followed by no further colon: suggest modifiers (and operators for numeric fields)
//! - anything else: suggest nothing
//!
//! Narrowing is by case-insensitive prefix. When the typed text diverges from every candidate
//! the list is empty rather than padded with near misses.

use pomona_query::{CompareOp, Field, FieldKind, MatchKind};
use serde::Serialize;
use tracing::trace;

/// What selecting a suggestion inserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    /// A field qualifier.
    FieldName,
    /// `starts with:` or `ends with:`.
    TextModifier,
    /// A numeric comparison operator.
    NumericModifier,
}

/// One autocomplete entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionItem {
    /// Text shown to the user.
    pub label: String,
    /// Text inserted on selection.
    pub value: String,
    /// Grammar position this item fills.
    pub kind: SuggestionKind,
}

impl SuggestionItem {
    /// Suggestion for a field qualifier.
    fn field(field: Field) -> Self {
        Self {
            label: field.label().to_string(),
            value: field.identifier().to_string(),
            kind: SuggestionKind::FieldName,
        }
    }

    /// Suggestion for a comparison operator.
    fn operator(op: CompareOp) -> Self {
        let meaning = match op {
            CompareOp::AtLeast => "at least",
            CompareOp::AtMost => "at most",
        };
        Self {
            label: format!("{} ({meaning})", op.symbol()),
            value: op.symbol().to_string(),
            kind: SuggestionKind::NumericModifier,
        }
    }

    /// Suggestion for a text modifier keyword.
    fn modifier(label: &str, keyword: &str) -> Self {
        Self {
            label: label.to_string(),
            value: keyword.to_string(),
            kind: SuggestionKind::TextModifier,
        }
    }
}

/// Case-insensitive prefix test.
fn starts_with_ignore_case(candidate: &str, prefix: &str) -> bool {
    candidate.to_lowercase().starts_with(&prefix.to_lowercase())
}

/// Field names whose identifier or label starts with `prefix`.
fn field_suggestions(prefix: &str) -> Vec<SuggestionItem> {
    Field::ALL
        .into_iter()
        .filter(|field| {
            starts_with_ignore_case(field.identifier(), prefix)
                || starts_with_ignore_case(field.label(), prefix)
        })
        .map(SuggestionItem::field)
        .collect()
}

/// Every modifier valid after `field:`, operators first for numeric fields.
fn modifier_candidates(field: Field) -> Vec<SuggestionItem> {
    let mut items = Vec::new();
    if field.kind() == FieldKind::Numeric {
        items.extend(CompareOp::ALL.into_iter().map(SuggestionItem::operator));
    }
    for (label, kind) in [
        ("Starts with", MatchKind::StartsWith),
        ("Ends with", MatchKind::EndsWith),
    ] {
        if let Some(keyword) = kind.keyword() {
            items.push(SuggestionItem::modifier(label, keyword));
        }
    }
    items
}

/// Returns the suggestions valid at the end of `text`.
pub fn suggestions(text: &str) -> Vec<SuggestionItem> {
    let text = text.trim_start();
    let Some((before, after)) = text.split_once(':') else {
        return field_suggestions(text);
    };
    if after.contains(':') {
        trace!(text, "past modifier position");
        return Vec::new();
    }
    let Some(field) = Field::lookup(before) else {
        trace!(text, "unknown field qualifier");
        return Vec::new();
    };
    let typed = after.trim();
    modifier_candidates(field)
        .into_iter()
        .filter(|item| starts_with_ignore_case(&item.value, typed))
        .collect()
}

/// Rewrites `input` as if `item` had been selected.
///
/// A field replaces the whole input with `field:`. A modifier replaces everything after the
/// last colon and is followed by a space, leaving the input ready for a value.
pub fn apply_suggestion(input: &str, item: &SuggestionItem) -> String {
    match item.kind {
        SuggestionKind::FieldName => format!("{}:", item.value),
        SuggestionKind::TextModifier | SuggestionKind::NumericModifier => {
            let head = input.rfind(':').map_or(input, |colon| &input[..=colon]);
            format!("{head}{} ", item.value)
        }
    }
}

/// Autocomplete state for one input line.
#[derive(Debug, Clone, Default)]
pub struct Completer {
    /// The raw text being typed.
    input: String,
    /// Suggestions for the current input.
    items: Vec<SuggestionItem>,
}

impl Completer {
    /// Creates an empty completer with no suggestions shown.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current input text.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The suggestions currently offered.
    pub fn items(&self) -> &[SuggestionItem] {
        &self.items
    }

    /// Replaces the input and recomputes suggestions.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.items = suggestions(&self.input);
    }

    /// Selects the suggestion at `index`, rewriting the input and clearing the list.
    ///
    /// Returns the new input, or `None` if there is no such suggestion.
    pub fn select(&mut self, index: usize) -> Option<&str> {
        let item = self.items.get(index)?;
        self.input = apply_suggestion(&self.input, item);
        self.items.clear();
        Some(&self.input)
    }
}
