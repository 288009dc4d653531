//! Query vocabulary.
//!
//! A query is a flat list of term predicates joined by a single [`Mode`]. There is no nesting:
//! `a && b || c` is two AND terms, the second of which is the literal text `b || c`.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{error::QueryError, field::Field};

/// The boolean combinator applied across all terms of one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Every term must match.
    And,
    /// At least one term must match.
    #[default]
    Or,
}

impl Mode {
    /// The literal separator that selects this mode in query text.
    pub fn separator(self) -> &'static str {
        match self {
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => f.write_str("and"),
            Self::Or => f.write_str("or"),
        }
    }
}

impl FromStr for Mode {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("and") || trimmed == "&&" {
            Ok(Self::And)
        } else if trimmed.eq_ignore_ascii_case("or") || trimmed == "||" {
            Ok(Self::Or)
        } else {
            Err(QueryError::UnknownMode {
                name: s.to_string(),
            })
        }
    }
}

/// String-match strategy of a text term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Substring containment.
    Contains,
    /// Prefix match (`starts with:`).
    StartsWith,
    /// Suffix match (`ends with:`).
    EndsWith,
}

impl MatchKind {
    /// Tests `haystack` against `needle`. Both must already be lowercased.
    pub fn test(self, haystack: &str, needle: &str) -> bool {
        match self {
            Self::Contains => haystack.contains(needle),
            Self::StartsWith => haystack.starts_with(needle),
            Self::EndsWith => haystack.ends_with(needle),
        }
    }

    /// The modifier keyword as typed in queries, if this kind has one.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            Self::Contains => None,
            Self::StartsWith => Some("starts with:"),
            Self::EndsWith => Some("ends with:"),
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contains => f.write_str("contains"),
            Self::StartsWith => f.write_str("starts with"),
            Self::EndsWith => f.write_str("ends with"),
        }
    }
}

/// Comparison operator for numeric field terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CompareOp {
    /// `>=`
    #[serde(rename = ">=")]
    AtLeast,
    /// `<=`
    #[serde(rename = "<=")]
    AtMost,
}

impl CompareOp {
    /// Both operators, in suggestion order.
    pub const ALL: [Self; 2] = [Self::AtLeast, Self::AtMost];

    /// The operator as typed in queries.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::AtLeast => ">=",
            Self::AtMost => "<=",
        }
    }

    /// Parses an operator symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            ">=" => Some(Self::AtLeast),
            "<=" => Some(Self::AtMost),
            _ => None,
        }
    }

    /// Applies the operator with no epsilon tolerance.
    pub fn compare(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Self::AtLeast => lhs >= rhs,
            Self::AtMost => lhs <= rhs,
        }
    }
}

/// The parsed form of one query term.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TermPredicate {
    /// Tests every text field; matches if any field satisfies the match kind.
    Unscoped {
        /// Match strategy.
        kind: MatchKind,
        /// Value to match, as typed.
        value: String,
    },

    /// Tests exactly one field as text.
    ScopedText {
        /// Field to test.
        field: Field,
        /// Match strategy.
        kind: MatchKind,
        /// Value to match, as typed.
        value: String,
    },

    /// Compares one numeric field against a number.
    NumericCompare {
        /// Numeric field to compare.
        field: Field,
        /// Comparison operator.
        op: CompareOp,
        /// Right-hand side of the comparison.
        value: f64,
    },

    /// Substring test on a numeric field rendered as text (`calories: 5`).
    ScopedSubstring {
        /// Field to test.
        field: Field,
        /// Value to match, as typed.
        value: String,
    },
}

impl TermPredicate {
    /// Creates an unscoped substring term.
    pub fn contains(value: impl Into<String>) -> Self {
        Self::Unscoped {
            kind: MatchKind::Contains,
            value: value.into(),
        }
    }

    /// Returns the field this term is scoped to, if any.
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::Unscoped { .. } => None,
            Self::ScopedText { field, .. }
            | Self::NumericCompare { field, .. }
            | Self::ScopedSubstring { field, .. } => Some(*field),
        }
    }
}

impl fmt::Display for TermPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unscoped { kind, value } => write!(f, "Unscoped({kind} {value:?})"),
            Self::ScopedText { field, kind, value } => {
                write!(f, "Field({field}) {kind} {value:?}")
            }
            Self::NumericCompare { field, op, value } => {
                write!(f, "Field({field}) {} {value}", op.symbol())
            }
            Self::ScopedSubstring { field, value } => {
                write!(f, "Field({field}) contains {value:?}")
            }
        }
    }
}

/// A query split into raw term strings, before per-term parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawQuery {
    /// Combination mode.
    pub mode: Mode,
    /// Trimmed, non-empty term strings in input order.
    pub terms: Vec<String>,
}

impl RawQuery {
    /// Formats the query back into text that splits into the same mode and terms.
    pub fn to_query_string(&self) -> String {
        let separator = self.mode.separator();
        match self.terms.as_slice() {
            [] => String::new(),
            [single] if self.needs_trailing_separator(single) => format!("{single} {separator}"),
            terms => terms.join(&format!(" {separator} ")),
        }
    }

    /// A lone term needs its separator spelled out when plain text would split differently.
    fn needs_trailing_separator(&self, term: &str) -> bool {
        self.mode == Mode::And || (!term.contains(':') && term.split_whitespace().nth(1).is_some())
    }
}

/// A fully parsed query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Query {
    /// Combination mode.
    pub mode: Mode,
    /// Parsed terms in input order.
    pub terms: Vec<TermPredicate>,
}

impl Query {
    /// Creates a query from parsed terms.
    pub fn new(mode: Mode, terms: Vec<TermPredicate>) -> Self {
        Self { mode, terms }
    }

    /// Returns true if the query has no terms (and therefore selects nothing).
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            Mode::And => writeln!(f, "And")?,
            Mode::Or => writeln!(f, "Or")?,
        }
        for term in &self.terms {
            writeln!(f, "  {term}")?;
        }
        Ok(())
    }
}
