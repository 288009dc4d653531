//! Query language for pomona search.
//!
//! This crate turns the text a user types into a structured filter over fruit records:
//!
//! - **Free text**: `apple banana` - either token in any text field (OR)
//! - **Separators**: `a && b`, `a || b` - explicit combination mode
//! - **Fields**: `family: rosaceae` - search one field only
//! - **Modifiers**: `name: starts with: pine`, `ends with: berry` - prefix/suffix matching
//! - **Comparisons**: `calories: >= 50`, `fat: <= 0.5` - numeric nutrition fields
//!
//! Parsing is total: text that fits no rule becomes an unscoped substring term.
//!
//! # Example
//!
//! ```
//! use pomona_query::{Mode, parse_query};
//!
//! let query = parse_query("name: starts with: pine && calories: >= 40");
//! assert_eq!(query.mode, Mode::And);
//! assert_eq!(query.terms.len(), 2);
//! ```

#![warn(missing_docs)]

mod ast;
mod complete;
mod error;
mod field;
mod lexer;
mod parser;

pub use ast::{CompareOp, MatchKind, Mode, Query, RawQuery, TermPredicate};
pub use complete::{Completeness, completeness};
pub use error::QueryError;
pub use field::{Field, FieldKind};
pub use lexer::{split_query, split_query_with};
pub use parser::{parse_query, parse_query_with, parse_term};
