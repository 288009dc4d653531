//! pomona: an interactive query language over fruit records.
//!
//! Free text such as `family: rosaceae && calories: >= 50` is split into terms, each term is
//! recognized as a field-scoped or unscoped predicate, and the predicates are combined with AND
//! or OR over a record collection. The library side of this crate holds the command-line
//! interface; the grammar, evaluation and session logic live in the `pomona-*` crates.

#![warn(missing_docs)]

pub mod cli;
