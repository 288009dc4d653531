//! Record model and query evaluation for pomona.
//!
//! This crate applies parsed queries from `pomona-query` to a collection of fruit records:
//! - Record model with a total field accessor (missing fields are explicit, never a panic)
//! - Predicate matching and order-preserving evaluation under AND/OR
//! - Record sources (JSON files, in-memory, cached) behind the [`RecordSource`] trait
//! - Search outcomes that separate "pending", "no filter" and "matches"
//!
//! # Example
//!
//! ```
//! use pomona_index::{Filter, SearchOutcome, StaticSource, RecordSource, search};
//! use pomona_query::parse_query;
//!
//! let source = StaticSource::from_json(
//!     r#"[{"name": "Apple", "nutritions": {"calories": 52}},
//!         {"name": "Lemon", "nutritions": {"calories": 29}}]"#,
//! )
//! .unwrap();
//! let records = source.records().unwrap();
//!
//! let filter = Filter::Query(parse_query("calories: >= 50"));
//! let outcome = search(Some(&records), &filter);
//! assert_eq!(outcome.records()[0].display_name(), "Apple");
//! ```

#![warn(missing_docs)]

mod error;
mod matcher;
mod outcome;
mod record;
mod source;

pub use error::SourceError;
pub use matcher::{evaluate, matches, matches_query};
pub use outcome::{Filter, QueryGuard, SearchOutcome, Ticket, search};
pub use record::{FieldValue, Nutrition, NutritionValue, Record};
pub use source::{CachedSource, JsonFileSource, RecordSource, StaticSource, parse_records};
