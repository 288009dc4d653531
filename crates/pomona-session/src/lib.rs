//! Grammar-aware interactive state for pomona.
//!
//! Two pieces sit between raw keystrokes and the query engine:
//!
//! - [`TagSession`]: committed terms held as discrete chips with an insertion cursor, from
//!   which the effective [`Filter`](pomona_index::Filter) is derived.
//! - [`suggestions`] and [`Completer`]: position-sensitive autocomplete for the text that is
//!   still being typed.

#![warn(missing_docs)]

mod suggest;
mod tags;

pub use suggest::{Completer, SuggestionItem, SuggestionKind, apply_suggestion, suggestions};
pub use tags::TagSession;
