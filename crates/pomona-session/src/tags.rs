//! Tag sessions.
//!
//! A session holds committed query terms as an ordered, duplicate-free list of tags plus an
//! optional cursor. The cursor is both the insertion point for the next tag and the slot
//! being edited; when set it always lies in `0..=tags.len()`.

use pomona_index::Filter;
use pomona_query::{Mode, Query, parse_query_with, parse_term};
use tracing::trace;

/// Ordered committed tags with an insertion cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSession {
    /// Committed term strings, trimmed and unique.
    tags: Vec<String>,
    /// Insertion point, if one has been established.
    cursor: Option<usize>,
}

impl TagSession {
    /// Creates an empty session with no cursor.
    pub fn new() -> Self {
        Self::default()
    }

    /// The committed tags in order.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// The insertion cursor, if set.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Number of committed tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns true if no tags are committed.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Trims `text` and returns it if it may be committed.
    fn admissible(&self, text: &str) -> Option<String> {
        let text = text.trim();
        if text.is_empty() || self.tags.iter().any(|tag| tag == text) {
            return None;
        }
        Some(text.to_string())
    }

    /// Appends a tag and moves the cursor past it.
    ///
    /// Empty and duplicate text is ignored; returns whether the session changed.
    pub fn append(&mut self, text: &str) -> bool {
        let Some(tag) = self.admissible(text) else {
            return false;
        };
        trace!(tag, "append tag");
        self.tags.push(tag);
        self.cursor = Some(self.tags.len());
        true
    }

    /// Inserts a tag at `position` (clamped to the tag count) and places the cursor after it.
    ///
    /// Empty and duplicate text is ignored; returns whether the session changed.
    pub fn insert_at(&mut self, text: &str, position: usize) -> bool {
        let Some(tag) = self.admissible(text) else {
            return false;
        };
        let position = position.min(self.tags.len());
        trace!(tag, position, "insert tag");
        self.tags.insert(position, tag);
        self.cursor = Some(position + 1);
        true
    }

    /// Removes the tag at `index`, returning it. Out-of-range indices leave the session as is.
    pub fn remove_at(&mut self, index: usize) -> Option<String> {
        if index >= self.tags.len() {
            return None;
        }
        let removed = self.tags.remove(index);
        self.cursor = self.cursor.map(|cursor| {
            let cursor = if cursor > index { cursor - 1 } else { cursor };
            cursor.min(self.tags.len())
        });
        trace!(tag = removed, index, cursor = ?self.cursor, "remove tag");
        Some(removed)
    }

    /// Takes the tag at `index` out for editing; its slot becomes the insertion point.
    pub fn edit_at(&mut self, index: usize) -> Option<String> {
        if index >= self.tags.len() {
            return None;
        }
        let text = self.tags.remove(index);
        self.cursor = Some(index);
        trace!(tag = text, index, "edit tag");
        Some(text)
    }

    /// Shifts the cursor by `delta` slots, clamped to `0..=len`.
    ///
    /// An unset cursor starts from the end of the list.
    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.tags.len();
        let from = self.cursor.unwrap_or(len);
        let to = from.saturating_add_signed(delta).min(len);
        trace!(from, to, "move cursor");
        self.cursor = Some(to);
    }

    /// Derives the effective filter using OR when no separator tag is present.
    pub fn derive_query(&self) -> Filter {
        self.derive_query_with(Mode::Or)
    }

    /// Derives the effective filter, falling back to `default_mode` without a separator tag.
    ///
    /// No tags means no active filter. The literal tags `&&` and `||` select the mode and are
    /// never terms themselves. A lone tag containing a separator is parsed as a whole query.
    pub fn derive_query_with(&self, default_mode: Mode) -> Filter {
        match self.tags.as_slice() {
            [] => Filter::All,
            [single] if contains_separator(single) => {
                Filter::Query(parse_query_with(single, default_mode))
            }
            tags => {
                let mode = if tags.iter().any(|t| t == Mode::And.separator()) {
                    Mode::And
                } else if tags.iter().any(|t| t == Mode::Or.separator()) {
                    Mode::Or
                } else {
                    default_mode
                };
                let terms = tags
                    .iter()
                    .filter(|t| !is_separator(t))
                    .map(|t| parse_term(t))
                    .collect();
                Filter::Query(Query::new(mode, terms))
            }
        }
    }
}

/// Returns true if `tag` is exactly a separator literal.
fn is_separator(tag: &str) -> bool {
    tag == Mode::And.separator() || tag == Mode::Or.separator()
}

/// Returns true if `tag` contains a separator anywhere.
fn contains_separator(tag: &str) -> bool {
    tag.contains(Mode::And.separator()) || tag.contains(Mode::Or.separator())
}
