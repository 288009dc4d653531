//! Top-level query splitting.
//!
//! Splits raw input text into a combination mode and an ordered list of term strings:
//!
//! - `a && b && c` splits on `&&` and selects AND
//! - `a || b` splits on `||` and selects OR
//! - otherwise the caller's default mode applies, and the text is split on whitespace unless
//!   it contains a field-qualifier colon (qualifier values may contain spaces, as in
//!   `name: starts with: pine`)

use crate::ast::{Mode, RawQuery};

/// Splits `text` using OR as the default mode.
pub fn split_query(text: &str) -> RawQuery {
    split_query_with(text, Mode::Or)
}

/// Splits `text`, falling back to `default_mode` when no separator is present.
pub fn split_query_with(text: &str, default_mode: Mode) -> RawQuery {
    for mode in [Mode::And, Mode::Or] {
        let separator = mode.separator();
        if text.contains(separator) {
            return RawQuery {
                mode,
                terms: non_empty(text.split(separator)),
            };
        }
    }

    let terms = if text.contains(':') {
        non_empty([text])
    } else {
        non_empty(text.split_whitespace())
    };

    RawQuery {
        mode: default_mode,
        terms,
    }
}

/// Trims each piece and drops the empty ones.
fn non_empty<'a>(pieces: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(String::from)
        .collect()
}
