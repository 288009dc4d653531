//! Error types for query identifiers.
//!
//! Query text itself never fails to parse: malformed fragments fall back to an unscoped
//! substring term. The errors here cover the places where a caller names a field or a
//! combination mode explicitly (configuration files, command-line flags).

use thiserror::Error;

/// Errors raised when converting identifiers into query vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The name does not identify a searchable field.
    #[error("unknown field: {name}")]
    UnknownField {
        /// The name as given.
        name: String,
    },

    /// The name does not identify a combination mode.
    #[error("unknown mode: {name}")]
    UnknownMode {
        /// The name as given.
        name: String,
    },
}

impl QueryError {
    /// Returns a hint for resolving the error.
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::UnknownField { .. } => {
                "Valid fields are: name, family, order, genus, calories, sugar, carbohydrates, protein, fat"
            }
            Self::UnknownMode { .. } => "Valid modes are: and, or",
        }
    }
}
