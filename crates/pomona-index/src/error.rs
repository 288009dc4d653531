//! Error types for the pomona-index crate.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised by record sources.
///
/// Evaluation itself never fails; only obtaining the collection can.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Failed to read a data file.
    #[error("failed to read data file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A data file is not a JSON array of records.
    #[error("failed to parse data file {path}: {source}")]
    ParseJson {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// Embedded or in-memory JSON is not an array of records.
    #[error("invalid record data: {0}")]
    InvalidData(#[from] serde_json::Error),
}
