//! Error types for pomona configuration.

use std::{io, path::PathBuf};

use pomona_query::QueryError;
use thiserror::Error;
use toml::de;

/// Errors that can occur when loading or processing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("failed to parse config file {path}: {source}")]
    ParseToml {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: de::Error,
    },

    /// `search.default_mode` is neither `and` nor `or`.
    #[error("invalid default_mode '{value}' in {path}: {source}\nhint: {}", .source.suggestion())]
    InvalidMode {
        /// Config file containing the value.
        path: PathBuf,
        /// The rejected value.
        value: String,
        /// Why the value was rejected.
        source: QueryError,
    },

    /// Failed to determine home directory.
    #[error("could not determine home directory")]
    NoHomeDirectory,

    /// Failed to canonicalize a path.
    #[error("failed to resolve path {path}: {source}")]
    PathResolution {
        /// The path that could not be resolved.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}
