//! Configuration validation.
//!
//! Reports non-fatal problems with a loaded configuration.

use std::{fmt, path::Path};

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A configured data file does not exist.
    DataFileMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// A configured data path is a directory.
    DataPathIsDirectory {
        /// Path that is a directory.
        path: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataFileMissing { path } => write!(f, "data file does not exist: {path}"),
            Self::DataPathIsDirectory { path } => {
                write!(f, "data path is a directory, not a file: {path}")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    config
        .data
        .paths
        .iter()
        .filter_map(|path| validate_data_path(path))
        .collect()
}

/// Checks that one data path names an existing file.
fn validate_data_path(path: &Path) -> Option<ConfigWarning> {
    let display = path.display().to_string();
    if !path.exists() {
        Some(ConfigWarning::DataFileMissing { path: display })
    } else if path.is_dir() {
        Some(ConfigWarning::DataPathIsDirectory { path: display })
    } else {
        None
    }
}
