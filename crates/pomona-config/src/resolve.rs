//! Path resolution for data files.
//!
//! Resolves relative and tilde-prefixed paths from a config file to absolute paths.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves a data file path to an absolute path.
///
/// - Tilde paths (`~/fruits.json`) expand to the home directory
/// - Relative paths resolve against `config_dir`
/// - Absolute paths are kept
///
/// Existing paths are canonicalized. A missing file is not an error here; validation reports
/// it as a warning.
pub fn resolve_data_path(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_tilde(path)?;

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        config_dir.join(&expanded)
    };

    if !absolute.exists() {
        return Ok(absolute);
    }

    absolute
        .canonicalize()
        .map_err(|source| ConfigError::PathResolution {
            path: absolute.clone(),
            source,
        })
}

/// Expands a leading `~` or `~/` to the home directory.
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return home_dir();
    }

    if let Some(rest) = path.strip_prefix("~/") {
        let home = home_dir()?;
        return Ok(home.join(rest));
    }

    Ok(PathBuf::from(path))
}

/// Returns the home directory.
fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}
