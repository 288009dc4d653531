//! Configuration file parsing.
//!
//! Parses individual `.pomona.toml` files into `RawConfig` values whose fields are all
//! optional, so partial files can be merged later.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::{ConfigError, OutputFormat};

/// Raw configuration as parsed directly from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// When true, stop discovery here and ignore parent and global configs.
    pub root: Option<bool>,
    /// `[search]` section.
    pub search: Option<RawSearchSettings>,
    /// `[data]` section.
    pub data: Option<RawDataSettings>,
    /// `[output]` section.
    pub output: Option<RawOutputSettings>,
    /// `[suggest]` section.
    pub suggest: Option<RawSuggestSettings>,
}

/// Raw search settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSearchSettings {
    /// Combination mode when the text has no separator. Validated during merge.
    pub default_mode: Option<String>,
    /// Whether incomplete text is evaluated.
    pub require_complete: Option<bool>,
}

/// Raw data settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDataSettings {
    /// Record files, relative to the config file. A single string or an array.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub path: Option<Vec<String>>,
}

/// Raw output settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawOutputSettings {
    /// How matches are printed.
    pub format: Option<OutputFormat>,
    /// Maximum printed matches, 0 for no limit.
    pub limit: Option<usize>,
}

/// Raw suggestion settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSuggestSettings {
    /// Maximum printed suggestions, 0 for no limit.
    pub limit: Option<usize>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string. `path` is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Unreadable or malformed files are not root configs; the error surfaces when the file is
/// parsed for real.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
