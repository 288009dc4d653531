//! Configuration system for pomona.
//!
//! pomona uses TOML configuration files named `.pomona.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.pomona.toml` files found, then loading `~/.pomona.toml` as the global config with lowest
//! precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::{
    fmt,
    path::{Path, PathBuf},
};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawDataSettings, RawOutputSettings, RawSearchSettings, RawSuggestSettings,
    parse_config_file, parse_config_str,
};
use pomona_query::Mode;
pub use resolve::resolve_data_path;
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Fully merged configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Query evaluation settings.
    pub search: SearchSettings,
    /// Record files.
    pub data: DataSettings,
    /// Result printing settings.
    pub output: OutputSettings,
    /// Suggestion printing settings.
    pub suggest: SuggestSettings,
    /// Directory containing the highest-precedence config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Discovers and merges every `.pomona.toml` relevant to `cwd`.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from config files given highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                Ok(ParsedConfig {
                    path: path.clone(),
                    config: parse_config_file(path)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings in `.pomona.toml` form.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableSettings {
            search: &self.search,
            data: SerializableDataSettings {
                path: self
                    .data
                    .paths
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect(),
            },
            output: &self.output,
            suggest: &self.suggest,
        };
        toml::to_string_pretty(&serializable).expect("settings serialization should not fail")
    }
}

/// Query evaluation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchSettings {
    /// Combination mode when the text has no separator.
    pub default_mode: Mode,
    /// Skip evaluation of text that is still waiting for a value.
    pub require_complete: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_mode: Mode::Or,
            require_complete: true,
        }
    }
}

/// Record file settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataSettings {
    /// Absolute paths of the JSON record files, in load order.
    pub paths: Vec<PathBuf>,
}

/// How search results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One block per record.
    #[default]
    Cards,
    /// A table with one row per record.
    Table,
    /// A JSON array.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cards => f.write_str("cards"),
            Self::Table => f.write_str("table"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Result printing settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutputSettings {
    /// Output format.
    pub format: OutputFormat,
    /// Maximum printed matches, 0 for no limit.
    pub limit: usize,
}

/// Suggestion printing settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuggestSettings {
    /// Maximum printed suggestions, 0 for no limit.
    pub limit: usize,
}

/// Borrowed view of the settings for TOML output.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// `[search]`.
    search: &'a SearchSettings,
    /// `[data]`.
    data: SerializableDataSettings,
    /// `[output]`.
    output: &'a OutputSettings,
    /// `[suggest]`.
    suggest: &'a SuggestSettings,
}

/// Data settings with paths as plain strings.
#[derive(Serialize)]
struct SerializableDataSettings {
    /// Resolved data paths.
    path: Vec<String>,
}
