//! Configuration merging.
//!
//! Merges parsed files into one `Config`, applying precedence and resolving data paths.

use std::path::PathBuf;

use pomona_query::Mode;

use crate::{
    Config, ConfigError, DataSettings, OutputSettings, SearchSettings, SuggestSettings,
    parse::RawConfig, resolve::resolve_data_path,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory containing the config file.
    fn dir(&self) -> PathBuf {
        self.path.parent().map(PathBuf::from).unwrap_or_default()
    }
}

/// Merges configuration files into a single resolved `Config`.
///
/// Configs are given highest precedence first (closest to the working directory) and lowest
/// last (global).
///
/// - Scalar settings: first defined value wins
/// - Data paths: taken whole from the first file that defines them, resolved against that
///   file's directory
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    let Some(first) = configs.first() else {
        return Ok(Config::default());
    };

    Ok(Config {
        search: merge_search_settings(configs)?,
        data: merge_data_settings(configs)?,
        output: merge_output_settings(configs),
        suggest: merge_suggest_settings(configs),
        config_root: Some(first.dir()),
    })
}

/// Merges search settings, validating the mode of every file that sets one.
fn merge_search_settings(configs: &[ParsedConfig]) -> Result<SearchSettings, ConfigError> {
    let mut result = SearchSettings::default();

    // Lowest precedence first so higher precedence overwrites.
    for parsed in configs.iter().rev() {
        let Some(ref search) = parsed.config.search else {
            continue;
        };
        if let Some(ref mode) = search.default_mode {
            result.default_mode = mode.parse::<Mode>().map_err(|source| ConfigError::InvalidMode {
                path: parsed.path.clone(),
                value: mode.clone(),
                source,
            })?;
        }
        if let Some(v) = search.require_complete {
            result.require_complete = v;
        }
    }

    Ok(result)
}

/// Takes data paths from the highest-precedence file that lists any.
fn merge_data_settings(configs: &[ParsedConfig]) -> Result<DataSettings, ConfigError> {
    let defining = configs.iter().find_map(|parsed| {
        let paths = parsed.config.data.as_ref()?.path.as_ref()?;
        Some((parsed, paths))
    });
    let Some((parsed, paths)) = defining else {
        return Ok(DataSettings::default());
    };

    let config_dir = parsed.dir();
    let paths = paths
        .iter()
        .map(|path| resolve_data_path(path, &config_dir))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(DataSettings { paths })
}

/// Merges output settings.
fn merge_output_settings(configs: &[ParsedConfig]) -> OutputSettings {
    let mut result = OutputSettings::default();
    for parsed in configs.iter().rev() {
        if let Some(ref output) = parsed.config.output {
            if let Some(v) = output.format {
                result.format = v;
            }
            if let Some(v) = output.limit {
                result.limit = v;
            }
        }
    }
    result
}

/// Merges suggestion settings.
fn merge_suggest_settings(configs: &[ParsedConfig]) -> SuggestSettings {
    let mut result = SuggestSettings::default();
    for parsed in configs.iter().rev() {
        if let Some(v) = parsed.config.suggest.as_ref().and_then(|s| s.limit) {
            result.limit = v;
        }
    }
    result
}
