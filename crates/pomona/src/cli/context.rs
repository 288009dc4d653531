//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use pomona_config::Config;
use pomona_index::{CachedSource, JsonFileSource, Record, RecordSource, SourceError, StaticSource};
use tracing::info;

/// Sample collection used when no data file is configured.
const BUNDLED_RECORDS: &str = include_str!("../../data/fruits.json");

/// Where records come from for this invocation.
#[derive(Debug)]
pub enum DataSource {
    /// Files named on the command line or in configuration.
    Files(JsonFileSource),
    /// The bundled sample collection.
    Bundled(StaticSource),
}

impl DataSource {
    /// Picks `--data` paths first, then configured paths, then the bundled sample.
    fn select(overrides: &[PathBuf], config: &Config) -> Result<Self, SourceError> {
        let paths = if overrides.is_empty() {
            &config.data.paths
        } else {
            overrides
        };
        if paths.is_empty() {
            info!("no data files configured, using bundled sample");
            return StaticSource::from_json(BUNDLED_RECORDS).map(Self::Bundled);
        }
        info!(files = paths.len(), "using configured data files");
        Ok(Self::Files(JsonFileSource::new(paths.to_vec())))
    }

    /// Short description for status output.
    pub fn describe(&self) -> String {
        match self {
            Self::Files(source) => source
                .paths()
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
            Self::Bundled(_) => String::from("bundled sample"),
        }
    }
}

impl RecordSource for DataSource {
    fn records(&self) -> Result<Arc<[Record]>, SourceError> {
        match self {
            Self::Files(source) => source.records(),
            Self::Bundled(source) => source.records(),
        }
    }
}

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (default if no config files were found).
    pub config: Config,
    /// Record provider, loaded on first use.
    source: CachedSource<DataSource>,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load(data_overrides: &[PathBuf]) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Self::with_config(cwd, config, data_overrides)
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used by `init`, which must work even when an existing config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Self::with_config(cwd, Config::default(), &[])
    }

    /// Builds a context around an already loaded configuration.
    fn with_config(
        cwd: PathBuf,
        config: Config,
        data_overrides: &[PathBuf],
    ) -> Result<Self, ExitCode> {
        let overrides: Vec<PathBuf> = data_overrides.iter().map(|p| cwd.join(p)).collect();
        let source = DataSource::select(&overrides, &config).map_err(|e| {
            eprintln!("error: failed to load bundled records: {e}");
            ExitCode::FAILURE
        })?;
        Ok(Self {
            cwd,
            config,
            source: CachedSource::new(source),
        })
    }

    /// Returns the record collection, loading it on first use.
    pub fn records(&self) -> Result<Arc<[Record]>, ExitCode> {
        self.source.records().map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })
    }

    /// Describes where records come from.
    pub fn data_description(&self) -> String {
        self.source.inner().describe()
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
