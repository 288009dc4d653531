//! Record sources.
//!
//! The query engine never fetches data itself. A [`RecordSource`] hands out a snapshot of the
//! whole collection; callers evaluate against that snapshot and may ask again at any time.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, OnceLock},
};

use tracing::{debug, warn};

use crate::{error::SourceError, record::Record};

/// A provider of the full record collection.
pub trait RecordSource {
    /// Returns a consistent snapshot of every record.
    fn records(&self) -> Result<Arc<[Record]>, SourceError>;
}

/// Parses a JSON array of records.
pub fn parse_records(json: &str) -> Result<Vec<Record>, SourceError> {
    Ok(serde_json::from_str(json)?)
}

/// An in-memory collection.
#[derive(Debug, Clone)]
pub struct StaticSource {
    /// The records handed out on every call.
    records: Arc<[Record]>,
}

impl StaticSource {
    /// Wraps an existing collection.
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// Parses a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        parse_records(json).map(Self::new)
    }
}

impl RecordSource for StaticSource {
    fn records(&self) -> Result<Arc<[Record]>, SourceError> {
        Ok(Arc::clone(&self.records))
    }
}

/// Reads records from one or more JSON files, concatenated in order.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    /// Files to read.
    paths: Vec<PathBuf>,
}

impl JsonFileSource {
    /// Creates a source over the given files.
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    /// Returns the files this source reads.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Reads and parses a single file.
    fn read_file(path: &Path) -> Result<Vec<Record>, SourceError> {
        let contents = fs::read_to_string(path).map_err(|source| SourceError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| SourceError::ParseJson {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl RecordSource for JsonFileSource {
    fn records(&self) -> Result<Arc<[Record]>, SourceError> {
        let mut records = Vec::new();
        for path in &self.paths {
            let loaded = Self::read_file(path)?;
            debug!(path = %path.display(), count = loaded.len(), "loaded records");
            if loaded.is_empty() {
                warn!(path = %path.display(), "data file contains no records");
            }
            records.extend(loaded);
        }
        Ok(records.into())
    }
}

/// Memoises the first successful snapshot of an inner source.
///
/// Failures are returned to the caller and not cached, so the next call retries.
#[derive(Debug)]
pub struct CachedSource<S> {
    /// The source consulted on a cache miss.
    inner: S,
    /// The cached snapshot.
    cache: OnceLock<Arc<[Record]>>,
}

impl<S: RecordSource> CachedSource<S> {
    /// Wraps `inner` with an empty cache.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: OnceLock::new(),
        }
    }

    /// Returns the wrapped source.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Returns the cached snapshot without loading, if one exists.
    ///
    /// `None` is the pending state: the collection has not been resolved yet.
    pub fn snapshot(&self) -> Option<Arc<[Record]>> {
        self.cache.get().cloned()
    }
}

impl<S: RecordSource> RecordSource for CachedSource<S> {
    fn records(&self) -> Result<Arc<[Record]>, SourceError> {
        if let Some(records) = self.cache.get() {
            debug!(count = records.len(), "serving cached records");
            return Ok(Arc::clone(records));
        }
        let records = self.inner.records()?;
        Ok(Arc::clone(self.cache.get_or_init(|| records)))
    }
}
