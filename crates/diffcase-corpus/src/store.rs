//! JSON persistence for corpora.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::{Corpus, TestCase};

/// Conventional corpus location, relative to the working directory.
const DEFAULT_LOCATION: &str = "test_cases/test_cases.json";

/// Errors from reading or writing a corpus file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access corpus file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse corpus file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize corpus: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A corpus file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusStore {
    path: PathBuf,
}

impl CorpusStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `test_cases/test_cases.json` under the working directory.
    pub fn default_location() -> Self {
        Self::new(DEFAULT_LOCATION)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the file with every case in `corpus`; returns the count.
    ///
    /// The text is written to a sibling temp file first and renamed into
    /// place, so readers see either the old or the new corpus.
    pub fn flush(&self, corpus: &Corpus) -> Result<usize, StoreError> {
        self.write_cases(corpus.cases())
    }

    pub fn write_cases(&self, cases: &[TestCase]) -> Result<usize, StoreError> {
        let mut text = serde_json::to_string_pretty(cases)?;
        text.push('\n');

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|source| self.io_err(source))?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|source| self.io_err(source))?;
        tmp.write_all(text.as_bytes())
            .and_then(|()| tmp.flush())
            .map_err(|source| self.io_err(source))?;
        tmp.persist(&self.path)
            .map_err(|err| self.io_err(err.error))?;

        debug!(path = %self.path.display(), cases = cases.len(), "corpus written");
        Ok(cases.len())
    }

    /// Read every case; a missing file is an empty corpus.
    pub fn load(&self) -> Result<Vec<TestCase>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "corpus file not found");
                return Ok(Vec::new());
            }
            Err(source) => return Err(self.io_err(source)),
        };
        serde_json::from_str(&text).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn io_err(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
