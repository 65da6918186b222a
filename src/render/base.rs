//! Static base fragment, read fresh on every tick.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to read base fragment {path}: {source}")]
pub struct BaseFragmentError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

#[derive(Debug, Clone)]
pub struct BaseFragmentLoader {
    path: PathBuf,
}

impl BaseFragmentLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// No caching: edits to the file take effect on the next tick.
    pub async fn load(&self) -> Result<String, BaseFragmentError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| BaseFragmentError {
                path: self.path.clone(),
                source,
            })
    }
}
