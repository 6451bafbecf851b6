//! File storage backing the `/files/` routes.
//!
//! Routes talk to a [`FileStorage`], never to the filesystem directly. The
//! shipped implementation is [`LocalFileStorage`], rooted at the configured base
//! directory.

use async_trait::async_trait;
use bytes::Bytes;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("file {name} not found")]
    NotFound { name: String },

    #[error("invalid file name: {name:?}")]
    InvalidName { name: String },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl StorageError {
    pub fn not_found<S: ToString>(name: S) -> Self {
        Self::NotFound { name: name.to_string() }
    }

    pub fn invalid_name<S: ToString>(name: S) -> Self {
        Self::InvalidName { name: name.to_string() }
    }
}

/// Named byte blobs, shared by every connection.
///
/// Implementations must tolerate concurrent reads and writes of the same name;
/// no atomicity is promised across them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn read(&self, name: &str) -> Result<Bytes, StorageError>;

    /// Creates or truncates `name` and writes `contents` to it.
    async fn write(&self, name: &str, contents: Bytes) -> Result<(), StorageError>;
}

/// Stores files directly under a base directory.
///
/// Names must be relative paths made only of normal components, so nothing
/// outside `base_dir` is reachable.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    base_dir: PathBuf,
}

impl LocalFileStorage {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: base_dir.into() }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn resolve(&self, name: &str) -> Result<PathBuf, StorageError> {
        let path = Path::new(name);
        let mut components = path.components().peekable();

        if components.peek().is_none() || !components.all(|c| matches!(c, Component::Normal(_))) {
            return Err(StorageError::invalid_name(name));
        }

        Ok(self.base_dir.join(path))
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn read(&self, name: &str) -> Result<Bytes, StorageError> {
        let path = self.resolve(name)?;
        debug!(path = %path.display(), "read file");

        match tokio::fs::read(&path).await {
            Ok(contents) => Ok(Bytes::from(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StorageError::not_found(name)),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, name: &str, contents: Bytes) -> Result<(), StorageError> {
        let path = self.resolve(name)?;
        debug!(path = %path.display(), size = contents.len(), "write file");

        tokio::fs::write(&path, &contents).await?;
        Ok(())
    }
}
