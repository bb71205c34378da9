//! Local filesystem backend for a library.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tanto_core::util::path::{clean_path, file_name};
use tokio::fs;

use crate::error::{ServiceError, ServiceResult};

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub name: String,
    pub is_dir: bool,
    pub len: u64,
}

impl EntryInfo {
    fn from_metadata(name: String, metadata: &std::fs::Metadata) -> Self {
        Self {
            name,
            is_dir: metadata.is_dir(),
            len: if metadata.is_dir() { 0 } else { metadata.len() },
        }
    }
}

/// ## Summary
/// A directory tree rooted at a library's mount point.
///
/// Paths passed in are library paths (`/docs/a.txt`); they are cleaned before
/// being joined under the root, so `..` cannot leave it.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a library path to a filesystem path beneath the root.
    #[must_use]
    pub fn resolve(&self, path: &str) -> PathBuf {
        let cleaned = clean_path(path);
        self.root.join(cleaned.trim_start_matches('/'))
    }

    /// ## Errors
    /// Returns `NotFound` if nothing exists at `path`.
    pub async fn stat(&self, path: &str) -> ServiceResult<EntryInfo> {
        let metadata = fs::metadata(self.resolve(path))
            .await
            .map_err(|e| map_io(e, path))?;
        let name = file_name(&clean_path(path)).to_string();
        Ok(EntryInfo::from_metadata(name, &metadata))
    }

    /// ## Errors
    /// Returns `NotFound` if the file does not exist.
    pub async fn read(&self, path: &str) -> ServiceResult<Vec<u8>> {
        fs::read(self.resolve(path)).await.map_err(|e| map_io(e, path))
    }

    /// ## Summary
    /// Creates or truncates the file at `path` and writes `data` to it.
    ///
    /// Returns `true` if the file did not exist before.
    ///
    /// ## Errors
    /// Returns `Conflict` if the parent directory is missing or `path` is a
    /// directory.
    pub async fn write(&self, path: &str, data: &[u8]) -> ServiceResult<bool> {
        let target = self.resolve(path);
        let created = match fs::metadata(&target).await {
            Ok(metadata) if metadata.is_dir() => {
                return Err(ServiceError::Conflict(format!("{path} is a directory")));
            }
            Ok(_) => false,
            Err(e) if e.kind() == ErrorKind::NotFound => true,
            Err(e) => return Err(e.into()),
        };

        fs::write(&target, data)
            .await
            .map_err(|e| map_missing_parent(e, path))?;
        Ok(created)
    }

    /// ## Errors
    /// Returns `AlreadyExists` if `path` exists and `Conflict` if its parent
    /// does not.
    pub async fn create_dir(&self, path: &str) -> ServiceResult<()> {
        fs::create_dir(self.resolve(path))
            .await
            .map_err(|e| map_missing_parent(e, path))
    }

    /// ## Summary
    /// Removes a file, or a directory with everything below it.
    ///
    /// ## Errors
    /// Returns `NotFound` if nothing exists at `path`.
    pub async fn remove(&self, path: &str) -> ServiceResult<()> {
        let target = self.resolve(path);
        let metadata = fs::symlink_metadata(&target)
            .await
            .map_err(|e| map_io(e, path))?;

        let removed = if metadata.is_dir() {
            fs::remove_dir_all(&target).await
        } else {
            fs::remove_file(&target).await
        };
        removed.map_err(|e| map_io(e, path))
    }

    /// ## Summary
    /// Moves `from` to `to`, replacing an existing file at `to`.
    ///
    /// Returns `true` if nothing existed at `to` before.
    ///
    /// ## Errors
    /// Returns `NotFound` if `from` does not exist and `Conflict` if the parent
    /// of `to` is missing.
    pub async fn rename(&self, from: &str, to: &str) -> ServiceResult<bool> {
        let source = self.resolve(from);
        let target = self.resolve(to);

        fs::symlink_metadata(&source)
            .await
            .map_err(|e| map_io(e, from))?;
        let created = fs::symlink_metadata(&target).await.is_err();

        fs::rename(&source, &target)
            .await
            .map_err(|e| map_missing_parent(e, to))?;
        Ok(created)
    }

    /// ## Summary
    /// Lists the entries of the directory at `path`, sorted by name.
    ///
    /// Entries whose names are not valid UTF-8 are skipped.
    ///
    /// ## Errors
    /// Returns `NotFound` if the directory does not exist.
    pub async fn read_dir(&self, path: &str) -> ServiceResult<Vec<EntryInfo>> {
        let mut reader = fs::read_dir(self.resolve(path))
            .await
            .map_err(|e| map_io(e, path))?;

        let mut entries = Vec::new();
        while let Some(entry) = reader.next_entry().await? {
            let Ok(name) = entry.file_name().into_string() else {
                tracing::debug!(dir = %path, "Skipping entry with non UTF-8 name");
                continue;
            };
            let metadata = entry.metadata().await?;
            entries.push(EntryInfo::from_metadata(name, &metadata));
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

fn map_io(err: std::io::Error, path: &str) -> ServiceError {
    match err.kind() {
        ErrorKind::NotFound => ServiceError::NotFound(path.to_string()),
        ErrorKind::AlreadyExists => ServiceError::AlreadyExists(path.to_string()),
        _ => ServiceError::Io(err),
    }
}

/// Like `map_io`, but a missing path means the parent directory is missing.
fn map_missing_parent(err: std::io::Error, path: &str) -> ServiceError {
    match err.kind() {
        ErrorKind::NotFound => ServiceError::Conflict(format!("parent of {path} does not exist")),
        _ => map_io(err, path),
    }
}
