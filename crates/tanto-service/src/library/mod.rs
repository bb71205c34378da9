//! Libraries: configured directory trees guarded by the access engine.
//!
//! ## Module Organization
//!
//! - `storage`: `LocalStorage`, the `tokio::fs` backend rooted at a mount point
//!
//! Every `Library` operation checks the caller's permission on the cleaned
//! path before touching storage.

pub mod storage;

use tanto_core::config::{LibraryConfig, Settings};
use tanto_core::util::path::{clean_path, join, route_prefix};

pub use storage::{EntryInfo, LocalStorage};

use crate::access::{AccessEvaluator, FileOperation, OpenMode, PermissionSet};
use crate::error::{ServiceError, ServiceResult};

/// A mounted directory tree with the scopes of its users.
#[derive(Debug, Clone)]
pub struct Library {
    name: String,
    prefix: String,
    storage: LocalStorage,
    access: AccessEvaluator,
}

impl Library {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        prefix: &str,
        storage: LocalStorage,
        access: AccessEvaluator,
    ) -> Self {
        Self {
            name: name.into(),
            prefix: route_prefix(prefix),
            storage,
            access,
        }
    }

    /// ## Summary
    /// Builds a library and its access evaluator from configuration.
    ///
    /// Returns the library and the first scope construction error, if any.
    #[must_use]
    pub fn from_config(
        settings: &Settings,
        config: &LibraryConfig,
    ) -> (Self, Option<ServiceError>) {
        let (access, err) = AccessEvaluator::for_library(settings, &config.name);
        let library = Self::new(
            config.name.clone(),
            &config.prefix,
            LocalStorage::new(&config.mount_point),
            access,
        );
        (library, err)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// URL prefix without surrounding slashes; empty for the root.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub const fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    #[must_use]
    pub const fn access(&self) -> &AccessEvaluator {
        &self.access
    }

    /// ## Summary
    /// Maps a request path inside this library's URL prefix to a library path.
    ///
    /// Returns `None` when `uri_path` lies outside the prefix.
    #[must_use]
    pub fn strip_prefix(&self, uri_path: &str) -> Option<String> {
        let cleaned = clean_path(uri_path);
        if self.prefix.is_empty() {
            return Some(cleaned);
        }
        let rest = cleaned
            .strip_prefix('/')
            .and_then(|p| p.strip_prefix(self.prefix.as_str()))?;
        if rest.is_empty() || rest.starts_with('/') {
            Some(clean_path(rest))
        } else {
            None
        }
    }

    /// ## Errors
    /// Returns `PermissionDenied` without Read, `NotFound` if nothing exists.
    #[tracing::instrument(skip(self), fields(library = %self.name))]
    pub async fn stat(&self, username: &str, path: &str) -> ServiceResult<EntryInfo> {
        let path = clean_path(path);
        self.access
            .check_operation(username, &path, FileOperation::Stat)?;
        self.storage.stat(&path).await
    }

    /// ## Errors
    /// Returns `PermissionDenied` without Read, `NotFound` if the file is missing.
    #[tracing::instrument(skip(self), fields(library = %self.name))]
    pub async fn read_file(&self, username: &str, path: &str) -> ServiceResult<Vec<u8>> {
        let path = clean_path(path);
        self.access
            .check_operation(username, &path, FileOperation::Open(OpenMode::READ))?;
        self.storage.read(&path).await
    }

    /// ## Summary
    /// Creates or replaces a file; needs Read, Write and `CreateFile`.
    ///
    /// Returns `true` if the file was created.
    ///
    /// ## Errors
    /// Returns `PermissionDenied` or the storage error.
    #[tracing::instrument(skip(self, data), fields(library = %self.name, len = data.len()))]
    pub async fn write_file(&self, username: &str, path: &str, data: &[u8]) -> ServiceResult<bool> {
        let path = clean_path(path);
        self.access
            .check_operation(username, &path, FileOperation::Open(OpenMode::REPLACE))?;
        let created = self.storage.write(&path, data).await?;
        tracing::debug!(created, "File written");
        Ok(created)
    }

    /// ## Errors
    /// Returns `PermissionDenied` without `CreateFolder`, `AlreadyExists` or
    /// `Conflict` from storage.
    #[tracing::instrument(skip(self), fields(library = %self.name))]
    pub async fn create_dir(&self, username: &str, path: &str) -> ServiceResult<()> {
        let path = clean_path(path);
        self.access
            .check_operation(username, &path, FileOperation::CreateFolder)?;
        self.storage.create_dir(&path).await
    }

    /// ## Errors
    /// Returns `PermissionDenied` without Delete, `Conflict` for the library
    /// root, `NotFound` if nothing exists.
    #[tracing::instrument(skip(self), fields(library = %self.name))]
    pub async fn remove(&self, username: &str, path: &str) -> ServiceResult<()> {
        let path = clean_path(path);
        self.access
            .check_operation(username, &path, FileOperation::Delete)?;
        if path == "/" {
            return Err(ServiceError::Conflict("cannot remove the library root".to_string()));
        }
        self.storage.remove(&path).await
    }

    /// ## Summary
    /// Moves `from` to `to` inside this library.
    ///
    /// Rename must be granted on both paths. Returns `true` if `to` was created.
    ///
    /// ## Errors
    /// Returns `PermissionDenied`, `Conflict` when either side is the library
    /// root, or the storage error.
    #[tracing::instrument(skip(self), fields(library = %self.name))]
    pub async fn rename(&self, username: &str, from: &str, to: &str) -> ServiceResult<bool> {
        let from = clean_path(from);
        let to = clean_path(to);
        self.access
            .check_operation(username, &from, FileOperation::Rename)?;
        self.access
            .check_operation(username, &to, FileOperation::Rename)?;
        if from == "/" || to == "/" {
            return Err(ServiceError::Conflict("cannot move the library root".to_string()));
        }
        self.storage.rename(&from, &to).await
    }

    /// ## Summary
    /// Lists a directory, keeping only entries the user may read.
    ///
    /// ## Errors
    /// Returns `PermissionDenied` without Read on the directory itself.
    #[tracing::instrument(skip(self), fields(library = %self.name))]
    pub async fn read_dir(&self, username: &str, path: &str) -> ServiceResult<Vec<EntryInfo>> {
        let path = clean_path(path);
        self.access
            .check_operation(username, &path, FileOperation::ListDirectory)?;

        let entries = self.storage.read_dir(&path).await?;
        let total = entries.len();
        let visible: Vec<EntryInfo> = entries
            .into_iter()
            .filter(|entry| {
                self.access
                    .evaluate(username, &join(&path, &entry.name), PermissionSet::READ)
                    .granted
            })
            .collect();

        tracing::trace!(total, visible = visible.len(), "Directory listed");
        Ok(visible)
    }
}
