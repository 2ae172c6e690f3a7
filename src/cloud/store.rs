use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;

use crate::error::TransferError;

/// Remote object store operations used by the uploader.
///
/// Implementations are bound to one bucket and shared read-only across all
/// upload tasks of a push.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload a single file under `key`.
    async fn upload_file(&self, local: &Path, key: &str) -> Result<(), TransferError>;

    /// Upload every file below `local`, keyed by `prefix` plus the relative path.
    async fn upload_directory(&self, local: &Path, prefix: &str) -> Result<(), TransferError>;
}

/// One unit of transfer work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadTask {
    File {
        local: PathBuf,
        key: String,
    },
    Directory {
        local: PathBuf,
        key: String,
        prefix: String,
    },
}

impl UploadTask {
    /// Build the task for `path`, stat-ing it to tell files from directories.
    ///
    /// Paths that cannot be stat-ed become file tasks; the read error is then
    /// reported by the task itself.
    pub fn for_path(path: &Path) -> Self {
        let key = object_key(path);
        match fs::metadata(path) {
            Ok(metadata) if metadata.is_dir() => UploadTask::Directory {
                local: path.to_path_buf(),
                key,
                prefix: path.to_string_lossy().into_owned(),
            },
            Ok(_) => UploadTask::File {
                local: path.to_path_buf(),
                key,
            },
            Err(e) => {
                debug!("Could not stat {}: {}", path.display(), e);
                UploadTask::File {
                    local: path.to_path_buf(),
                    key,
                }
            }
        }
    }

    pub fn local(&self) -> &Path {
        match self {
            UploadTask::File { local, .. } | UploadTask::Directory { local, .. } => local,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            UploadTask::File { key, .. } | UploadTask::Directory { key, .. } => key,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, UploadTask::Directory { .. })
    }

    /// Submit the task to `store`.
    pub async fn submit(&self, store: &dyn ObjectStore) -> Result<(), TransferError> {
        match self {
            UploadTask::File { local, key } => store.upload_file(local, key).await,
            UploadTask::Directory { local, prefix, .. } => {
                store.upload_directory(local, prefix).await
            }
        }
    }
}

/// Object key for a local path: its last path segment.
pub fn object_key(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
