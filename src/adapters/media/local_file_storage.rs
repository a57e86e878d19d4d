//! Local Filesystem Media Storage Adapter - Implementation of MediaStorage.
//!
//! Stores uploaded videos and images as flat files named by a fresh UUID.
//! The upload directory is served statically, so the returned URL is the
//! configured public prefix joined with the file name.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::config::StorageConfig;
use crate::ports::{MediaStorage, MediaUpload, StorageError};

/// Local filesystem storage for uploaded media.
///
/// # Directory Structure
///
/// ```text
/// {upload_dir}/
/// ├── 6f1c...e2.mp4
/// └── 93ab...41.png
/// ```
///
/// # Atomic Writes
///
/// Content is written to `{name}.tmp`, synced, then renamed, so a crash
/// mid-upload never leaves a truncated file under a public name.
#[derive(Debug, Clone)]
pub struct LocalMediaStorage {
    /// Directory all files are written to
    upload_dir: PathBuf,
    /// Public URL prefix, without trailing slash
    public_base_url: String,
}

impl LocalMediaStorage {
    /// Creates a new local media storage.
    pub fn new(upload_dir: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.upload_dir.clone(), config.public_base_url.clone())
    }

    pub fn upload_dir(&self) -> &PathBuf {
        &self.upload_dir
    }

    fn public_url(&self, file_name: &str) -> String {
        format!("{}/{}", self.public_base_url, file_name)
    }

    /// Maps a public URL back to a file inside the upload directory.
    ///
    /// Only bare file names under our own prefix are accepted.
    fn path_for_url(&self, url: &str) -> Result<PathBuf, StorageError> {
        let name = url
            .strip_prefix(&self.public_base_url)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| StorageError::InvalidPath(url.to_string()))?;
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
            && !name.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidPath(url.to_string()));
        }
        Ok(self.upload_dir.join(name))
    }

    /// Ensures the upload directory exists.
    async fn ensure_dir(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.upload_dir).await.map_err(|e| {
            StorageError::IoError(format!(
                "Failed to create upload directory {}: {}",
                self.upload_dir.display(),
                e
            ))
        })
    }
}

#[async_trait]
impl MediaStorage for LocalMediaStorage {
    async fn store(&self, upload: MediaUpload) -> Result<String, StorageError> {
        if upload.bytes.is_empty() {
            return Err(StorageError::InvalidUpload("file is empty".to_string()));
        }

        self.ensure_dir().await?;

        let file_name = match upload.extension() {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };
        let final_path = self.upload_dir.join(&file_name);
        let temp_path = self.upload_dir.join(format!("{}.tmp", file_name));

        let mut file = fs::File::create(&temp_path).await.map_err(|e| {
            StorageError::IoError(format!(
                "Failed to create temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.write_all(&upload.bytes).await.map_err(|e| {
            StorageError::IoError(format!(
                "Failed to write to temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::IoError(format!(
                "Failed to sync temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        fs::rename(&temp_path, &final_path).await.map_err(|e| {
            StorageError::IoError(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                final_path.display(),
                e
            ))
        })?;

        tracing::debug!(file = %file_name, bytes = upload.bytes.len(), "Media stored");
        Ok(self.public_url(&file_name))
    }

    async fn delete(&self, url: &str) -> Result<(), StorageError> {
        let path = self.path_for_url(url)?;

        fs::remove_file(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(path.display().to_string()),
            std::io::ErrorKind::PermissionDenied => {
                StorageError::PermissionDenied(path.display().to_string())
            }
            _ => StorageError::IoError(format!("Failed to delete {}: {}", path.display(), e)),
        })
    }
}
