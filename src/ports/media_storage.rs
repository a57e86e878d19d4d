//! MediaStorage port for uploaded files (videos, thumbnails, avatars)

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors that can occur during media storage operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// File not found
    #[error("File not found: {0}")]
    NotFound(String),
    /// Permission denied
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    /// IO error
    #[error("IO error: {0}")]
    IoError(String),
    /// Invalid path or URL
    #[error("Invalid path: {0}")]
    InvalidPath(String),
    /// Upload rejected before writing
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidUpload(reason) => DomainError::validation("file", reason),
            other => DomainError::new(ErrorCode::StorageError, other.to_string()),
        }
    }
}

/// An uploaded file as received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUpload {
    /// Original file name, used only for its extension
    pub file_name: Option<String>,
    /// Declared content type
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl MediaUpload {
    pub fn new(file_name: Option<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Lowercased extension of the original file name, if it has a sane one.
    pub fn extension(&self) -> Option<String> {
        let name = self.file_name.as_deref()?;
        let (_, ext) = name.rsplit_once('.')?;
        let valid = !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric());
        valid.then(|| ext.to_ascii_lowercase())
    }
}

/// Storage for uploaded media
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Stores the upload and returns its public URL
    async fn store(&self, upload: MediaUpload) -> Result<String, StorageError>;

    /// Removes a previously stored file by its public URL
    async fn delete(&self, url: &str) -> Result<(), StorageError>;
}
