//! Media storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Local media storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory uploaded files are written to
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// URL prefix under which the upload directory is served
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// Largest accepted request body in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.upload_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("VIDTUBE__STORAGE__UPLOAD_DIR"));
        }
        if self.public_base_url.is_empty() {
            return Err(ValidationError::MissingRequired("VIDTUBE__STORAGE__PUBLIC_BASE_URL"));
        }
        if self.max_upload_bytes == 0 {
            return Err(ValidationError::InvalidUploadLimit);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            public_base_url: default_public_base_url(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("./public/media")
}

fn default_public_base_url() -> String {
    "/media".to_string()
}

fn default_max_upload_bytes() -> usize {
    // 200 MB
    200 * 1024 * 1024
}
