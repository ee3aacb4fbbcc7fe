//! Storage configuration types.

use std::path::PathBuf;

use bizdesk_shared::config::UploadConfig;
use serde::{Deserialize, Serialize};

/// Storage provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageProvider {
    /// S3-compatible storage: Cloudflare R2, AWS S3, MinIO
    S3 {
        /// S3 endpoint URL.
        endpoint: String,
        /// S3 bucket name.
        bucket: String,
        /// Access key ID.
        access_key_id: String,
        /// Secret access key.
        secret_access_key: String,
        /// Region.
        region: String,
    },
    /// Local filesystem
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
}

impl StorageProvider {
    /// Create S3-compatible provider.
    #[must_use]
    pub fn s3(
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self::S3 {
            endpoint: endpoint.into(),
            bucket: bucket.into(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: region.into(),
        }
    }

    /// Create local filesystem provider.
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Short provider name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::LocalFs { .. } => "local",
        }
    }
}

/// Storage service configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Maximum file size in bytes.
    pub max_file_size: u64,
    /// Allowed MIME types for upload.
    pub allowed_mime_types: Vec<String>,
}

impl StorageConfig {
    /// Default max file size: 5MB.
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

    /// Create a new storage config with default limits.
    #[must_use]
    pub fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            max_file_size: Self::DEFAULT_MAX_FILE_SIZE,
            allowed_mime_types: Self::default_mime_types(),
        }
    }

    /// Builds the storage config from the `upload` settings section.
    ///
    /// An `s3` subsection selects the bucket, otherwise files go to `dir`.
    #[must_use]
    pub fn from_upload(upload: &UploadConfig) -> Self {
        let provider = match &upload.s3 {
            Some(s3) => StorageProvider::s3(
                &s3.endpoint,
                &s3.bucket,
                &s3.access_key_id,
                &s3.secret_access_key,
                &s3.region,
            ),
            None => StorageProvider::local_fs(&upload.dir),
        };

        Self::new(provider).with_max_file_size(upload.max_file_size)
    }

    /// Set maximum file size.
    #[must_use]
    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Image types accepted for product pictures.
    #[must_use]
    pub fn default_mime_types() -> Vec<String> {
        vec![
            "image/jpeg".to_string(),
            "image/png".to_string(),
            "image/webp".to_string(),
        ]
    }

    /// Check if a MIME type is allowed.
    #[must_use]
    pub fn is_mime_type_allowed(&self, mime_type: &str) -> bool {
        self.allowed_mime_types.iter().any(|t| t == mime_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizdesk_shared::config::S3Config;

    fn upload(s3: Option<S3Config>) -> UploadConfig {
        UploadConfig {
            dir: "./tmp/uploads".into(),
            max_file_size: 1024,
            s3,
        }
    }

    #[test]
    fn test_from_upload_defaults_to_local() {
        let config = StorageConfig::from_upload(&upload(None));

        assert_eq!(config.provider.name(), "local");
        assert_eq!(config.max_file_size, 1024);
    }

    #[test]
    fn test_from_upload_with_bucket() {
        let config = StorageConfig::from_upload(&upload(Some(S3Config {
            endpoint: "https://account.r2.cloudflarestorage.com".into(),
            bucket: "product-images".into(),
            access_key_id: "key".into(),
            secret_access_key: "secret".into(),
            region: "auto".into(),
        })));

        assert_eq!(config.provider.name(), "s3");
    }

    #[test]
    fn test_mime_type_validation() {
        let config = StorageConfig::new(StorageProvider::local_fs("./storage"));
        assert!(config.is_mime_type_allowed("image/png"));
        assert!(config.is_mime_type_allowed("image/jpeg"));
        assert!(config.is_mime_type_allowed("image/webp"));
        assert!(!config.is_mime_type_allowed("image/gif"));
        assert!(!config.is_mime_type_allowed("application/pdf"));
    }
}
