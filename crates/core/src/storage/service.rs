//! Storage service implementation using Apache OpenDAL.

use bytes::Bytes;
use opendal::{Operator, services};
use uuid::Uuid;

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

/// An image written to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Generated file name, as recorded on the product.
    pub file_name: String,
    /// Full storage key.
    pub key: String,
    /// Size in bytes.
    pub size: u64,
}

/// Storage service for product images.
pub struct StorageService {
    operator: Operator,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let builder = services::S3::default()
                    .endpoint(endpoint)
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
        }
    }

    /// Validate an upload against the configured size and type limits.
    ///
    /// # Errors
    ///
    /// Returns an error if file size or MIME type is invalid.
    pub fn validate_upload(&self, content_type: &str, size: u64) -> Result<(), StorageError> {
        if size > self.config.max_file_size {
            return Err(StorageError::file_too_large(
                size,
                self.config.max_file_size,
            ));
        }

        if !self.config.is_mime_type_allowed(content_type) {
            return Err(StorageError::invalid_mime_type(content_type));
        }

        Ok(())
    }

    /// Generates a collision-free file name: `{uuid}-{sanitized_filename}`.
    #[must_use]
    pub fn generate_file_name(original: &str) -> String {
        format!("{}-{}", Uuid::new_v4(), sanitize_filename(original))
    }

    /// Storage key of a product image.
    #[must_use]
    pub fn product_image_key(product_id: Uuid, file_name: &str) -> String {
        format!("products/{product_id}/{file_name}")
    }

    /// Validates and writes one product image.
    ///
    /// # Errors
    ///
    /// Returns an error if validation or the write fails.
    pub async fn store_product_image(
        &self,
        product_id: Uuid,
        original_name: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<StoredImage, StorageError> {
        let size = u64::try_from(data.len()).unwrap_or(u64::MAX);
        self.validate_upload(content_type, size)?;

        let file_name = Self::generate_file_name(original_name);
        let key = Self::product_image_key(product_id, &file_name);

        self.operator.write(&key, data).await?;

        Ok(StoredImage {
            file_name,
            key,
            size,
        })
    }

    /// Delete a file from storage.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.operator.delete(key).await.map_err(StorageError::from)
    }

    /// Check if a file exists in storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend lookup fails.
    pub async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        self.operator.exists(key).await.map_err(StorageError::from)
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }
}

/// Only ASCII alphanumerics, dots, hyphens and underscores survive.
fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
