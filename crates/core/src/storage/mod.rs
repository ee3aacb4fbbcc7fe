//! Object storage for product images, backed by Apache OpenDAL.
//!
//! Images land on the local filesystem in development and in an
//! S3-compatible bucket (Cloudflare R2, AWS S3, MinIO) when configured.
//!
//! ```text
//! products/{product_id}/{uuid}-{sanitized_original_name}
//! ```

mod config;
mod error;
mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::{StorageService, StoredImage};
