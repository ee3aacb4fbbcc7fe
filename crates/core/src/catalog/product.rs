//! Products.

use std::future::Future;
use std::sync::Arc;

use bizdesk_shared::types::PageRequest;
use bizdesk_shared::{AppError, AppResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pricing::{STORED_SCALE, within_amount_limit};
use crate::validation::{require_non_blank, require_non_blank_opt};

const ENTITY: &str = "Product";

/// A product record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: Uuid,
    /// Unique product code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// List price of one unit.
    pub unit_price: Decimal,
    /// Stored image file names.
    pub images: Vec<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProductInput {
    /// Unique product code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// List price.
    pub unit_price: Decimal,
}

/// Partial update of a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProductInput {
    /// New code.
    pub code: Option<String>,
    /// New name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New list price.
    pub unit_price: Option<Decimal>,
}

/// Repository trait for product persistence.
pub trait ProductRepository: Send + Sync {
    /// Find a product by ID.
    fn find_by_id(&self, id: Uuid) -> impl Future<Output = AppResult<Option<Product>>> + Send;

    /// Find a product by code.
    fn find_by_code(&self, code: &str) -> impl Future<Output = AppResult<Option<Product>>> + Send;

    /// Create a product with no images.
    fn create(&self, input: CreateProductInput) -> impl Future<Output = AppResult<Product>> + Send;

    /// Persist changes to a product, including its images.
    fn update(&self, product: &Product) -> impl Future<Output = AppResult<Product>> + Send;

    /// Append image file names to a product in one write.
    ///
    /// Returns `None` if the product does not exist.
    fn append_images(
        &self,
        id: Uuid,
        file_names: &[String],
    ) -> impl Future<Output = AppResult<Option<Product>>> + Send;

    /// Delete a product. Returns false if it did not exist.
    fn delete(&self, id: Uuid) -> impl Future<Output = AppResult<bool>> + Send;

    /// List products by code with the total count.
    fn list(
        &self,
        page: &PageRequest,
    ) -> impl Future<Output = AppResult<(Vec<Product>, u64)>> + Send;
}

fn check_price(unit_price: Decimal) -> AppResult<()> {
    if unit_price < Decimal::ZERO {
        return Err(AppError::Validation(
            "Unit price cannot be negative!".to_string(),
        ));
    }
    if unit_price.normalize().scale() > STORED_SCALE {
        return Err(AppError::Validation(format!(
            "Unit price cannot have more than {STORED_SCALE} decimal places!"
        )));
    }
    if !within_amount_limit(unit_price) {
        return Err(AppError::Validation("Unit price is too large!".to_string()));
    }
    Ok(())
}

/// Product service.
pub struct ProductService<R: ProductRepository> {
    repo: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new product service.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Adds a product with an unused code.
    pub async fn create_product(&self, input: CreateProductInput) -> AppResult<Product> {
        require_non_blank("Code", &input.code)?;
        require_non_blank("Name", &input.name)?;
        check_price(input.unit_price)?;

        if self.repo.find_by_code(&input.code).await?.is_some() {
            return Err(AppError::already_exists(ENTITY));
        }

        self.repo.create(input).await
    }

    /// Updates a product, keeping codes unique.
    pub async fn update_product(&self, id: Uuid, input: UpdateProductInput) -> AppResult<Product> {
        require_non_blank_opt("Code", input.code.as_deref())?;
        require_non_blank_opt("Name", input.name.as_deref())?;
        if let Some(price) = input.unit_price {
            check_price(price)?;
        }

        let mut product = self.get_product(id).await?;

        if let Some(code) = input.code.as_deref()
            && code != product.code
            && self.repo.find_by_code(code).await?.is_some()
        {
            return Err(AppError::already_exists(ENTITY));
        }

        if let Some(code) = input.code {
            product.code = code;
        }
        if let Some(name) = input.name {
            product.name = name;
        }
        if input.description.is_some() {
            product.description = input.description;
        }
        if let Some(price) = input.unit_price {
            product.unit_price = price;
        }

        self.repo.update(&product).await
    }

    /// Appends stored image file names to a product.
    pub async fn add_images(&self, id: Uuid, file_names: Vec<String>) -> AppResult<Product> {
        self.repo
            .append_images(id, &file_names)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY))
    }

    /// Fetches a product by ID.
    pub async fn get_product(&self, id: Uuid) -> AppResult<Product> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY))
    }

    /// Lists products page by page.
    pub async fn list_products(&self, page: &PageRequest) -> AppResult<(Vec<Product>, u64)> {
        self.repo.list(&page.normalized()).await
    }

    /// Deletes a product.
    pub async fn delete_product(&self, id: Uuid) -> AppResult<()> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(ENTITY))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockProductRepository;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn input(code: &str) -> CreateProductInput {
        CreateProductInput {
            code: code.to_string(),
            name: "Office chair".to_string(),
            description: None,
            unit_price: dec!(349.90),
        }
    }

    #[tokio::test]
    async fn test_duplicate_code_conflicts() {
        let service = ProductService::new(Arc::new(MockProductRepository::new()));
        service.create_product(input("P-1")).await.unwrap();

        let err = service.create_product(input("P-1")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_negative_price_rejected() {
        let service = ProductService::new(Arc::new(MockProductRepository::new()));
        let mut product = input("P-1");
        product.unit_price = dec!(-1);

        let err = service.create_product(product).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[rstest]
    #[case(dec!(0.12345), "Unit price cannot have more than 4 decimal places!")]
    #[case(dec!(1000000000000000), "Unit price is too large!")]
    #[tokio::test]
    async fn test_unstorable_price_rejected(#[case] unit_price: Decimal, #[case] message: &str) {
        let service = ProductService::new(Arc::new(MockProductRepository::new()));
        let mut product = input("P-1");
        product.unit_price = unit_price;

        let err = service.create_product(product).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref msg) if msg == message));
    }

    #[tokio::test]
    async fn test_add_images_keeps_concurrent_appends() {
        let service = Arc::new(ProductService::new(Arc::new(MockProductRepository::new())));
        let id = service.create_product(input("P-1")).await.unwrap().id;

        let uploads = (0..8).map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service
                    .add_images(id, vec![format!("{i}.png")])
                    .await
                    .unwrap()
            })
        });
        for upload in uploads.collect::<Vec<_>>() {
            upload.await.unwrap();
        }

        let mut images = service.get_product(id).await.unwrap().images;
        images.sort();
        assert_eq!(images, ["0.png", "1.png", "2.png", "3.png", "4.png", "5.png", "6.png", "7.png"]);
    }

    #[tokio::test]
    async fn test_add_images_appends() {
        let service = ProductService::new(Arc::new(MockProductRepository::new()));
        let product = service.create_product(input("P-1")).await.unwrap();

        service
            .add_images(product.id, vec!["a.png".to_string()])
            .await
            .unwrap();
        let product = service
            .add_images(product.id, vec!["b.jpg".to_string(), "c.webp".to_string()])
            .await
            .unwrap();

        assert_eq!(product.images, ["a.png", "b.jpg", "c.webp"]);
    }

    #[tokio::test]
    async fn test_add_images_to_missing_product() {
        let service = ProductService::new(Arc::new(MockProductRepository::new()));

        let err = service
            .add_images(Uuid::new_v4(), vec!["a.png".to_string()])
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Product not found!");
    }

    #[tokio::test]
    async fn test_update_price() {
        let service = ProductService::new(Arc::new(MockProductRepository::new()));
        let product = service.create_product(input("P-1")).await.unwrap();

        let updated = service
            .update_product(
                product.id,
                UpdateProductInput {
                    unit_price: Some(dec!(299.90)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.unit_price, dec!(299.90));
        assert_eq!(updated.code, "P-1");
    }
}
