//! Product repository.

use bizdesk_core::catalog::{CreateProductInput, Product, ProductRepository as ProductRepoTrait};
use bizdesk_shared::AppResult;
use bizdesk_shared::types::PageRequest;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbBackend, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, Statement,
};
use uuid::Uuid;

use super::db_error;
use crate::entities::products;

const ENTITY: &str = "Product";

const APPEND_IMAGES_SQL: &str = r"
UPDATE products
SET images = images || $1::jsonb, updated_at = now()
WHERE id = $2
RETURNING *
";

/// Product repository implementation.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    db: DatabaseConnection,
}

impl ProductRepository {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ProductRepoTrait for ProductRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Product>> {
        let model = products::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error(ENTITY))?;

        Ok(model.map(to_domain))
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<Product>> {
        let model = products::Entity::find()
            .filter(products::Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(db_error(ENTITY))?;

        Ok(model.map(to_domain))
    }

    async fn create(&self, input: CreateProductInput) -> AppResult<Product> {
        let now = Utc::now().into();
        let model = products::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(input.code),
            name: Set(input.name),
            description: Set(input.description),
            unit_price: Set(input.unit_price),
            images: Set(serde_json::json!([])),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(db_error(ENTITY))?;

        tracing::info!(product_id = %model.id, code = %model.code, "product created");
        Ok(to_domain(model))
    }

    async fn update(&self, product: &Product) -> AppResult<Product> {
        let model = products::ActiveModel {
            id: Set(product.id),
            code: Set(product.code.clone()),
            name: Set(product.name.clone()),
            description: Set(product.description.clone()),
            unit_price: Set(product.unit_price),
            images: Set(serde_json::json!(product.images)),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(db_error(ENTITY))?;

        Ok(to_domain(model))
    }

    async fn append_images(&self, id: Uuid, file_names: &[String]) -> AppResult<Option<Product>> {
        let model = products::Entity::find()
            .from_raw_sql(Statement::from_sql_and_values(
                DbBackend::Postgres,
                APPEND_IMAGES_SQL,
                [serde_json::json!(file_names).into(), id.into()],
            ))
            .one(&self.db)
            .await
            .map_err(db_error(ENTITY))?;

        if let Some(model) = &model {
            tracing::info!(product_id = %model.id, added = file_names.len(), "product images appended");
        }
        Ok(model.map(to_domain))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = products::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error(ENTITY))?;

        Ok(result.rows_affected > 0)
    }

    async fn list(&self, page: &PageRequest) -> AppResult<(Vec<Product>, u64)> {
        let paginator = products::Entity::find()
            .order_by_asc(products::Column::Code)
            .paginate(&self.db, page.limit());

        let total = paginator.num_items().await.map_err(db_error(ENTITY))?;
        let models = paginator
            .fetch_page(page.index())
            .await
            .map_err(db_error(ENTITY))?;

        Ok((models.into_iter().map(to_domain).collect(), total))
    }
}

fn to_domain(model: products::Model) -> Product {
    // Rows written outside the app may hold malformed JSON; treat as no images.
    let images = serde_json::from_value(model.images).unwrap_or_default();

    Product {
        id: model.id,
        code: model.code,
        name: model.name,
        description: model.description,
        unit_price: model.unit_price,
        images,
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
    }
}
