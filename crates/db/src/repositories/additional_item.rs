//! Additional item repository.

use bizdesk_core::catalog::{
    AdditionalItem, AdditionalItemRepository as AdditionalItemRepoTrait,
    CreateAdditionalItemInput,
};
use bizdesk_shared::AppResult;
use bizdesk_shared::types::PageRequest;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::db_error;
use crate::entities::additional_items;

const ENTITY: &str = "Additional item";

/// Additional item repository implementation.
#[derive(Debug, Clone)]
pub struct AdditionalItemRepository {
    db: DatabaseConnection,
}

impl AdditionalItemRepository {
    /// Create a new additional item repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl AdditionalItemRepoTrait for AdditionalItemRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<AdditionalItem>> {
        let model = additional_items::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error(ENTITY))?;

        Ok(model.map(to_domain))
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<AdditionalItem>> {
        let model = additional_items::Entity::find()
            .filter(additional_items::Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(db_error(ENTITY))?;

        Ok(model.map(to_domain))
    }

    async fn create(&self, input: CreateAdditionalItemInput) -> AppResult<AdditionalItem> {
        let now = Utc::now().into();
        let model = additional_items::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(input.code),
            name: Set(input.name),
            size: Set(input.size),
            description: Set(input.description),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(db_error(ENTITY))?;

        Ok(to_domain(model))
    }

    async fn update(&self, item: &AdditionalItem) -> AppResult<AdditionalItem> {
        let model = additional_items::ActiveModel {
            id: Set(item.id),
            code: Set(item.code.clone()),
            name: Set(item.name.clone()),
            size: Set(item.size.clone()),
            description: Set(item.description.clone()),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(db_error(ENTITY))?;

        Ok(to_domain(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = additional_items::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error(ENTITY))?;

        Ok(result.rows_affected > 0)
    }

    async fn list(&self, page: &PageRequest) -> AppResult<(Vec<AdditionalItem>, u64)> {
        let paginator = additional_items::Entity::find()
            .order_by_asc(additional_items::Column::Code)
            .paginate(&self.db, page.limit());

        let total = paginator.num_items().await.map_err(db_error(ENTITY))?;
        let models = paginator
            .fetch_page(page.index())
            .await
            .map_err(db_error(ENTITY))?;

        Ok((models.into_iter().map(to_domain).collect(), total))
    }
}

fn to_domain(model: additional_items::Model) -> AdditionalItem {
    AdditionalItem {
        id: model.id,
        code: model.code,
        name: model.name,
        size: model.size,
        description: model.description,
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
    }
}
