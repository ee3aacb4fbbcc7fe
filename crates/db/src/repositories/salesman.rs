//! Salesman repository.

use bizdesk_core::salesman::{
    CreateSalesmanInput, Salesman, SalesmanRepository as SalesmanRepoTrait,
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
use crate::entities::salesmen;

const ENTITY: &str = "Salesman";

/// Salesman repository implementation.
#[derive(Debug, Clone)]
pub struct SalesmanRepository {
    db: DatabaseConnection,
}

impl SalesmanRepository {
    /// Create a new salesman repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl SalesmanRepoTrait for SalesmanRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Salesman>> {
        let model = salesmen::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error(ENTITY))?;

        Ok(model.map(to_domain))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Salesman>> {
        let model = salesmen::Entity::find()
            .filter(salesmen::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_error(ENTITY))?;

        Ok(model.map(to_domain))
    }

    async fn create(&self, input: CreateSalesmanInput) -> AppResult<Salesman> {
        let now = Utc::now().into();
        let model = salesmen::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            email: Set(input.email),
            phone: Set(input.phone),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(db_error(ENTITY))?;

        tracing::info!(salesman_id = %model.id, "salesman created");
        Ok(to_domain(model))
    }

    async fn update(&self, salesman: &Salesman) -> AppResult<Salesman> {
        let model = salesmen::ActiveModel {
            id: Set(salesman.id),
            name: Set(salesman.name.clone()),
            email: Set(salesman.email.clone()),
            phone: Set(salesman.phone.clone()),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(db_error(ENTITY))?;

        Ok(to_domain(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = salesmen::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error(ENTITY))?;

        Ok(result.rows_affected > 0)
    }

    async fn list(&self, page: &PageRequest) -> AppResult<(Vec<Salesman>, u64)> {
        let paginator = salesmen::Entity::find()
            .order_by_asc(salesmen::Column::Name)
            .paginate(&self.db, page.limit());

        let total = paginator.num_items().await.map_err(db_error(ENTITY))?;
        let models = paginator
            .fetch_page(page.index())
            .await
            .map_err(db_error(ENTITY))?;

        Ok((models.into_iter().map(to_domain).collect(), total))
    }
}

fn to_domain(model: salesmen::Model) -> Salesman {
    Salesman {
        id: model.id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
    }
}
