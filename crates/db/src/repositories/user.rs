//! User repository for database operations.

use bizdesk_core::auth::{NewUser, User, UserRepository as UserRepoTrait};
use bizdesk_shared::AppResult;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::db_error;
use crate::entities::users;

const ENTITY: &str = "User";

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl UserRepoTrait for UserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_error(ENTITY))?;

        Ok(model.map(to_domain))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error(ENTITY))?;

        Ok(model.map(to_domain))
    }

    async fn create(&self, input: NewUser) -> AppResult<User> {
        let now = Utc::now().into();
        let model = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            email: Set(input.email),
            password_hash: Set(input.password_hash),
            is_admin: Set(input.is_admin),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(db_error(ENTITY))?;

        tracing::info!(user_id = %model.id, is_admin = model.is_admin, "user created");
        Ok(to_domain(model))
    }
}

fn to_domain(model: users::Model) -> User {
    User {
        id: model.id,
        name: model.name,
        email: model.email,
        password_hash: model.password_hash,
        is_admin: model.is_admin,
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
    }
}
