//! Customer repository.

use bizdesk_core::customer::{
    CreateCustomerInput, Customer, CustomerRepository as CustomerRepoTrait,
};
use bizdesk_shared::AppResult;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::db_error;
use crate::entities::customers;

const ENTITY: &str = "Customer";

/// Customer repository implementation.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    db: DatabaseConnection,
}

impl CustomerRepository {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl CustomerRepoTrait for CustomerRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Customer>> {
        let model = customers::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error(ENTITY))?;

        Ok(model.map(to_domain))
    }

    async fn find_by_document(&self, document: &str) -> AppResult<Option<Customer>> {
        let model = customers::Entity::find()
            .filter(customers::Column::Document.eq(document))
            .one(&self.db)
            .await
            .map_err(db_error(ENTITY))?;

        Ok(model.map(to_domain))
    }

    async fn create(&self, input: CreateCustomerInput) -> AppResult<Customer> {
        let now = Utc::now().into();
        let model = customers::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            document: Set(input.document),
            email: Set(input.email),
            phone: Set(input.phone),
            address: Set(input.address),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(db_error(ENTITY))?;

        tracing::info!(customer_id = %model.id, "customer created");
        Ok(to_domain(model))
    }

    async fn update(&self, customer: &Customer) -> AppResult<Customer> {
        let model = customers::ActiveModel {
            id: Set(customer.id),
            name: Set(customer.name.clone()),
            document: Set(customer.document.clone()),
            email: Set(customer.email.clone()),
            phone: Set(customer.phone.clone()),
            address: Set(customer.address.clone()),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(db_error(ENTITY))?;

        Ok(to_domain(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = customers::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error(ENTITY))?;

        Ok(result.rows_affected > 0)
    }
}

fn to_domain(model: customers::Model) -> Customer {
    Customer {
        id: model.id,
        name: model.name,
        document: model.document,
        email: model.email,
        phone: model.phone,
        address: model.address,
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
    }
}
