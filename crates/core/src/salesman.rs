//! Salesmen responsible for budgets.

use std::future::Future;
use std::sync::Arc;

use bizdesk_shared::types::PageRequest;
use bizdesk_shared::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::{require_non_blank, require_non_blank_opt};

const ENTITY: &str = "Salesman";

/// A salesman record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salesman {
    /// Salesman ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Unique email.
    pub email: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a salesman.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSalesmanInput {
    /// Display name.
    pub name: String,
    /// Unique email.
    pub email: String,
    /// Contact phone.
    pub phone: Option<String>,
}

/// Partial update of a salesman.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSalesmanInput {
    /// New display name.
    pub name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New phone.
    pub phone: Option<String>,
}

/// Repository trait for salesman persistence.
pub trait SalesmanRepository: Send + Sync {
    /// Find a salesman by ID.
    fn find_by_id(&self, id: Uuid) -> impl Future<Output = AppResult<Option<Salesman>>> + Send;

    /// Find a salesman by email.
    fn find_by_email(&self, email: &str)
    -> impl Future<Output = AppResult<Option<Salesman>>> + Send;

    /// Create a salesman.
    fn create(&self, input: CreateSalesmanInput) -> impl Future<Output = AppResult<Salesman>> + Send;

    /// Persist changes to a salesman.
    fn update(&self, salesman: &Salesman) -> impl Future<Output = AppResult<Salesman>> + Send;

    /// Delete a salesman. Returns false if it did not exist.
    fn delete(&self, id: Uuid) -> impl Future<Output = AppResult<bool>> + Send;

    /// List salesmen by name with the total count.
    fn list(
        &self,
        page: &PageRequest,
    ) -> impl Future<Output = AppResult<(Vec<Salesman>, u64)>> + Send;
}

/// Salesman service.
pub struct SalesmanService<R: SalesmanRepository> {
    repo: Arc<R>,
}

impl<R: SalesmanRepository> SalesmanService<R> {
    /// Create a new salesman service.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Registers a salesman with an unused email.
    pub async fn create_salesman(&self, input: CreateSalesmanInput) -> AppResult<Salesman> {
        require_non_blank("Name", &input.name)?;
        require_non_blank("Email", &input.email)?;

        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::already_exists(ENTITY));
        }

        self.repo.create(input).await
    }

    /// Updates a salesman, keeping emails unique.
    pub async fn update_salesman(&self, id: Uuid, input: UpdateSalesmanInput) -> AppResult<Salesman> {
        require_non_blank_opt("Name", input.name.as_deref())?;
        require_non_blank_opt("Email", input.email.as_deref())?;

        let mut salesman = self.get_salesman(id).await?;

        if let Some(email) = input.email.as_deref()
            && email != salesman.email
            && self.repo.find_by_email(email).await?.is_some()
        {
            return Err(AppError::already_exists(ENTITY));
        }

        if let Some(name) = input.name {
            salesman.name = name;
        }
        if let Some(email) = input.email {
            salesman.email = email;
        }
        if input.phone.is_some() {
            salesman.phone = input.phone;
        }

        self.repo.update(&salesman).await
    }

    /// Fetches a salesman by ID.
    pub async fn get_salesman(&self, id: Uuid) -> AppResult<Salesman> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY))
    }

    /// Lists salesmen page by page.
    pub async fn list_salesmen(&self, page: &PageRequest) -> AppResult<(Vec<Salesman>, u64)> {
        self.repo.list(&page.normalized()).await
    }

    /// Deletes a salesman.
    pub async fn delete_salesman(&self, id: Uuid) -> AppResult<()> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(ENTITY))
        }
    }
}
