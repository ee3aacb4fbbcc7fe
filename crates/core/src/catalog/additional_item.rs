//! Additional items (services, accessories) that can be added to a budget.

use std::future::Future;
use std::sync::Arc;

use bizdesk_shared::types::PageRequest;
use bizdesk_shared::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validation::{require_non_blank, require_non_blank_opt};

const ENTITY: &str = "Additional item";

/// An additional item record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalItem {
    /// Item ID.
    pub id: Uuid,
    /// Unique item code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Free-form size, e.g. "2m x 1m".
    pub size: Option<String>,
    /// Optional description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an additional item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAdditionalItemInput {
    /// Unique item code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Free-form size.
    pub size: Option<String>,
    /// Optional description.
    pub description: Option<String>,
}

/// Partial update of an additional item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAdditionalItemInput {
    /// New code.
    pub code: Option<String>,
    /// New name.
    pub name: Option<String>,
    /// New size.
    pub size: Option<String>,
    /// New description.
    pub description: Option<String>,
}

/// Repository trait for additional item persistence.
pub trait AdditionalItemRepository: Send + Sync {
    /// Find an item by ID.
    fn find_by_id(&self, id: Uuid)
    -> impl Future<Output = AppResult<Option<AdditionalItem>>> + Send;

    /// Find an item by code.
    fn find_by_code(
        &self,
        code: &str,
    ) -> impl Future<Output = AppResult<Option<AdditionalItem>>> + Send;

    /// Create an item.
    fn create(
        &self,
        input: CreateAdditionalItemInput,
    ) -> impl Future<Output = AppResult<AdditionalItem>> + Send;

    /// Persist changes to an item.
    fn update(
        &self,
        item: &AdditionalItem,
    ) -> impl Future<Output = AppResult<AdditionalItem>> + Send;

    /// Delete an item. Returns false if it did not exist.
    fn delete(&self, id: Uuid) -> impl Future<Output = AppResult<bool>> + Send;

    /// List items by code with the total count.
    fn list(
        &self,
        page: &PageRequest,
    ) -> impl Future<Output = AppResult<(Vec<AdditionalItem>, u64)>> + Send;
}

/// Additional item service.
pub struct AdditionalItemService<R: AdditionalItemRepository> {
    repo: Arc<R>,
}

impl<R: AdditionalItemRepository> AdditionalItemService<R> {
    /// Create a new additional item service.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Adds an item with an unused code.
    pub async fn create_item(&self, input: CreateAdditionalItemInput) -> AppResult<AdditionalItem> {
        require_non_blank("Code", &input.code)?;
        require_non_blank("Name", &input.name)?;

        if self.repo.find_by_code(&input.code).await?.is_some() {
            return Err(AppError::already_exists(ENTITY));
        }

        self.repo.create(input).await
    }

    /// Updates an item, keeping codes unique.
    pub async fn update_item(
        &self,
        id: Uuid,
        input: UpdateAdditionalItemInput,
    ) -> AppResult<AdditionalItem> {
        require_non_blank_opt("Code", input.code.as_deref())?;
        require_non_blank_opt("Name", input.name.as_deref())?;

        let mut item = self.get_item(id).await?;

        if let Some(code) = input.code.as_deref()
            && code != item.code
            && self.repo.find_by_code(code).await?.is_some()
        {
            return Err(AppError::already_exists(ENTITY));
        }

        if let Some(code) = input.code {
            item.code = code;
        }
        if let Some(name) = input.name {
            item.name = name;
        }
        if input.size.is_some() {
            item.size = input.size;
        }
        if input.description.is_some() {
            item.description = input.description;
        }

        self.repo.update(&item).await
    }

    /// Fetches an item by ID.
    pub async fn get_item(&self, id: Uuid) -> AppResult<AdditionalItem> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY))
    }

    /// Lists items page by page.
    pub async fn list_items(&self, page: &PageRequest) -> AppResult<(Vec<AdditionalItem>, u64)> {
        self.repo.list(&page.normalized()).await
    }

    /// Deletes an item.
    pub async fn delete_item(&self, id: Uuid) -> AppResult<()> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(ENTITY))
        }
    }
}
