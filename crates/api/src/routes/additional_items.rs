//! Additional item routes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    handler::Handler,
    http::StatusCode,
    middleware,
    routing::get,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{AppState, error::ApiResult, middleware::require_admin};
use bizdesk_core::catalog::{
    AdditionalItem, AdditionalItemService, CreateAdditionalItemInput, UpdateAdditionalItemInput,
};
use bizdesk_db::AdditionalItemRepository;
use bizdesk_shared::types::{PageRequest, PageResponse};

/// Creates the additional item routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/additional-items", get(list_items).post(create_item))
        .route(
            "/additional-items/{id}",
            get(get_item)
                .patch(update_item)
                .delete(delete_item.layer(middleware::from_fn(require_admin))),
        )
}

/// Request body for creating an additional item.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAdditionalItemRequest {
    /// Unique item code.
    #[validate(length(max = 64, message = "Code is too long!"))]
    pub code: String,
    /// Display name.
    #[validate(length(max = 255, message = "Name is too long!"))]
    pub name: String,
    /// Free-form size.
    #[validate(length(max = 64, message = "Size is too long!"))]
    pub size: Option<String>,
    /// Optional description.
    pub description: Option<String>,
}

/// Request body for updating an additional item.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAdditionalItemRequest {
    /// Unique item code.
    #[validate(length(max = 64, message = "Code is too long!"))]
    pub code: Option<String>,
    /// Display name.
    #[validate(length(max = 255, message = "Name is too long!"))]
    pub name: Option<String>,
    /// Free-form size.
    #[validate(length(max = 64, message = "Size is too long!"))]
    pub size: Option<String>,
    /// Optional description.
    pub description: Option<String>,
}

fn service(state: &AppState) -> AdditionalItemService<AdditionalItemRepository> {
    AdditionalItemService::new(Arc::new(AdditionalItemRepository::new((*state.db).clone())))
}

async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<CreateAdditionalItemRequest>,
) -> ApiResult<(StatusCode, Json<AdditionalItem>)> {
    payload.validate()?;

    let item = service(&state)
        .create_item(CreateAdditionalItemInput {
            code: payload.code,
            name: payload.name,
            size: payload.size,
            description: payload.description,
        })
        .await?;

    info!(item_id = %item.id, code = %item.code, "Additional item created");
    Ok((StatusCode::CREATED, Json(item)))
}

async fn list_items(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> ApiResult<Json<PageResponse<AdditionalItem>>> {
    let page = page.normalized();
    let (items, total) = service(&state).list_items(&page).await?;

    Ok(Json(PageResponse::new(items, page.page, page.per_page, total)))
}

async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<AdditionalItem>> {
    Ok(Json(service(&state).get_item(id).await?))
}

async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAdditionalItemRequest>,
) -> ApiResult<Json<AdditionalItem>> {
    payload.validate()?;

    let item = service(&state)
        .update_item(
            id,
            UpdateAdditionalItemInput {
                code: payload.code,
                name: payload.name,
                size: payload.size,
                description: payload.description,
            },
        )
        .await?;

    info!(item_id = %item.id, "Additional item updated");
    Ok(Json(item))
}

async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    service(&state).delete_item(id).await?;

    info!(item_id = %id, "Additional item deleted");
    Ok(StatusCode::NO_CONTENT)
}
