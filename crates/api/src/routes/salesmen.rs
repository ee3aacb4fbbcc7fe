//! Salesman routes.

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
use bizdesk_core::salesman::{CreateSalesmanInput, Salesman, SalesmanService, UpdateSalesmanInput};
use bizdesk_db::SalesmanRepository;
use bizdesk_shared::types::{PageRequest, PageResponse};

/// Creates the salesman routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/salesmen", get(list_salesmen).post(create_salesman))
        .route(
            "/salesmen/{id}",
            get(get_salesman)
                .patch(update_salesman)
                .delete(delete_salesman.layer(middleware::from_fn(require_admin))),
        )
}

/// Request body for creating a salesman.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSalesmanRequest {
    /// Display name.
    #[validate(length(max = 255, message = "Name is too long!"))]
    pub name: String,
    /// Unique email.
    #[validate(email(message = "Email is invalid!"))]
    pub email: String,
    /// Contact phone.
    #[validate(length(max = 32, message = "Phone is too long!"))]
    pub phone: Option<String>,
}

/// Request body for updating a salesman.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSalesmanRequest {
    /// New display name.
    #[validate(length(max = 255, message = "Name is too long!"))]
    pub name: Option<String>,
    /// New email.
    #[validate(email(message = "Email is invalid!"))]
    pub email: Option<String>,
    /// New phone.
    #[validate(length(max = 32, message = "Phone is too long!"))]
    pub phone: Option<String>,
}

fn service(state: &AppState) -> SalesmanService<SalesmanRepository> {
    SalesmanService::new(Arc::new(SalesmanRepository::new((*state.db).clone())))
}

async fn create_salesman(
    State(state): State<AppState>,
    Json(payload): Json<CreateSalesmanRequest>,
) -> ApiResult<(StatusCode, Json<Salesman>)> {
    payload.validate()?;

    let salesman = service(&state)
        .create_salesman(CreateSalesmanInput {
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
        })
        .await?;

    info!(salesman_id = %salesman.id, "Salesman created");
    Ok((StatusCode::CREATED, Json(salesman)))
}

async fn list_salesmen(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> ApiResult<Json<PageResponse<Salesman>>> {
    let page = page.normalized();
    let (salesmen, total) = service(&state).list_salesmen(&page).await?;

    Ok(Json(PageResponse::new(
        salesmen,
        page.page,
        page.per_page,
        total,
    )))
}

async fn get_salesman(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Salesman>> {
    Ok(Json(service(&state).get_salesman(id).await?))
}

async fn update_salesman(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSalesmanRequest>,
) -> ApiResult<Json<Salesman>> {
    payload.validate()?;

    let salesman = service(&state)
        .update_salesman(
            id,
            UpdateSalesmanInput {
                name: payload.name,
                email: payload.email,
                phone: payload.phone,
            },
        )
        .await?;

    info!(salesman_id = %salesman.id, "Salesman updated");
    Ok(Json(salesman))
}

async fn delete_salesman(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    service(&state).delete_salesman(id).await?;

    info!(salesman_id = %id, "Salesman deleted");
    Ok(StatusCode::NO_CONTENT)
}
