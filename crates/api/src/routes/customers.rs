//! Customer routes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    handler::Handler,
    http::StatusCode,
    middleware,
    routing::{get, post},
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{AppState, error::ApiResult, middleware::require_admin};
use bizdesk_core::customer::{CreateCustomerInput, Customer, CustomerService, UpdateCustomerInput};
use bizdesk_db::CustomerRepository;

/// Creates the customer routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/customers", post(create_customer)).route(
        "/customers/{id}",
        get(get_customer)
            .patch(update_customer)
            .delete(delete_customer.layer(middleware::from_fn(require_admin))),
    )
}

/// Request body for creating a customer.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    /// Display name.
    #[validate(length(max = 255, message = "Name is too long!"))]
    pub name: String,
    /// Tax document number.
    #[validate(length(max = 32, message = "Document is too long!"))]
    pub document: String,
    /// Contact email.
    #[validate(email(message = "Email is invalid!"))]
    pub email: Option<String>,
    /// Contact phone.
    #[validate(length(max = 32, message = "Phone is too long!"))]
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
}

/// Request body for updating a customer.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCustomerRequest {
    /// New display name.
    #[validate(length(max = 255, message = "Name is too long!"))]
    pub name: Option<String>,
    /// New tax document number.
    #[validate(length(max = 32, message = "Document is too long!"))]
    pub document: Option<String>,
    /// New contact email.
    #[validate(email(message = "Email is invalid!"))]
    pub email: Option<String>,
    /// New contact phone.
    #[validate(length(max = 32, message = "Phone is too long!"))]
    pub phone: Option<String>,
    /// New postal address.
    pub address: Option<String>,
}

impl From<CreateCustomerRequest> for CreateCustomerInput {
    fn from(req: CreateCustomerRequest) -> Self {
        Self {
            name: req.name,
            document: req.document,
            email: req.email,
            phone: req.phone,
            address: req.address,
        }
    }
}

impl From<UpdateCustomerRequest> for UpdateCustomerInput {
    fn from(req: UpdateCustomerRequest) -> Self {
        Self {
            name: req.name,
            document: req.document,
            email: req.email,
            phone: req.phone,
            address: req.address,
        }
    }
}

fn service(state: &AppState) -> CustomerService<CustomerRepository> {
    CustomerService::new(Arc::new(CustomerRepository::new((*state.db).clone())))
}

/// POST /customers
async fn create_customer(
    State(state): State<AppState>,
    Json(payload): Json<CreateCustomerRequest>,
) -> ApiResult<(StatusCode, Json<Customer>)> {
    payload.validate()?;

    let customer = service(&state).create_customer(payload.into()).await?;

    info!(customer_id = %customer.id, "Customer created");
    Ok((StatusCode::CREATED, Json(customer)))
}

/// GET /customers/{id}
async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Customer>> {
    Ok(Json(service(&state).get_customer(id).await?))
}

/// PATCH /customers/{id}
async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCustomerRequest>,
) -> ApiResult<Json<Customer>> {
    payload.validate()?;

    let customer = service(&state).update_customer(id, payload.into()).await?;

    info!(customer_id = %customer.id, "Customer updated");
    Ok(Json(customer))
}

/// DELETE /customers/{id} - Admin only.
async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    service(&state).delete_customer(id).await?;

    info!(customer_id = %id, "Customer deleted");
    Ok(StatusCode::NO_CONTENT)
}
