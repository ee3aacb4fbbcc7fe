//! Budget routes.
//!
//! `POST /budgets` runs the creation workflow: code uniqueness, customer and
//! salesman checks, line pricing, then persistence. The response carries the
//! computed `total_price` of every line and the budget `total_value`.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    handler::Handler,
    http::StatusCode,
    middleware,
    routing::get,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{
    AppState,
    error::ApiResult,
    middleware::{AuthUser, require_admin},
};
use bizdesk_core::budget::{Budget, BudgetLine, BudgetService, CreateBudgetInput, CreateBudgetLineInput};
use bizdesk_db::{BudgetRepository, CustomerRepository, SalesmanRepository};
use bizdesk_shared::types::{PageRequest, PageResponse};

/// Creates the budget routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budgets", get(list_budgets).post(create_budget))
        .route(
            "/budgets/{id}",
            get(get_budget).delete(delete_budget.layer(middleware::from_fn(require_admin))),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a budget.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBudgetRequest {
    /// Unique budget code.
    #[validate(length(min = 1, max = 64, message = "Budget code must have 1 to 64 characters!"))]
    pub code: String,
    /// Customer the quote is for.
    pub customer_id: Option<Uuid>,
    /// Salesman responsible for the quote.
    pub salesman_id: Option<Uuid>,
    /// Optional description.
    pub description: Option<String>,
    /// Product lines.
    #[serde(default)]
    pub products: Vec<ProductLineRequest>,
    /// Additional item lines.
    pub additional_items: Option<Vec<AdditionalItemLineRequest>>,
}

/// A product line as submitted.
#[derive(Debug, Deserialize)]
pub struct ProductLineRequest {
    /// Product ID.
    pub product_id: Uuid,
    /// Price of one unit.
    pub unit_price: Decimal,
    /// Number of units.
    pub quantity: i32,
    /// Discount rate in `[0, 1]`, zero when omitted.
    #[serde(default)]
    pub discount: Decimal,
}

/// An additional item line as submitted.
#[derive(Debug, Deserialize)]
pub struct AdditionalItemLineRequest {
    /// Additional item ID.
    pub additional_item_id: Uuid,
    /// Price of one unit.
    pub unit_price: Decimal,
    /// Number of units.
    pub quantity: i32,
    /// Discount rate in `[0, 1]`, zero when omitted.
    #[serde(default)]
    pub discount: Decimal,
}

impl From<ProductLineRequest> for CreateBudgetLineInput {
    fn from(line: ProductLineRequest) -> Self {
        Self {
            item_id: line.product_id,
            unit_price: line.unit_price,
            quantity: line.quantity,
            discount: line.discount,
        }
    }
}

impl From<AdditionalItemLineRequest> for CreateBudgetLineInput {
    fn from(line: AdditionalItemLineRequest) -> Self {
        Self {
            item_id: line.additional_item_id,
            unit_price: line.unit_price,
            quantity: line.quantity,
            discount: line.discount,
        }
    }
}

impl From<CreateBudgetRequest> for CreateBudgetInput {
    fn from(req: CreateBudgetRequest) -> Self {
        Self {
            code: req.code,
            customer_id: req.customer_id,
            salesman_id: req.salesman_id,
            description: req.description,
            products: req.products.into_iter().map(Into::into).collect(),
            additional_items: req
                .additional_items
                .map(|lines| lines.into_iter().map(Into::into).collect()),
        }
    }
}

/// A priced product line.
#[derive(Debug, Serialize)]
pub struct ProductLineResponse {
    /// Product ID.
    pub product_id: Uuid,
    /// Price of one unit.
    pub unit_price: Decimal,
    /// Number of units.
    pub quantity: i32,
    /// Discount rate.
    pub discount: Decimal,
    /// Computed line total.
    pub total_price: Decimal,
}

/// A priced additional item line.
#[derive(Debug, Serialize)]
pub struct AdditionalItemLineResponse {
    /// Additional item ID.
    pub additional_item_id: Uuid,
    /// Price of one unit.
    pub unit_price: Decimal,
    /// Number of units.
    pub quantity: i32,
    /// Discount rate.
    pub discount: Decimal,
    /// Computed line total.
    pub total_price: Decimal,
}

/// Response for a budget.
#[derive(Debug, Serialize)]
pub struct BudgetResponse {
    /// Budget ID.
    pub id: Uuid,
    /// Unique budget code.
    pub code: String,
    /// Customer ID.
    pub customer_id: Uuid,
    /// Salesman ID.
    pub salesman_id: Uuid,
    /// Description.
    pub description: Option<String>,
    /// Priced product lines.
    pub products: Vec<ProductLineResponse>,
    /// Priced additional item lines.
    pub additional_items: Vec<AdditionalItemLineResponse>,
    /// Sum of all line totals.
    pub total_value: Decimal,
    /// Created at timestamp.
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&BudgetLine> for ProductLineResponse {
    fn from(line: &BudgetLine) -> Self {
        Self {
            product_id: line.item_id,
            unit_price: line.unit_price,
            quantity: line.quantity,
            discount: line.discount,
            total_price: line.total_price,
        }
    }
}

impl From<&BudgetLine> for AdditionalItemLineResponse {
    fn from(line: &BudgetLine) -> Self {
        Self {
            additional_item_id: line.item_id,
            unit_price: line.unit_price,
            quantity: line.quantity,
            discount: line.discount,
            total_price: line.total_price,
        }
    }
}

impl From<Budget> for BudgetResponse {
    fn from(budget: Budget) -> Self {
        Self {
            id: budget.id,
            products: budget.products.iter().map(Into::into).collect(),
            additional_items: budget.additional_items.iter().map(Into::into).collect(),
            code: budget.code,
            customer_id: budget.customer_id,
            salesman_id: budget.salesman_id,
            description: budget.description,
            total_value: budget.total_value,
            created_at: budget.created_at,
            updated_at: budget.updated_at,
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

type Service = BudgetService<BudgetRepository, CustomerRepository, SalesmanRepository>;

fn service(state: &AppState) -> Service {
    let db = (*state.db).clone();
    BudgetService::new(
        Arc::new(BudgetRepository::new(db.clone())),
        Arc::new(CustomerRepository::new(db.clone())),
        Arc::new(SalesmanRepository::new(db)),
    )
}

/// POST /budgets - Create a budget.
async fn create_budget(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateBudgetRequest>,
) -> ApiResult<(StatusCode, Json<BudgetResponse>)> {
    payload.validate()?;

    let budget = service(&state).create_budget(payload.into()).await?;

    info!(
        budget_id = %budget.id,
        code = %budget.code,
        user_id = %user.user_id(),
        total_value = %budget.total_value,
        "Budget created"
    );
    Ok((StatusCode::CREATED, Json(budget.into())))
}

/// GET /budgets - Newest first, paginated.
async fn list_budgets(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> ApiResult<Json<PageResponse<BudgetResponse>>> {
    let page = page.normalized();
    let (budgets, total) = service(&state).list_budgets(&page).await?;

    Ok(Json(
        PageResponse::new(budgets, page.page, page.per_page, total).map(BudgetResponse::from),
    ))
}

/// GET /budgets/{id}
async fn get_budget(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<BudgetResponse>> {
    let budget = service(&state).get_budget(id).await?;
    Ok(Json(budget.into()))
}

/// DELETE /budgets/{id} - Admin only.
async fn delete_budget(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    service(&state).delete_budget(id).await?;

    info!(budget_id = %id, "Budget deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_request_maps_lines_and_defaults_discount() {
        let product_id = Uuid::new_v4();
        let item_id = Uuid::new_v4();
        let request: CreateBudgetRequest = serde_json::from_value(serde_json::json!({
            "code": "B-001",
            "customer_id": Uuid::new_v4(),
            "salesman_id": Uuid::new_v4(),
            "products": [{ "product_id": product_id, "unit_price": 100, "quantity": 2 }],
            "additional_items": [{
                "additional_item_id": item_id,
                "unit_price": "9.99",
                "quantity": 1,
                "discount": "0.1"
            }]
        }))
        .unwrap();

        let input = CreateBudgetInput::from(request);
        assert_eq!(input.products[0].item_id, product_id);
        assert_eq!(input.products[0].discount, Decimal::ZERO);
        assert_eq!(input.products[0].unit_price, dec!(100));

        let extras = input.additional_items.unwrap();
        assert_eq!(extras[0].item_id, item_id);
        assert_eq!(extras[0].discount, dec!(0.1));
    }

    #[test]
    fn test_missing_references_and_products_reach_the_workflow() {
        let request: CreateBudgetRequest =
            serde_json::from_value(serde_json::json!({ "code": "B-002" })).unwrap();
        assert!(request.validate().is_ok());

        let input = CreateBudgetInput::from(request);
        assert!(input.customer_id.is_none());
        assert!(input.salesman_id.is_none());
        assert!(input.products.is_empty());
        assert!(input.additional_items.is_none());
    }

    #[test]
    fn test_empty_code_is_rejected() {
        let request: CreateBudgetRequest =
            serde_json::from_value(serde_json::json!({ "code": "" })).unwrap();
        assert!(request.validate().is_err());
    }
}
