//! Budget repository.
//!
//! A budget is stored as one `budgets` row plus ordered rows in
//! `budget_products` and `budget_additional_items`.

use std::collections::HashMap;

use bizdesk_core::budget::{Budget, BudgetLine, BudgetRepository as BudgetRepoTrait, NewBudget};
use bizdesk_shared::types::PageRequest;
use bizdesk_shared::{AppError, AppResult};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use super::db_error;
use crate::entities::{budget_additional_items, budget_products, budgets};

const ENTITY: &str = "Budget";

/// Budget repository implementation.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Create a new budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads the ordered line items of the given budgets.
    async fn load_lines(
        &self,
        budget_ids: &[Uuid],
    ) -> AppResult<(HashMap<Uuid, Vec<BudgetLine>>, HashMap<Uuid, Vec<BudgetLine>>)> {
        let product_rows = budget_products::Entity::find()
            .filter(budget_products::Column::BudgetId.is_in(budget_ids.to_vec()))
            .order_by_asc(budget_products::Column::Position)
            .all(&self.db)
            .await
            .map_err(db_error(ENTITY))?;

        let item_rows = budget_additional_items::Entity::find()
            .filter(budget_additional_items::Column::BudgetId.is_in(budget_ids.to_vec()))
            .order_by_asc(budget_additional_items::Column::Position)
            .all(&self.db)
            .await
            .map_err(db_error(ENTITY))?;

        let mut products: HashMap<Uuid, Vec<BudgetLine>> = HashMap::new();
        for row in product_rows {
            products.entry(row.budget_id).or_default().push(BudgetLine {
                item_id: row.product_id,
                unit_price: row.unit_price,
                quantity: row.quantity,
                discount: row.discount,
                total_price: row.total_price,
            });
        }

        let mut items: HashMap<Uuid, Vec<BudgetLine>> = HashMap::new();
        for row in item_rows {
            items.entry(row.budget_id).or_default().push(BudgetLine {
                item_id: row.additional_item_id,
                unit_price: row.unit_price,
                quantity: row.quantity,
                discount: row.discount,
                total_price: row.total_price,
            });
        }

        Ok((products, items))
    }
}

impl BudgetRepoTrait for BudgetRepository {
    async fn find_by_code(&self, code: &str) -> AppResult<Option<Budget>> {
        let model = budgets::Entity::find()
            .filter(budgets::Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(db_error(ENTITY))?;

        match model {
            Some(model) => self.find_by_id(model.id).await,
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Budget>> {
        let Some(model) = budgets::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error(ENTITY))?
        else {
            return Ok(None);
        };

        let (mut products, mut items) = self.load_lines(&[id]).await?;
        Ok(Some(to_domain(
            model,
            products.remove(&id).unwrap_or_default(),
            items.remove(&id).unwrap_or_default(),
        )))
    }

    async fn create(&self, input: NewBudget) -> AppResult<Budget> {
        let txn = self.db.begin().await.map_err(db_error(ENTITY))?;
        let now = Utc::now().into();
        let budget_id = Uuid::new_v4();

        let header = budgets::ActiveModel {
            id: Set(budget_id),
            code: Set(input.code),
            customer_id: Set(input.customer_id),
            salesman_id: Set(input.salesman_id),
            description: Set(input.description),
            total_value: Set(Decimal::ZERO),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .map_err(create_error)?;

        if !input.products.is_empty() {
            let rows = input
                .products
                .iter()
                .enumerate()
                .map(|(position, line)| budget_products::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    budget_id: Set(budget_id),
                    product_id: Set(line.item_id),
                    position: Set(position_of(position)),
                    unit_price: Set(line.unit_price),
                    quantity: Set(line.quantity),
                    discount: Set(line.discount),
                    total_price: Set(line.total_price),
                });
            budget_products::Entity::insert_many(rows)
                .exec_without_returning(&txn)
                .await
                .map_err(create_error)?;
        }

        if !input.additional_items.is_empty() {
            let rows = input
                .additional_items
                .iter()
                .enumerate()
                .map(|(position, line)| budget_additional_items::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    budget_id: Set(budget_id),
                    additional_item_id: Set(line.item_id),
                    position: Set(position_of(position)),
                    unit_price: Set(line.unit_price),
                    quantity: Set(line.quantity),
                    discount: Set(line.discount),
                    total_price: Set(line.total_price),
                });
            budget_additional_items::Entity::insert_many(rows)
                .exec_without_returning(&txn)
                .await
                .map_err(create_error)?;
        }

        txn.commit().await.map_err(db_error(ENTITY))?;

        tracing::info!(budget_id = %budget_id, code = %header.code, "budget created");
        Ok(to_domain(header, input.products, input.additional_items))
    }

    async fn save(&self, budget: &Budget) -> AppResult<()> {
        budgets::ActiveModel {
            id: Set(budget.id),
            description: Set(budget.description.clone()),
            total_value: Set(budget.total_value),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => AppError::not_found(ENTITY),
            other => db_error(ENTITY)(other),
        })?;

        tracing::debug!(budget_id = %budget.id, total_value = %budget.total_value, "budget saved");
        Ok(())
    }

    async fn list(&self, page: &PageRequest) -> AppResult<(Vec<Budget>, u64)> {
        let paginator = budgets::Entity::find()
            .order_by_desc(budgets::Column::CreatedAt)
            .order_by_desc(budgets::Column::Id)
            .paginate(&self.db, page.limit());

        let total = paginator.num_items().await.map_err(db_error(ENTITY))?;
        let models = paginator
            .fetch_page(page.index())
            .await
            .map_err(db_error(ENTITY))?;

        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let (mut products, mut items) = self.load_lines(&ids).await?;

        let budgets = models
            .into_iter()
            .map(|model| {
                let id = model.id;
                to_domain(
                    model,
                    products.remove(&id).unwrap_or_default(),
                    items.remove(&id).unwrap_or_default(),
                )
            })
            .collect();

        Ok((budgets, total))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = budgets::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error(ENTITY))?;

        if result.rows_affected > 0 {
            tracing::info!(budget_id = %id, "budget deleted");
        }
        Ok(result.rows_affected > 0)
    }
}

/// Foreign key failures on insert mean the budget references a row that is gone.
fn create_error(err: DbErr) -> AppError {
    if let Some(SqlErr::ForeignKeyConstraintViolation(detail)) = err.sql_err() {
        tracing::warn!(%detail, "budget references a missing row");
        return missing_reference(&detail);
    }
    db_error(ENTITY)(err)
}

/// Picks the error for a violated foreign key by its constraint name.
fn missing_reference(detail: &str) -> AppError {
    if detail.contains("budgets_customer_id_fkey") {
        AppError::not_found("Customer")
    } else if detail.contains("budgets_salesman_id_fkey") {
        AppError::not_found("Salesman")
    } else if detail.contains("budget_products_product_id_fkey") {
        AppError::Validation("Budget references a product that does not exist!".to_string())
    } else if detail.contains("budget_additional_items_additional_item_id_fkey") {
        AppError::Validation(
            "Budget references an additional item that does not exist!".to_string(),
        )
    } else {
        AppError::Validation("Budget references a record that does not exist!".to_string())
    }
}

fn position_of(index: usize) -> i32 {
    i32::try_from(index).unwrap_or(i32::MAX)
}

fn to_domain(
    model: budgets::Model,
    products: Vec<BudgetLine>,
    additional_items: Vec<BudgetLine>,
) -> Budget {
    Budget {
        id: model.id,
        code: model.code,
        customer_id: model.customer_id,
        salesman_id: model.salesman_id,
        description: model.description,
        products,
        additional_items,
        total_value: model.total_value,
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
    }
}
