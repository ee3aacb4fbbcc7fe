//! Budget creation workflow.

use std::future::Future;
use std::sync::Arc;

use bizdesk_shared::AppResult;
use bizdesk_shared::types::PageRequest;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::BudgetError;
use super::types::{Budget, BudgetLine, CreateBudgetInput, CreateBudgetLineInput, NewBudget};
use crate::customer::CustomerRepository;
use crate::pricing::{calculate_total_value, validate_line_item, within_amount_limit};
use crate::salesman::SalesmanRepository;

/// Repository trait for budget persistence.
///
/// Implemented by the db crate.
pub trait BudgetRepository: Send + Sync {
    /// Find a budget by its unique code.
    fn find_by_code(&self, code: &str) -> impl Future<Output = AppResult<Option<Budget>>> + Send;

    /// Find a budget by ID.
    fn find_by_id(&self, id: Uuid) -> impl Future<Output = AppResult<Option<Budget>>> + Send;

    /// Persist a new budget with its lines. `total_value` starts at zero.
    fn create(&self, input: NewBudget) -> impl Future<Output = AppResult<Budget>> + Send;

    /// Persist changes to an existing budget.
    fn save(&self, budget: &Budget) -> impl Future<Output = AppResult<()>> + Send;

    /// List budgets, newest first, with the total count.
    fn list(&self, page: &PageRequest) -> impl Future<Output = AppResult<(Vec<Budget>, u64)>> + Send;

    /// Delete a budget. Returns false if it did not exist.
    fn delete(&self, id: Uuid) -> impl Future<Output = AppResult<bool>> + Send;
}

/// Budget service orchestrating validation, pricing and persistence.
pub struct BudgetService<B, C, S> {
    budgets: Arc<B>,
    customers: Arc<C>,
    salesmen: Arc<S>,
}

impl<B, C, S> BudgetService<B, C, S>
where
    B: BudgetRepository,
    C: CustomerRepository,
    S: SalesmanRepository,
{
    /// Create a new budget service.
    #[must_use]
    pub fn new(budgets: Arc<B>, customers: Arc<C>, salesmen: Arc<S>) -> Self {
        Self {
            budgets,
            customers,
            salesmen,
        }
    }

    /// Validates, prices and persists a new budget.
    ///
    /// Checks run in a fixed order and the first failure wins: code
    /// uniqueness, customer and salesman presence, salesman and customer
    /// existence, at least one product, every line item, then the size of
    /// the budget total. Nothing is written unless all checks pass.
    ///
    /// # Errors
    ///
    /// Returns the `BudgetError` of the first failing check, or
    /// `BudgetError::Repository` if persistence fails.
    pub async fn create_budget(&self, input: CreateBudgetInput) -> Result<Budget, BudgetError> {
        if self.budgets.find_by_code(&input.code).await?.is_some() {
            return Err(BudgetError::DuplicateCode(input.code));
        }

        let customer_id = input.customer_id.ok_or(BudgetError::MissingCustomer)?;
        let salesman_id = input.salesman_id.ok_or(BudgetError::MissingSalesman)?;

        if self.salesmen.find_by_id(salesman_id).await?.is_none() {
            return Err(BudgetError::SalesmanNotFound(salesman_id));
        }
        if self.customers.find_by_id(customer_id).await?.is_none() {
            return Err(BudgetError::CustomerNotFound(customer_id));
        }

        if input.products.is_empty() {
            return Err(BudgetError::EmptyProducts);
        }

        let additional_items = input.additional_items.unwrap_or_default();
        for line in input.products.iter().chain(&additional_items) {
            validate_line_item(line.unit_price, line.quantity, line.discount)?;
        }

        let products: Vec<BudgetLine> = input
            .products
            .iter()
            .map(CreateBudgetLineInput::priced)
            .collect();
        let additional_items: Vec<BudgetLine> = additional_items
            .iter()
            .map(CreateBudgetLineInput::priced)
            .collect();

        let total = products
            .iter()
            .chain(&additional_items)
            .try_fold(Decimal::ZERO, |sum, line| sum.checked_add(line.total_price));
        if !total.is_some_and(within_amount_limit) {
            return Err(BudgetError::TotalTooLarge);
        }

        let mut budget = self
            .budgets
            .create(NewBudget {
                code: input.code,
                customer_id,
                salesman_id,
                description: input.description,
                products,
                additional_items,
            })
            .await?;

        budget.total_value = calculate_total_value(&budget);

        self.budgets.save(&budget).await?;

        Ok(budget)
    }

    /// Fetch a budget by ID.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound` if no budget has this ID.
    pub async fn get_budget(&self, id: Uuid) -> Result<Budget, BudgetError> {
        self.budgets
            .find_by_id(id)
            .await?
            .ok_or(BudgetError::NotFound(id))
    }

    /// List budgets page by page.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::Repository` if the query fails.
    pub async fn list_budgets(&self, page: &PageRequest) -> Result<(Vec<Budget>, u64), BudgetError> {
        Ok(self.budgets.list(&page.normalized()).await?)
    }

    /// Delete a budget and its lines.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::NotFound` if no budget has this ID.
    pub async fn delete_budget(&self, id: Uuid) -> Result<(), BudgetError> {
        if self.budgets.delete(id).await? {
            Ok(())
        } else {
            Err(BudgetError::NotFound(id))
        }
    }
}
