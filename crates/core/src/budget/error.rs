//! Budget error types.

use bizdesk_shared::AppError;
use thiserror::Error;
use uuid::Uuid;

use crate::pricing::PricingError;

/// Budget-related errors.
#[derive(Debug, Error)]
pub enum BudgetError {
    /// A budget with this code already exists.
    #[error("Budget already exists: {0}")]
    DuplicateCode(String),

    /// No customer was referenced.
    #[error("Budget must have a customer!")]
    MissingCustomer,

    /// No salesman was referenced.
    #[error("Budget must have a salesman!")]
    MissingSalesman,

    /// The referenced salesman does not exist.
    #[error("Salesman not found: {0}")]
    SalesmanNotFound(Uuid),

    /// The referenced customer does not exist.
    #[error("Customer not found: {0}")]
    CustomerNotFound(Uuid),

    /// The budget has no product line items.
    #[error("Budget must have at least one product!")]
    EmptyProducts,

    /// A line item cannot be priced.
    #[error("Invalid line item: {0}")]
    InvalidLineItem(#[from] PricingError),

    /// The sum of the line totals is too large to store.
    #[error("Budget total is too large!")]
    TotalTooLarge,

    /// Budget not found.
    #[error("Budget not found: {0}")]
    NotFound(Uuid),

    /// A repository call failed.
    #[error(transparent)]
    Repository(#[from] AppError),
}

impl BudgetError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::DuplicateCode(_) => 409,
            Self::MissingCustomer
            | Self::MissingSalesman
            | Self::EmptyProducts
            | Self::InvalidLineItem(_)
            | Self::TotalTooLarge => 400,
            Self::SalesmanNotFound(_) | Self::CustomerNotFound(_) | Self::NotFound(_) => 404,
            Self::Repository(e) => e.status_code(),
        }
    }
}

impl From<BudgetError> for AppError {
    fn from(err: BudgetError) -> Self {
        let message = err.to_string();
        match err {
            BudgetError::Repository(e) => e,
            BudgetError::DuplicateCode(_) => Self::Conflict(message),
            BudgetError::SalesmanNotFound(_)
            | BudgetError::CustomerNotFound(_)
            | BudgetError::NotFound(_) => Self::NotFound(message),
            BudgetError::MissingCustomer
            | BudgetError::MissingSalesman
            | BudgetError::EmptyProducts
            | BudgetError::InvalidLineItem(_)
            | BudgetError::TotalTooLarge => Self::Validation(message),
        }
    }
}
