//! Budgets (customer quotes) and the budget creation workflow.

pub mod error;
pub mod service;
pub mod types;


pub use error::BudgetError;
pub use service::{BudgetRepository, BudgetService};
pub use types::{Budget, BudgetLine, CreateBudgetInput, CreateBudgetLineInput, NewBudget};
