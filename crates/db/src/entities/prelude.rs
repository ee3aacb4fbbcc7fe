//! Entity re-exports.

pub use super::additional_items::Entity as AdditionalItems;
pub use super::budget_additional_items::Entity as BudgetAdditionalItems;
pub use super::budget_products::Entity as BudgetProducts;
pub use super::budgets::Entity as Budgets;
pub use super::customers::Entity as Customers;
pub use super::products::Entity as Products;
pub use super::salesmen::Entity as Salesmen;
pub use super::users::Entity as Users;
