//! `SeaORM` entity definitions, one module per table.

pub mod prelude;

pub mod additional_items;
pub mod budget_additional_items;
pub mod budget_products;
pub mod budgets;
pub mod customers;
pub mod products;
pub mod salesmen;
pub mod users;
