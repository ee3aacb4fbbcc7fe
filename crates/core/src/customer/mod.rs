//! Customers that budgets are quoted for.

mod service;
mod types;

pub use service::{CustomerRepository, CustomerService};
pub use types::{CreateCustomerInput, Customer, UpdateCustomerInput};
