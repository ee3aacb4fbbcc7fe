//! Repository implementations of the `bizdesk-core` persistence traits.
//!
//! Repositories hide the `SeaORM` details from the rest of the application
//! and translate database failures into `AppError`.

pub mod additional_item;
pub mod budget;
pub mod customer;
pub mod product;
pub mod salesman;
pub mod user;

pub use additional_item::AdditionalItemRepository;
pub use budget::BudgetRepository;
pub use customer::CustomerRepository;
pub use product::ProductRepository;
pub use salesman::SalesmanRepository;
pub use user::UserRepository;

use bizdesk_shared::AppError;
use sea_orm::{DbErr, SqlErr};

/// Maps a database error for `entity` into an `AppError`.
///
/// Unique violations become `Conflict` ("X already exists!"), foreign key
/// violations become `Conflict` as well since the row is still referenced.
pub(crate) fn db_error(entity: &'static str) -> impl Fn(DbErr) -> AppError {
    move |err| match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::already_exists(entity),
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            tracing::warn!(entity, %detail, "foreign key violation");
            AppError::Conflict(format!("{entity} is referenced by other records!"))
        }
        _ => {
            tracing::error!(entity, error = %err, "database error");
            AppError::Database(err.to_string())
        }
    }
}
