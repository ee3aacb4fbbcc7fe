//! Core business logic for Bizdesk.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence is reached through the repository traits declared next to each
//! service and implemented by `bizdesk-db`.
//!
//! # Modules
//!
//! - `pricing` - Line item and budget total calculation
//! - `budget` - Budget creation workflow
//! - `customer`, `salesman`, `catalog` - Registry use cases
//! - `auth` - Users, password hashing and login
//! - `storage` - Product image storage

pub mod auth;
pub mod budget;
pub mod catalog;
pub mod customer;
pub mod pricing;
pub mod salesman;
pub mod storage;
pub mod validation;

#[cfg(test)]
mod testing;
