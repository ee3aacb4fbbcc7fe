//! Customer use cases.

use std::future::Future;
use std::sync::Arc;

use bizdesk_shared::{AppError, AppResult};
use uuid::Uuid;

use super::types::{CreateCustomerInput, Customer, UpdateCustomerInput};
use crate::validation::{require_non_blank, require_non_blank_opt};

const ENTITY: &str = "Customer";

/// Repository trait for customer persistence.
pub trait CustomerRepository: Send + Sync {
    /// Find a customer by ID.
    fn find_by_id(&self, id: Uuid) -> impl Future<Output = AppResult<Option<Customer>>> + Send;

    /// Find a customer by tax document.
    fn find_by_document(
        &self,
        document: &str,
    ) -> impl Future<Output = AppResult<Option<Customer>>> + Send;

    /// Create a customer.
    fn create(&self, input: CreateCustomerInput) -> impl Future<Output = AppResult<Customer>> + Send;

    /// Persist changes to a customer.
    fn update(&self, customer: &Customer) -> impl Future<Output = AppResult<Customer>> + Send;

    /// Delete a customer. Returns false if it did not exist.
    fn delete(&self, id: Uuid) -> impl Future<Output = AppResult<bool>> + Send;
}

/// Customer service.
pub struct CustomerService<R: CustomerRepository> {
    repo: Arc<R>,
}

impl<R: CustomerRepository> CustomerService<R> {
    /// Create a new customer service.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Registers a customer with a document no other customer uses.
    pub async fn create_customer(&self, input: CreateCustomerInput) -> AppResult<Customer> {
        require_non_blank("Name", &input.name)?;
        require_non_blank("Document", &input.document)?;

        if self.repo.find_by_document(&input.document).await?.is_some() {
            return Err(AppError::already_exists(ENTITY));
        }

        self.repo.create(input).await
    }

    /// Updates a customer, keeping documents unique.
    pub async fn update_customer(&self, id: Uuid, input: UpdateCustomerInput) -> AppResult<Customer> {
        require_non_blank_opt("Name", input.name.as_deref())?;
        require_non_blank_opt("Document", input.document.as_deref())?;

        let mut customer = self.get_customer(id).await?;

        if let Some(document) = input.document.as_deref()
            && document != customer.document
            && self.repo.find_by_document(document).await?.is_some()
        {
            return Err(AppError::already_exists(ENTITY));
        }

        input.apply(&mut customer);
        self.repo.update(&customer).await
    }

    /// Fetches a customer by ID.
    pub async fn get_customer(&self, id: Uuid) -> AppResult<Customer> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(ENTITY))
    }

    /// Deletes a customer.
    pub async fn delete_customer(&self, id: Uuid) -> AppResult<()> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(ENTITY))
        }
    }
}
