//! Customer data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A customer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Customer ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Tax document number, unique per customer.
    pub document: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCustomerInput {
    /// Display name.
    pub name: String,
    /// Tax document number.
    pub document: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
}

/// Partial update of a customer. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCustomerInput {
    /// New display name.
    pub name: Option<String>,
    /// New tax document number.
    pub document: Option<String>,
    /// New contact email.
    pub email: Option<String>,
    /// New contact phone.
    pub phone: Option<String>,
    /// New postal address.
    pub address: Option<String>,
}

impl UpdateCustomerInput {
    /// Applies the present fields to `customer`.
    pub fn apply(self, customer: &mut Customer) {
        if let Some(name) = self.name {
            customer.name = name;
        }
        if let Some(document) = self.document {
            customer.document = document;
        }
        if self.email.is_some() {
            customer.email = self.email;
        }
        if self.phone.is_some() {
            customer.phone = self.phone;
        }
        if self.address.is_some() {
            customer.address = self.address;
        }
    }
}
