//! Budget data types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A priced line on a budget, referencing either a product or an additional item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLine {
    /// Referenced product or additional item.
    pub item_id: Uuid,
    /// Price of one unit.
    pub unit_price: Decimal,
    /// Number of units, always positive.
    pub quantity: i32,
    /// Discount rate in `[0, 1]`.
    pub discount: Decimal,
    /// Computed line total.
    pub total_price: Decimal,
}

/// A stored budget (customer quote).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Budget ID.
    pub id: Uuid,
    /// Human-readable unique code.
    pub code: String,
    /// Customer the quote is for.
    pub customer_id: Uuid,
    /// Salesman responsible for the quote.
    pub salesman_id: Uuid,
    /// Optional description.
    pub description: Option<String>,
    /// Product lines, never empty.
    pub products: Vec<BudgetLine>,
    /// Additional item lines.
    pub additional_items: Vec<BudgetLine>,
    /// Sum of all line totals.
    pub total_value: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A line item as submitted by a caller, before pricing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBudgetLineInput {
    /// Referenced product or additional item.
    pub item_id: Uuid,
    /// Price of one unit.
    pub unit_price: Decimal,
    /// Number of units.
    pub quantity: i32,
    /// Discount rate.
    pub discount: Decimal,
}

/// Input for creating a budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBudgetInput {
    /// Budget code, must be unique.
    pub code: String,
    /// Customer reference.
    pub customer_id: Option<Uuid>,
    /// Salesman reference.
    pub salesman_id: Option<Uuid>,
    /// Optional description.
    pub description: Option<String>,
    /// Product lines.
    pub products: Vec<CreateBudgetLineInput>,
    /// Additional item lines, absent means none.
    pub additional_items: Option<Vec<CreateBudgetLineInput>>,
}

/// A validated and priced budget ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBudget {
    /// Budget code.
    pub code: String,
    /// Customer reference.
    pub customer_id: Uuid,
    /// Salesman reference.
    pub salesman_id: Uuid,
    /// Optional description.
    pub description: Option<String>,
    /// Priced product lines.
    pub products: Vec<BudgetLine>,
    /// Priced additional item lines.
    pub additional_items: Vec<BudgetLine>,
}

impl CreateBudgetLineInput {
    /// Builds the stored line with its computed total.
    #[must_use]
    pub fn priced(&self) -> BudgetLine {
        BudgetLine {
            item_id: self.item_id,
            unit_price: self.unit_price,
            quantity: self.quantity,
            discount: self.discount,
            total_price: crate::pricing::calculate_product_total_price(
                self.unit_price,
                self.quantity,
                self.discount,
            ),
        }
    }
}
