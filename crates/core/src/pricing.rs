//! Line-item and budget pricing.
//!
//! Discounts are fractional rates in `[0, 1]` applied multiplicatively:
//! `total_price = unit_price * quantity * (1 - discount)`, rounded to two
//! decimal places with Banker's Rounding.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::budget::Budget;

/// Decimal places kept on computed line totals.
pub const PRICE_SCALE: u32 = 2;

/// Decimal places stored for unit prices and discounts.
pub const STORED_SCALE: u32 = 4;

/// Exclusive upper bound of any stored amount (`10^15`).
pub const AMOUNT_LIMIT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Reasons a line item cannot be priced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// Unit price is below zero.
    #[error("unit price cannot be negative")]
    NegativeUnitPrice,

    /// Quantity is zero or negative.
    #[error("quantity must be greater than zero")]
    NonPositiveQuantity,

    /// Discount is outside `[0, 1]`.
    #[error("discount must be a rate between 0 and 1, got {0}")]
    DiscountOutOfRange(Decimal),

    /// Unit price has more decimal places than can be stored.
    #[error("unit price cannot have more than 4 decimal places, got {0}")]
    UnitPricePrecision(Decimal),

    /// Discount has more decimal places than can be stored.
    #[error("discount cannot have more than 4 decimal places, got {0}")]
    DiscountPrecision(Decimal),

    /// `unit_price * quantity` reaches [`AMOUNT_LIMIT`].
    #[error("line total is too large")]
    Overflow,
}

/// Returns true if `value` can be stored as a money amount.
#[must_use]
pub fn within_amount_limit(value: Decimal) -> bool {
    value.abs() < AMOUNT_LIMIT
}

fn exceeds_stored_scale(value: Decimal) -> bool {
    value.normalize().scale() > STORED_SCALE
}

/// Checks that a line item can be priced.
///
/// # Errors
///
/// Returns the first `PricingError` found, checking unit price, quantity,
/// discount, decimal places and the size of the gross amount in that order.
pub fn validate_line_item(
    unit_price: Decimal,
    quantity: i32,
    discount: Decimal,
) -> Result<(), PricingError> {
    if unit_price < Decimal::ZERO {
        return Err(PricingError::NegativeUnitPrice);
    }
    if quantity <= 0 {
        return Err(PricingError::NonPositiveQuantity);
    }
    if discount < Decimal::ZERO || discount > Decimal::ONE {
        return Err(PricingError::DiscountOutOfRange(discount));
    }
    if exceeds_stored_scale(unit_price) {
        return Err(PricingError::UnitPricePrecision(unit_price));
    }
    if exceeds_stored_scale(discount) {
        return Err(PricingError::DiscountPrecision(discount));
    }

    let gross = unit_price
        .checked_mul(Decimal::from(quantity))
        .ok_or(PricingError::Overflow)?;
    if !within_amount_limit(gross) {
        return Err(PricingError::Overflow);
    }

    Ok(())
}

/// Computes the total price of a single line item.
///
/// Inputs are expected to have passed [`validate_line_item`].
#[must_use]
pub fn calculate_product_total_price(unit_price: Decimal, quantity: i32, discount: Decimal) -> Decimal {
    let gross = unit_price * Decimal::from(quantity);
    let net = gross * (Decimal::ONE - discount);

    net.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// Sums the line totals of every product and additional item on a budget.
#[must_use]
pub fn calculate_total_value(budget: &Budget) -> Decimal {
    budget
        .products
        .iter()
        .chain(&budget.additional_items)
        .map(|line| line.total_price)
        .sum()
}
