//! Signed amount policy
//!
//! The user always types a magnitude; the category type decides the sign.
//! Expenses are stored negative, income positive.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::models::CategoryType;

/// Largest magnitude the form accepts, a trillion. Keeps month sums far
/// from the `Decimal` range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Derive the stored amount from a magnitude and the category type
pub fn compute_signed_amount(magnitude: Decimal, category_type: CategoryType) -> Decimal {
    let magnitude = magnitude.abs();
    match category_type {
        // no negative zero
        CategoryType::Expense if !magnitude.is_zero() => -magnitude,
        _ => magnitude,
    }
}

/// Parse the amount field of the entry form
///
/// A leading sign is tolerated since the policy takes the absolute value,
/// but the text must be a plain decimal number.
pub fn parse_magnitude(input: &str) -> Result<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation("Please add a text, amount, and date".into()));
    }
    let amount = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| Error::Validation(format!("Invalid amount: {}", trimmed)))?;
    if amount.abs() > MAX_AMOUNT {
        return Err(Error::Validation("Amount is too large".into()));
    }
    Ok(amount)
}
