//! Balance totals and per-category breakdowns over a set of transactions

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::categories::CategoryRegistry;
use crate::error::{Error, Result};
use crate::models::Transaction;

const OVERFLOW_MESSAGE: &str = "Amounts for this month are too large to add up.";

fn checked_sum(total: Decimal, amount: Decimal) -> Result<Decimal> {
    total
        .checked_add(amount)
        .ok_or_else(|| Error::Validation(OVERFLOW_MESSAGE.into()))
}

/// Balance, income and expense for a set of transactions
///
/// `expense` is a magnitude; `balance` is `income - expense`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub balance: Decimal,
    pub income: Decimal,
    pub expense: Decimal,
}

impl Totals {
    /// Display strings for the balance cards: `₹2987.50`, `+₹3000.00`, `-₹12.50`
    pub fn display(&self, currency: &str) -> (String, String, String) {
        (
            format!("{}{:.2}", currency, self.balance),
            format!("+{}{:.2}", currency, self.income),
            format!("-{}{:.2}", currency, self.expense),
        )
    }
}

/// Round to cents, halves away from zero
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Sum a set of transactions; fails instead of overflowing
pub fn totals<'a, I>(transactions: I) -> Result<Totals>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut income = Decimal::ZERO;
    let mut spent = Decimal::ZERO;
    let mut balance = Decimal::ZERO;

    for tx in transactions {
        balance = checked_sum(balance, tx.amount)?;
        if tx.amount > Decimal::ZERO {
            income = checked_sum(income, tx.amount)?;
        } else if tx.amount < Decimal::ZERO {
            spent = checked_sum(spent, tx.amount)?;
        }
    }

    Ok(Totals {
        balance: round_cents(balance),
        income: round_cents(income),
        expense: round_cents(spent.abs()),
    })
}

/// Per-category magnitudes in order of first appearance
///
/// The order is the chart segment order, so it is kept alongside the map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryBreakdown {
    order: Vec<String>,
    totals: HashMap<String, Decimal>,
}

impl CategoryBreakdown {
    pub fn add(&mut self, label: &str, magnitude: Decimal) -> Result<()> {
        match self.totals.get_mut(label) {
            Some(total) => *total = checked_sum(*total, magnitude)?,
            None => {
                self.order.push(label.to_string());
                self.totals.insert(label.to_string(), magnitude);
            }
        }
        Ok(())
    }

    pub fn get(&self, label: &str) -> Option<Decimal> {
        self.totals.get(label).copied()
    }

    pub fn labels(&self) -> &[String] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> + '_ {
        self.order
            .iter()
            .map(move |label| (label.as_str(), self.totals[label]))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Group by the stored category label, summing absolute amounts
///
/// Labels are not checked against the registry, so deleted categories still
/// get their own bucket. Unlabeled transactions go to "Other".
pub fn by_category<'a, I>(transactions: I) -> Result<CategoryBreakdown>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut breakdown = CategoryBreakdown::default();
    for tx in transactions {
        breakdown.add(tx.category_label(), tx.amount.abs())?;
    }
    Ok(breakdown)
}

/// One doughnut chart segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSegment {
    pub label: String,
    pub total: Decimal,
    pub color: String,
}

/// Attach display colors from the live registry (gray for unknown labels)
pub fn chart_segments(
    breakdown: &CategoryBreakdown,
    registry: &CategoryRegistry,
) -> Vec<ChartSegment> {
    breakdown
        .iter()
        .map(|(label, total)| ChartSegment {
            label: label.to_string(),
            total,
            color: registry.resolve(label).color,
        })
        .collect()
}
