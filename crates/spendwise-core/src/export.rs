//! Spreadsheet export of the month view
//!
//! One row per transaction (Date, Category, Type, Description, Amount), an
//! empty separator row, then the Total Income / Total Expense / Net Balance
//! summary rows. Written as CSV.

use std::io::Write;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::totals;
use crate::error::{Error, Result};
use crate::filter::Period;
use crate::models::Transaction;

/// One spreadsheet row; summary rows leave the transaction columns empty
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ExportRow {
    #[serde(rename = "Date")]
    pub date: Option<String>,
    #[serde(rename = "Category")]
    pub category: Option<String>,
    #[serde(rename = "Type")]
    pub kind: Option<&'static str>,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "Amount")]
    pub amount: Option<Decimal>,
}

impl ExportRow {
    fn summary(description: &str, amount: Decimal) -> Self {
        Self {
            description: Some(description.to_string()),
            amount: Some(amount),
            ..Self::default()
        }
    }
}

/// `Expense_Tracker_2024-03.csv`
pub fn default_file_name(period: &Period) -> String {
    format!("Expense_Tracker_{}.csv", period)
}

/// Build the rows for an already-filtered view
pub fn export_rows(transactions: &[&Transaction]) -> Result<Vec<ExportRow>> {
    if transactions.is_empty() {
        return Err(Error::Validation(
            "No transactions to export for this month.".into(),
        ));
    }

    let mut rows: Vec<ExportRow> = transactions
        .iter()
        .map(|tx| ExportRow {
            date: Some(
                tx.calendar_date()
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| tx.date.clone().unwrap_or_default()),
            ),
            category: tx.category.clone(),
            kind: Some(if tx.is_expense() { "Expense" } else { "Income" }),
            description: Some(tx.text.clone()),
            amount: Some(tx.amount.abs()),
        })
        .collect();

    let sums = totals(transactions.iter().copied())?;
    rows.push(ExportRow::default());
    rows.push(ExportRow::summary("Total Income", sums.income));
    rows.push(ExportRow::summary("Total Expense", sums.expense));
    rows.push(ExportRow::summary("Net Balance", sums.income - sums.expense));
    Ok(rows)
}

/// Write the view as CSV with a header row
pub fn write_csv<W: Write>(writer: W, transactions: &[&Transaction]) -> Result<usize> {
    let rows = export_rows(transactions)?;
    let mut csv = csv::Writer::from_writer(writer);
    for row in &rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(transactions.len())
}
