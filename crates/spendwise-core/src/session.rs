//! Entry form and its create/edit state machine
//!
//! ```text
//! Create ──begin_edit(R)──▶ Editing(R.id) ──begin_edit(R2)──▶ Editing(R2.id)
//!    ▲                           │
//!    └──── finish / cancel ──────┘
//! ```
//!
//! Entering `Editing` pre-fills the form from the record. Leaving it clears
//! the text and amount and puts the date back to today.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::models::{parse_calendar_date, Transaction};
use crate::sign::parse_magnitude;

const MISSING_FIELDS: &str = "Please add a text, amount, and date";

/// Which action submitting the form performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Create,
    Editing(i64),
}

/// Raw form fields, as typed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionForm {
    pub text: String,
    pub amount: String,
    /// Empty means "whatever the category picker has selected"
    pub category: String,
    pub date: String,
}

/// A form that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEntry {
    pub text: String,
    pub magnitude: Decimal,
    pub category: String,
    pub date: NaiveDate,
}

impl TransactionForm {
    /// Empty form dated today
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            date: today.to_string(),
            ..Self::default()
        }
    }

    /// Check required fields, amount and date before anything is sent
    ///
    /// `fallback_category` fills in an empty category field.
    pub fn validate(&self, today: NaiveDate, fallback_category: &str) -> Result<ValidatedEntry> {
        if self.text.trim().is_empty() || self.amount.trim().is_empty() || self.date.is_empty() {
            return Err(Error::Validation(MISSING_FIELDS.into()));
        }

        let magnitude = parse_magnitude(&self.amount)?;
        let date = parse_calendar_date(&self.date)
            .ok_or_else(|| Error::Validation(format!("Invalid date: {}", self.date)))?;
        if date > today {
            return Err(Error::Validation(format!(
                "{} is a date in the future, which is not allowed",
                date
            )));
        }

        let category = if self.category.trim().is_empty() {
            fallback_category.to_string()
        } else {
            self.category.clone()
        };

        Ok(ValidatedEntry {
            text: self.text.clone(),
            magnitude,
            category,
            date,
        })
    }
}

#[derive(Debug, Clone)]
pub struct EditSession {
    mode: EditMode,
    form: TransactionForm,
    today: NaiveDate,
}

impl EditSession {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            mode: EditMode::Create,
            form: TransactionForm::blank(today),
            today,
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// The record being edited, if any
    pub fn target(&self) -> Option<i64> {
        match self.mode {
            EditMode::Create => None,
            EditMode::Editing(id) => Some(id),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.target().is_some()
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn form(&self) -> &TransactionForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut TransactionForm {
        &mut self.form
    }

    /// Switch to (or re-target) edit mode and pre-fill from `record`
    ///
    /// The amount is shown as a magnitude; the sign is re-derived on submit.
    pub fn begin_edit(&mut self, record: &Transaction) {
        self.form.text = record.text.clone();
        self.form.amount = record.amount.abs().to_string();
        self.form.category = record.category_label().to_string();
        if let Some(date) = record.calendar_date() {
            self.form.date = date.to_string();
        }
        self.mode = EditMode::Editing(record.id);
    }

    /// After a successful submit: back to create mode with a fresh form
    ///
    /// The category choice survives, like a select box keeping its value.
    pub fn finish(&mut self) {
        self.mode = EditMode::Create;
        self.form.text.clear();
        self.form.amount.clear();
        self.form.date = self.today.to_string();
    }

    /// Abandon an edit without submitting
    pub fn cancel(&mut self) {
        self.finish();
    }

    /// Label of the submit button
    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            EditMode::Create => "Add transaction",
            EditMode::Editing(_) => "Update transaction",
        }
    }
}
