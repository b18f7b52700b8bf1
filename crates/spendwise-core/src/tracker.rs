//! The tracker: owns every piece of client state and runs the user actions
//!
//! Startup order matters: the user gate first, then categories (so labels
//! resolve), then transactions. After any mutation or period change the
//! caller re-reads [`Tracker::view`], which re-filters and re-aggregates.

use std::io::Write;

use chrono::{Local, NaiveDate};
use tracing::info;

use crate::aggregate::{by_category, chart_segments, totals, CategoryBreakdown, ChartSegment, Totals};
use crate::categories::CategoryRegistry;
use crate::confirm::{ConfirmationGate, DestructiveAction, PendingToken};
use crate::error::{Error, Result};
use crate::export::write_csv;
use crate::filter::{select_period, Period};
use crate::models::{Category, CategoryType, Transaction, User, OTHER_CATEGORY};
use crate::remote::RemoteStore;
use crate::session::{EditSession, TransactionForm};
use crate::store::TransactionStore;

/// Shown when a new transaction lands outside the month on screen
pub const OUTSIDE_PERIOD_NOTICE: &str = "Transaction added! Switch month to view it.";

/// What a successful submit did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// `visible` is false when the record's month is not the selected one
    Created { record: Transaction, visible: bool },
    Updated(Transaction),
}

impl SubmitOutcome {
    /// Message to show instead of silently switching months
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Self::Created { visible: false, .. } => Some(OUTSIDE_PERIOD_NOTICE),
            _ => None,
        }
    }

    pub fn record(&self) -> &Transaction {
        match self {
            Self::Created { record, .. } | Self::Updated(record) => record,
        }
    }
}

/// What a confirmed destructive action did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmedOutcome {
    TransactionDeleted(i64),
    HistoryCleared,
    CategoryDeleted { id: i64, name: String },
}

/// Everything the list, balance cards and chart render from
#[derive(Debug, Clone)]
pub struct ViewState<'a> {
    pub period: Period,
    pub transactions: Vec<&'a Transaction>,
    pub totals: Totals,
    pub breakdown: CategoryBreakdown,
    pub segments: Vec<ChartSegment>,
}

pub struct Tracker<R: RemoteStore> {
    remote: R,
    registry: CategoryRegistry,
    store: TransactionStore,
    session: EditSession,
    gate: ConfirmationGate,
    period: Period,
    user: Option<User>,
}

impl<R: RemoteStore> Tracker<R> {
    /// A tracker showing the current month
    pub fn new(remote: R) -> Self {
        Self::with_today(remote, Local::now().date_naive())
    }

    /// A tracker with a fixed "today" (form defaults, future-date check)
    pub fn with_today(remote: R, today: NaiveDate) -> Self {
        Self {
            remote,
            registry: CategoryRegistry::new(),
            store: TransactionStore::new(),
            session: EditSession::new(today),
            gate: ConfirmationGate::new(),
            period: Period::of(today),
            user: None,
        }
    }

    /// Check the login, then load categories and transactions
    ///
    /// Stops at the user gate when not logged in. A category failure falls
    /// back to the built-in set; a transaction failure is returned.
    pub async fn init(&mut self) -> Result<&User> {
        let user = self.remote.current_user().await?;
        info!(user = %user.label(), endpoint = self.remote.endpoint(), "Logged in");

        self.registry.load(&self.remote).await;
        self.store.load_all(&self.remote).await?;
        Ok(self.user.insert(user))
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CategoryRegistry {
        &mut self.registry
    }

    pub fn store(&self) -> &TransactionStore {
        &self.store
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn select_period(&mut self, period: Period) {
        self.period = period;
    }

    /// Filter to the selected month and aggregate
    pub fn view(&self) -> Result<ViewState<'_>> {
        let transactions = select_period(self.store.all(), &self.period);
        let breakdown = by_category(transactions.iter().copied())?;
        let segments = chart_segments(&breakdown, &self.registry);
        Ok(ViewState {
            period: self.period,
            totals: totals(transactions.iter().copied())?,
            transactions,
            breakdown,
            segments,
        })
    }

    pub fn form_mut(&mut self) -> &mut TransactionForm {
        self.session.form_mut()
    }

    /// Enter (or re-target) edit mode for a loaded record
    pub fn begin_edit(&mut self, id: i64) -> Result<()> {
        let record = self
            .store
            .get(id)
            .ok_or_else(|| Error::NotFound(format!("transaction {}", id)))?;
        self.session.begin_edit(record);
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.session.cancel();
    }

    /// Create or update depending on the edit session
    ///
    /// Validation runs before any remote call. On success the session goes
    /// back to create mode; on failure it is left as it was.
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        let fallback = self.registry.selected().unwrap_or(OTHER_CATEGORY).to_string();
        let entry = self
            .session
            .form()
            .validate(self.session.today(), &fallback)?;

        let outcome = match self.session.target() {
            Some(id) => {
                let updated = self
                    .store
                    .update(&self.remote, &self.registry, id, &entry)
                    .await?;
                SubmitOutcome::Updated(updated)
            }
            None => {
                let record = self
                    .store
                    .create(&self.remote, &self.registry, &entry)
                    .await?
                    .clone();
                let visible = record
                    .calendar_date()
                    .is_some_and(|d| self.period.contains(d));
                SubmitOutcome::Created { record, visible }
            }
        };

        self.session.finish();
        Ok(outcome)
    }

    /// Add a user category and select it in the form
    pub async fn add_category(&mut self, name: &str, category_type: CategoryType) -> Result<Category> {
        let created = self
            .registry
            .add(&self.remote, name, category_type)
            .await?
            .clone();
        self.session.form_mut().category = created.name.clone();
        Ok(created)
    }

    pub fn request_delete(&mut self, id: i64) -> PendingToken {
        self.gate.request(DestructiveAction::DeleteTransaction(id))
    }

    pub fn request_clear_all(&mut self) -> PendingToken {
        self.gate.request(DestructiveAction::ClearAll)
    }

    /// Ask to delete one of the user's categories
    pub fn request_delete_category(&mut self, id: i64) -> Result<PendingToken> {
        let category = self
            .registry
            .find_by_id(id)
            .ok_or_else(|| Error::NotFound(format!("category {}", id)))?;
        let action = DestructiveAction::DeleteCategory {
            id,
            name: category.name.clone(),
        };
        Ok(self.gate.request(action))
    }

    pub fn pending_confirmation(&self) -> Option<&DestructiveAction> {
        self.gate.pending()
    }

    /// Run the pending action behind `token`
    pub async fn confirm(&mut self, token: PendingToken) -> Result<ConfirmedOutcome> {
        let action = self.gate.confirm(token).ok_or(Error::StaleConfirmation)?;

        match action {
            DestructiveAction::DeleteTransaction(id) => {
                self.store.delete(&self.remote, id).await?;
                Ok(ConfirmedOutcome::TransactionDeleted(id))
            }
            DestructiveAction::ClearAll => {
                self.store.clear_all(&self.remote).await?;
                Ok(ConfirmedOutcome::HistoryCleared)
            }
            DestructiveAction::DeleteCategory { id, name } => {
                self.registry.remove(&self.remote, id).await?;
                if !self.session.is_editing() && self.session.form().category == name {
                    self.session.form_mut().category.clear();
                }
                Ok(ConfirmedOutcome::CategoryDeleted { id, name })
            }
        }
    }

    /// Drop the pending action; nothing else changes
    pub fn cancel(&mut self, token: PendingToken) -> Result<()> {
        if self.gate.cancel(token) {
            Ok(())
        } else {
            Err(Error::StaleConfirmation)
        }
    }

    /// Write the selected month as CSV; returns the number of transactions
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let view = self.view()?;
        write_csv(writer, &view.transactions)
    }
}
