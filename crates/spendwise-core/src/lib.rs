//! Spendwise Core Library
//!
//! Client engine for a personal income and expense tracker whose data lives
//! on a remote server:
//! - Remote store abstraction with HTTP and in-memory backends
//! - Category registry with offline defaults
//! - Sign policy (expenses stored negative, income positive)
//! - Month filtering, totals and per-category breakdowns
//! - Create/edit session and two-phase confirmation for destructive actions
//! - CSV export of the month view
//! - Layered configuration (embedded defaults, file, environment)

pub mod aggregate;
pub mod categories;
pub mod config;
pub mod confirm;
pub mod error;
pub mod export;
pub mod filter;
pub mod models;
pub mod remote;
pub mod session;
pub mod sign;
pub mod store;
pub mod tracker;

/// Test utilities including mock tracker API server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use aggregate::{CategoryBreakdown, ChartSegment, Totals};
pub use categories::{CategoryRegistry, FALLBACK_COLOR};
pub use config::Config;
pub use confirm::{ConfirmationGate, DestructiveAction, PendingToken};
pub use error::{Error, Result};
pub use filter::Period;
pub use models::{Category, CategoryType, NewCategory, Transaction, TransactionPayload, User};
pub use remote::{HttpRemote, MockRemote, RemoteClient, RemoteStore};
pub use session::{EditMode, EditSession, TransactionForm};
pub use store::TransactionStore;
pub use tracker::{ConfirmedOutcome, SubmitOutcome, Tracker, ViewState};
