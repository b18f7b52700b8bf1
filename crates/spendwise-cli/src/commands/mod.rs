//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (open_tracker, confirmation prompt) and whoami
//! - `categories` - Category commands (list, add, remove)
//! - `export` - CSV export of the month
//! - `reports` - Summary and chart commands
//! - `transactions` - Transaction commands (list, add, edit, delete, clear)

pub mod categories;
pub mod core;
pub mod export;
pub mod reports;
pub mod transactions;

// Re-export command functions for main.rs
pub use categories::*;
pub use core::*;
pub use export::*;
pub use reports::*;
pub use transactions::*;

use rust_decimal::Decimal;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Signed amount with color: red `-₹12.50` for expenses, green `+₹3000.00` for income
pub fn format_amount(amount: Decimal, currency: &str) -> String {
    if amount.is_sign_negative() && !amount.is_zero() {
        format!("\x1b[31m-{}{:.2}\x1b[0m", currency, amount.abs()) // Red for expenses
    } else {
        format!("\x1b[32m+{}{:.2}\x1b[0m", currency, amount) // Green for income
    }
}
