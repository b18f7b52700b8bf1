//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Spendwise - Track income and expenses against your tracker server
#[derive(Parser)]
#[command(name = "spendwise")]
#[command(about = "Personal income and expense tracker client", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to ~/.local/share/spendwise/config.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Month to work on (YYYY-MM, defaults to the current month)
    #[arg(short, long, global = true)]
    pub month: Option<String>,

    /// Print summary, list and chart output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show balance, income and expense for the month
    Summary,

    /// List the month's transactions
    List,

    /// Show spending per category for the month
    Chart,

    /// Add a transaction
    Add {
        /// Description
        #[arg(short, long)]
        text: String,

        /// Amount as a positive number; the category decides the sign
        #[arg(short, long, allow_hyphen_values = true)]
        amount: String,

        /// Category name (defaults to the first category)
        #[arg(short, long)]
        category: Option<String>,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Edit a transaction; omitted fields keep their current value
    Edit {
        /// Transaction ID
        id: i64,

        #[arg(short, long)]
        text: Option<String>,

        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        /// Date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: i64,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Delete ALL of your transactions
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Manage categories (list, add, remove)
    Categories {
        #[command(subcommand)]
        action: Option<CategoriesAction>,
    },

    /// Export the month to a CSV spreadsheet
    Export {
        /// Output file (defaults to Expense_Tracker_YYYY-MM.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show who you are logged in as
    Whoami,
}

#[derive(Subcommand)]
pub enum CategoriesAction {
    /// List all categories
    List,

    /// Add a category of your own
    Add {
        /// Category name
        name: String,

        /// Category type: expense or income
        #[arg(short = 't', long = "type", default_value = "expense")]
        category_type: String,
    },

    /// Remove one of your categories (transactions keep the label)
    Remove {
        /// Category ID
        id: i64,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}
