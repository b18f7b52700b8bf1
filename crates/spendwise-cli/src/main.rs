//! Spendwise CLI - Personal income and expense tracker
//!
//! Usage:
//!   spendwise summary                       Balance cards for the month
//!   spendwise add -t Lunch -a 12.50 -c Food  Add a transaction
//!   spendwise list --month 2024-03          List a month's transactions
//!   spendwise export                        Export the month to CSV

mod cli;
mod commands;


use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("❌ {}", commands::user_error(&err));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let (mut tracker, config) =
        commands::open_tracker(cli.config.as_deref(), cli.month.as_deref()).await?;
    let currency = config.currency_symbol.as_str();

    match cli.command {
        Commands::Summary => commands::cmd_summary(&tracker, currency, cli.json),
        Commands::List => commands::cmd_list(&tracker, currency, cli.json),
        Commands::Chart => commands::cmd_chart(&tracker, currency, cli.json),
        Commands::Add {
            text,
            amount,
            category,
            date,
        } => {
            commands::cmd_add(
                &mut tracker,
                currency,
                &text,
                &amount,
                category.as_deref(),
                date.as_deref(),
            )
            .await
        }
        Commands::Edit {
            id,
            text,
            amount,
            category,
            date,
        } => {
            commands::cmd_edit(
                &mut tracker,
                currency,
                id,
                text.as_deref(),
                amount.as_deref(),
                category.as_deref(),
                date.as_deref(),
            )
            .await
        }
        Commands::Delete { id, yes } => commands::cmd_delete(&mut tracker, id, yes).await,
        Commands::Clear { yes } => commands::cmd_clear(&mut tracker, yes).await,
        Commands::Categories { action } => match action {
            None | Some(CategoriesAction::List) => commands::cmd_categories_list(&tracker),
            Some(CategoriesAction::Add {
                name,
                category_type,
            }) => {
                let category_type: spendwise_core::CategoryType = category_type
                    .parse()
                    .map_err(|e: String| anyhow::anyhow!(e))?;
                commands::cmd_categories_add(&mut tracker, &name, category_type).await
            }
            Some(CategoriesAction::Remove { id, yes }) => {
                commands::cmd_categories_remove(&mut tracker, id, yes).await
            }
        },
        Commands::Export { output } => commands::cmd_export(&tracker, output.as_deref()),
        Commands::Whoami => commands::cmd_whoami(&tracker),
    }
}
