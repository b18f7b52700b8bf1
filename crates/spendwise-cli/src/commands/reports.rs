//! Report command implementations (summary, chart)

use anyhow::Result;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use spendwise_core::{RemoteStore, Tracker};

use super::truncate;

const BAR_WIDTH: usize = 30;

pub fn cmd_summary<R: RemoteStore>(tracker: &Tracker<R>, currency: &str, json: bool) -> Result<()> {
    let view = tracker.view()?;

    if json {
        let summary = serde_json::json!({
            "period": view.period,
            "balance": view.totals.balance,
            "income": view.totals.income,
            "expense": view.totals.expense,
            "count": view.transactions.len(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let (balance, income, expense) = view.totals.display(currency);

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│         💰 Spendwise {}            │", view.period);
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Balance:       {}", balance);
    println!("  Income:        \x1b[32m{}\x1b[0m", income);
    println!("  Expense:       \x1b[31m{}\x1b[0m", expense);
    println!("  Transactions:  {}", view.transactions.len());

    if tracker.registry().using_defaults() {
        println!();
        println!("  ⚠️  Using built-in categories (server list unavailable)");
    }

    println!();
    Ok(())
}

/// Per-category bars in the order categories first appear
pub fn cmd_chart<R: RemoteStore>(tracker: &Tracker<R>, currency: &str, json: bool) -> Result<()> {
    let view = tracker.view()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view.segments)?);
        return Ok(());
    }

    if view.segments.is_empty() {
        println!("No transactions for {}.", view.period);
        return Ok(());
    }

    let grand_total = view
        .segments
        .iter()
        .try_fold(Decimal::ZERO, |acc, s| acc.checked_add(s.total))
        .ok_or_else(|| anyhow::anyhow!("Category totals are too large to chart"))?;

    println!();
    println!("📊 By Category for {}", view.period);
    println!("   ─────────────────────────────────────────────────────────────");

    for segment in &view.segments {
        let share = if grand_total.is_zero() {
            0.0
        } else {
            (segment.total / grand_total).to_f64().unwrap_or(0.0)
        };
        let filled = (share * BAR_WIDTH as f64).round() as usize;
        let bar = "█".repeat(filled);

        println!(
            "   {:<14} {:<width$} {:>5.1}% {}{:.2}  {}",
            truncate(&segment.label, 14),
            bar,
            share * 100.0,
            currency,
            segment.total,
            segment.color,
            width = BAR_WIDTH
        );
    }

    println!();
    Ok(())
}
