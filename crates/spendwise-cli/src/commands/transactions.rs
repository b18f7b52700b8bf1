//! Transaction command implementations

use anyhow::Result;
use spendwise_core::{ConfirmedOutcome, RemoteStore, SubmitOutcome, Tracker};

use super::{format_amount, run_confirmed, truncate};

pub fn cmd_list<R: RemoteStore>(tracker: &Tracker<R>, currency: &str, json: bool) -> Result<()> {
    let view = tracker.view()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view.transactions)?);
        return Ok(());
    }

    if view.transactions.is_empty() {
        println!("No transactions for {}. Add one with:", view.period);
        println!("  spendwise add --text Lunch --amount 12.50 --category Food");
        return Ok(());
    }

    println!();
    println!("📝 Transactions for {}", view.period);
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in &view.transactions {
        let date = tx
            .calendar_date()
            .map(|d| d.to_string())
            .unwrap_or_else(|| "----------".to_string());

        println!(
            "   [{}] {} │ {:>12} │ {:<14} │ {}",
            tx.id,
            date,
            format_amount(tx.amount, currency),
            truncate(tx.category_label(), 14),
            truncate(&tx.text, 35)
        );
    }

    Ok(())
}

pub async fn cmd_add<R: RemoteStore>(
    tracker: &mut Tracker<R>,
    currency: &str,
    text: &str,
    amount: &str,
    category: Option<&str>,
    date: Option<&str>,
) -> Result<()> {
    let form = tracker.form_mut();
    form.text = text.to_string();
    form.amount = amount.to_string();
    if let Some(category) = category {
        form.category = category.to_string();
    }
    if let Some(date) = date {
        form.date = date.to_string();
    }

    let outcome = tracker.submit().await?;
    print_submitted(&outcome, currency);
    Ok(())
}

/// Pre-fill from the stored record and overwrite only the given fields
pub async fn cmd_edit<R: RemoteStore>(
    tracker: &mut Tracker<R>,
    currency: &str,
    id: i64,
    text: Option<&str>,
    amount: Option<&str>,
    category: Option<&str>,
    date: Option<&str>,
) -> Result<()> {
    tracker
        .begin_edit(id)
        .map_err(|_| anyhow::anyhow!("Transaction {} not found", id))?;

    let form = tracker.form_mut();
    if let Some(text) = text {
        form.text = text.to_string();
    }
    if let Some(amount) = amount {
        form.amount = amount.to_string();
    }
    if let Some(category) = category {
        form.category = category.to_string();
    }
    if let Some(date) = date {
        form.date = date.to_string();
    }

    let outcome = tracker.submit().await?;
    print_submitted(&outcome, currency);
    Ok(())
}

pub async fn cmd_delete<R: RemoteStore>(tracker: &mut Tracker<R>, id: i64, yes: bool) -> Result<()> {
    // Verify transaction exists
    let tx = tracker
        .store()
        .get(id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Transaction {} not found", id))?;

    let token = tracker.request_delete(id);
    if let Some(ConfirmedOutcome::TransactionDeleted(_)) = run_confirmed(tracker, token, yes).await? {
        println!("✅ Deleted transaction {}: {}", id, truncate(&tx.text, 40));
    }

    Ok(())
}

pub async fn cmd_clear<R: RemoteStore>(tracker: &mut Tracker<R>, yes: bool) -> Result<()> {
    let count = tracker.store().len();
    if count == 0 {
        println!("No transactions to clear.");
        return Ok(());
    }

    let token = tracker.request_clear_all();
    if let Some(ConfirmedOutcome::HistoryCleared) = run_confirmed(tracker, token, yes).await? {
        println!("✅ Cleared {} transactions.", count);
    }

    Ok(())
}

fn print_submitted(outcome: &SubmitOutcome, currency: &str) {
    let tx = outcome.record();
    let verb = match outcome {
        SubmitOutcome::Created { .. } => "Added",
        SubmitOutcome::Updated(_) => "Updated",
    };

    println!("✅ {} transaction {}:", verb, tx.id);
    println!(
        "   {} │ {} │ {} │ {}",
        tx.calendar_date().map(|d| d.to_string()).unwrap_or_default(),
        format_amount(tx.amount, currency),
        tx.category_label(),
        truncate(&tx.text, 40)
    );

    if let Some(notice) = outcome.notice() {
        println!();
        println!("   {}", notice);
    }
}
