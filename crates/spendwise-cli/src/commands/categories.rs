//! Category command implementations

use anyhow::Result;
use spendwise_core::{CategoryType, ConfirmedOutcome, RemoteStore, Tracker};

use super::run_confirmed;

pub fn cmd_categories_list<R: RemoteStore>(tracker: &Tracker<R>) -> Result<()> {
    let registry = tracker.registry();

    if registry.is_empty() {
        println!("No categories.");
        return Ok(());
    }

    println!();
    println!("🏷️  Categories");
    println!("   ─────────────────────────────────────────────────────────────");

    for category in registry.iter() {
        let id = category
            .id
            .map(|id| format!("[{}]", id))
            .unwrap_or_else(|| "[-]".to_string());
        let owner = if category.is_user_owned() { " (yours)" } else { "" };

        println!(
            "   {:>5} {:<20} {:<8} {}{}",
            id,
            category.name,
            category.category_type,
            category.color,
            owner
        );
    }

    if registry.using_defaults() {
        println!();
        println!("   ⚠️  Server list unavailable, showing built-in defaults.");
    }

    println!();
    println!("   Use 'spendwise categories remove <id>' to delete one of yours.");

    Ok(())
}

pub async fn cmd_categories_add<R: RemoteStore>(
    tracker: &mut Tracker<R>,
    name: &str,
    category_type: CategoryType,
) -> Result<()> {
    let created = tracker.add_category(name, category_type).await?;

    println!(
        "✅ Added {} category: {} ({})",
        created.category_type, created.name, created.color
    );

    Ok(())
}

pub async fn cmd_categories_remove<R: RemoteStore>(
    tracker: &mut Tracker<R>,
    id: i64,
    yes: bool,
) -> Result<()> {
    let token = tracker.request_delete_category(id)?;

    if let Some(ConfirmedOutcome::CategoryDeleted { name, .. }) =
        run_confirmed(tracker, token, yes).await?
    {
        println!("✅ Deleted category: {}", name);
        println!("   Transactions using it keep the label.");
    }

    Ok(())
}
