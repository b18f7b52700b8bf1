//! In-memory transaction collection kept in step with the remote store
//!
//! Every mutation is apply-after-confirm: the remote call goes first and the
//! local collection changes only when it succeeds. A failed call leaves the
//! collection exactly as it was.

use tracing::{debug, info};

use crate::categories::CategoryRegistry;
use crate::error::{Error, Result};
use crate::models::{Transaction, TransactionPayload};
use crate::remote::RemoteStore;
use crate::session::ValidatedEntry;
use crate::sign::compute_signed_amount;

#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
}

/// Resolve the category and apply the sign policy
///
/// Always re-derived from the live registry: a reused category name may have
/// a different type than when the record was first stored.
pub fn build_payload(registry: &CategoryRegistry, entry: &ValidatedEntry) -> TransactionPayload {
    let resolved = registry.resolve(&entry.category);
    TransactionPayload {
        text: entry.text.clone(),
        amount: compute_signed_amount(entry.magnitude, resolved.category_type),
        category: entry.category.clone(),
        date: entry.date,
    }
}

fn ensure_text(entry: &ValidatedEntry) -> Result<()> {
    if entry.text.trim().is_empty() {
        return Err(Error::Validation(
            "Please add a text, amount, and date".into(),
        ));
    }
    Ok(())
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// Replace the whole collection with the remote's list
    ///
    /// Categories should be loaded first so labels resolve when rendering.
    pub async fn load_all<R: RemoteStore + ?Sized>(&mut self, remote: &R) -> Result<()> {
        let transactions = remote.list_transactions().await?;
        debug!(count = transactions.len(), "Loaded transactions");
        self.transactions = transactions;
        Ok(())
    }

    /// Create a transaction and append the remote's canonical record
    pub async fn create<R: RemoteStore + ?Sized>(
        &mut self,
        remote: &R,
        registry: &CategoryRegistry,
        entry: &ValidatedEntry,
    ) -> Result<&Transaction> {
        ensure_text(entry)?;
        let payload = build_payload(registry, entry);
        let created = remote.create_transaction(&payload).await?;

        info!(id = created.id, amount = %created.amount, "Created transaction");
        self.transactions.push(created);
        self.transactions
            .last()
            .ok_or_else(|| Error::NotFound("created transaction".into()))
    }

    /// Update `id` and swap the remote's response in at the same position
    pub async fn update<R: RemoteStore + ?Sized>(
        &mut self,
        remote: &R,
        registry: &CategoryRegistry,
        id: i64,
        entry: &ValidatedEntry,
    ) -> Result<Transaction> {
        ensure_text(entry)?;
        let payload = build_payload(registry, entry);
        let updated = remote.update_transaction(id, &payload).await?;

        info!(id, amount = %updated.amount, "Updated transaction");
        for tx in self.transactions.iter_mut().filter(|tx| tx.id == id) {
            *tx = updated.clone();
        }
        Ok(updated)
    }

    /// Delete `id`; the caller has already confirmed with the user
    pub async fn delete<R: RemoteStore + ?Sized>(&mut self, remote: &R, id: i64) -> Result<()> {
        remote.delete_transaction(id).await?;
        self.transactions.retain(|tx| tx.id != id);
        info!(id, "Deleted transaction");
        Ok(())
    }

    /// Delete every transaction the user owns; already confirmed
    pub async fn clear_all<R: RemoteStore + ?Sized>(&mut self, remote: &R) -> Result<()> {
        remote.clear_transactions().await?;
        let removed = self.transactions.len();
        self.transactions.clear();
        info!(removed, "Cleared transaction history");
        Ok(())
    }

    pub fn get(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.id == id)
    }

    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryType};
    use crate::remote::MockRemote;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn registry() -> CategoryRegistry {
        CategoryRegistry::with_categories(vec![
            Category::builtin("Food", "#e74c3c", CategoryType::Expense),
            Category::builtin("Income", "#27ae60", CategoryType::Income),
        ])
    }

    fn entry(text: &str, magnitude: &str, category: &str, date: &str) -> ValidatedEntry {
        ValidatedEntry {
            text: text.to_string(),
            magnitude: dec(magnitude),
            category: category.to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_applies_sign_policy() {
        let remote = MockRemote::new();
        let registry = registry();
        let mut store = TransactionStore::new();

        let lunch = store
            .create(&remote, &registry, &entry("Lunch", "12.50", "Food", "2024-03-05"))
            .await
            .unwrap()
            .clone();
        assert_eq!(lunch.amount, dec("-12.50"));

        let salary = store
            .create(&remote, &registry, &entry("Salary", "3000", "Income", "2024-03-01"))
            .await
            .unwrap()
            .clone();
        assert_eq!(salary.amount, dec("3000"));
        assert_ne!(lunch.id, salary.id);

        // appended in creation order, and the returned record is the stored one
        let ids: Vec<i64> = store.all().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![lunch.id, salary.id]);
        assert_eq!(store.all().last(), Some(&salary));
        assert_eq!(store.get(lunch.id), Some(&lunch));
    }

    #[tokio::test]
    async fn test_unknown_category_is_stored_as_expense() {
        let remote = MockRemote::new();
        let mut store = TransactionStore::new();
        let created = store
            .create(&remote, &registry(), &entry("Toy", "5", "Gone", "2024-03-05"))
            .await
            .unwrap();
        assert_eq!(created.amount, dec("-5"));
        assert_eq!(created.category.as_deref(), Some("Gone"));
    }

    #[tokio::test]
    async fn test_create_then_load_round_trip() {
        let remote = MockRemote::new();
        let registry = registry();
        let mut store = TransactionStore::new();
        let submitted = entry("Lunch", "12.50", "Food", "2024-03-05");
        store.create(&remote, &registry, &submitted).await.unwrap();

        let mut fresh = TransactionStore::new();
        fresh.load_all(&remote).await.unwrap();
        assert_eq!(fresh.len(), 1);

        let stored = &fresh.all()[0];
        assert_eq!(
            stored.to_payload(),
            Some(build_payload(&registry, &submitted))
        );
    }

    #[tokio::test]
    async fn test_update_flips_sign_and_keeps_position() {
        let remote = MockRemote::new();
        let registry = registry();
        let mut store = TransactionStore::new();
        for (text, date) in [("a", "2024-03-01"), ("b", "2024-03-02"), ("c", "2024-03-03")] {
            store
                .create(&remote, &registry, &entry(text, "50", "Food", date))
                .await
                .unwrap();
        }
        let target = store.all()[1].id;
        assert_eq!(store.all()[1].amount, dec("-50"));

        let updated = store
            .update(&remote, &registry, target, &entry("b", "50", "Income", "2024-03-02"))
            .await
            .unwrap();
        assert_eq!(updated.amount, dec("50"));
        assert_eq!(store.all()[1].id, target);
        assert_eq!(store.all()[1].amount, dec("50"));
        assert_eq!(store.all()[1].category.as_deref(), Some("Income"));
    }

    #[tokio::test]
    async fn test_failures_leave_collection_unchanged() {
        let remote = MockRemote::new();
        let registry = registry();
        let mut store = TransactionStore::new();
        store
            .create(&remote, &registry, &entry("Lunch", "12.50", "Food", "2024-03-05"))
            .await
            .unwrap();
        let before = store.all().to_vec();
        let id = before[0].id;

        remote.set_offline(true);
        assert!(store
            .create(&remote, &registry, &entry("x", "1", "Food", "2024-03-05"))
            .await
            .is_err());
        assert!(store
            .update(&remote, &registry, id, &entry("x", "1", "Income", "2024-03-05"))
            .await
            .is_err());
        assert!(store.delete(&remote, id).await.is_err());
        assert!(store.clear_all(&remote).await.is_err());
        assert!(store.load_all(&remote).await.is_err());

        assert_eq!(store.all(), before.as_slice());
    }

    #[tokio::test]
    async fn test_delete_missing_id_keeps_state() {
        let remote = MockRemote::new();
        let mut store = TransactionStore::new();
        store
            .create(&remote, &registry(), &entry("Lunch", "1", "Food", "2024-03-05"))
            .await
            .unwrap();

        let err = store.delete(&remote, 999).await.unwrap_err();
        assert!(matches!(err, Error::NotFoundOrUnauthorized(_)));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_and_clear() {
        let remote = MockRemote::new();
        let registry = registry();
        let mut store = TransactionStore::new();
        let first = store
            .create(&remote, &registry, &entry("a", "1", "Food", "2024-03-05"))
            .await
            .unwrap()
            .id;
        store
            .create(&remote, &registry, &entry("b", "2", "Food", "2024-03-06"))
            .await
            .unwrap();

        store.delete(&remote, first).await.unwrap();
        assert!(store.get(first).is_none());
        assert_eq!(store.len(), 1);

        store.clear_all(&remote).await.unwrap();
        assert!(store.is_empty());
        assert!(remote.transactions().is_empty());
    }

    #[tokio::test]
    async fn test_blank_text_never_reaches_remote() {
        let remote = MockRemote::new();
        let mut store = TransactionStore::new();
        let err = store
            .create(&remote, &registry(), &entry("  ", "1", "Food", "2024-03-05"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(remote.request_count(), 0);
    }
}
