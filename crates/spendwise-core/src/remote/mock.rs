//! In-memory remote store
//!
//! Behaves like the tracker server for one logged-in user: system categories
//! are shared, user rows are scoped by owner, ids are assigned on insert, and
//! missing or foreign rows answer "not found or not authorized".
//! Clones share state so a test can inspect what the engine did.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::categories::default_categories;
use crate::error::{Error, Result};
use crate::models::{Category, NewCategory, Transaction, TransactionPayload, User};

use super::RemoteStore;

/// Id of the user the mock considers logged in
pub const MOCK_USER_ID: i64 = 1;

#[derive(Debug)]
struct StoredTransaction {
    owner: i64,
    record: Transaction,
}

#[derive(Debug)]
struct MockState {
    user: Option<User>,
    offline: bool,
    categories: Vec<Category>,
    transactions: Vec<StoredTransaction>,
    next_category_id: i64,
    next_transaction_id: i64,
    requests: usize,
}

/// Mock remote store for testing
#[derive(Clone)]
pub struct MockRemote {
    state: Arc<Mutex<MockState>>,
}

impl Default for MockRemote {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRemote {
    /// Logged in, online, seeded with the system categories
    pub fn new() -> Self {
        let categories: Vec<Category> = default_categories()
            .into_iter()
            .enumerate()
            .map(|(i, mut c)| {
                c.id = Some(i as i64 + 1);
                c
            })
            .collect();
        let next_category_id = categories.len() as i64 + 1;

        Self {
            state: Arc::new(Mutex::new(MockState {
                user: Some(User {
                    id: MOCK_USER_ID,
                    display_name: Some("Test User".to_string()),
                    email: Some("test@example.com".to_string()),
                    avatar: None,
                }),
                offline: false,
                categories,
                transactions: Vec::new(),
                next_category_id,
                next_transaction_id: 1,
                requests: 0,
            })),
        }
    }

    /// A mock with nobody logged in
    pub fn unauthenticated() -> Self {
        let mock = Self::new();
        mock.inspect().user = None;
        mock
    }

    /// Make every request fail as if the server were unreachable
    pub fn set_offline(&self, offline: bool) {
        self.inspect().offline = offline;
    }

    /// Insert a transaction for the logged-in user without going through the API
    pub fn seed_transaction(&self, payload: &TransactionPayload) -> Transaction {
        let mut state = self.inspect();
        insert_transaction(&mut state, MOCK_USER_ID, payload)
    }

    /// Insert a transaction that belongs to someone else
    pub fn seed_foreign_transaction(&self, payload: &TransactionPayload) -> Transaction {
        let mut state = self.inspect();
        insert_transaction(&mut state, MOCK_USER_ID + 1, payload)
    }

    /// Insert a row exactly as given (malformed dates, missing labels)
    pub fn seed_raw_transaction(&self, record: Transaction) {
        let mut state = self.inspect();
        state.next_transaction_id = state.next_transaction_id.max(record.id + 1);
        state.transactions.push(StoredTransaction {
            owner: MOCK_USER_ID,
            record,
        });
    }

    /// The logged-in user's transactions as the server would list them
    pub fn transactions(&self) -> Vec<Transaction> {
        sorted_for(&self.inspect(), MOCK_USER_ID)
    }

    pub fn categories(&self) -> Vec<Category> {
        self.inspect().categories.clone()
    }

    /// How many API calls were attempted
    pub fn request_count(&self) -> usize {
        self.inspect().requests
    }

    // Test-side access never fails on a poisoned lock
    fn inspect(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Lock for an API call: counts the request, then checks reachability and auth
    fn begin(&self) -> Result<(MutexGuard<'_, MockState>, i64)> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| Error::Unavailable("mock state lock poisoned".into()))?;
        state.requests += 1;
        if state.offline {
            return Err(Error::Unavailable("mock remote is offline".into()));
        }
        let user_id = state.user.as_ref().map(|u| u.id).ok_or(Error::Unauthenticated)?;
        Ok((state, user_id))
    }
}

fn insert_transaction(
    state: &mut MockState,
    owner: i64,
    payload: &TransactionPayload,
) -> Transaction {
    let record = Transaction {
        id: state.next_transaction_id,
        text: payload.text.clone(),
        amount: payload.amount,
        category: Some(payload.category.clone()),
        date: Some(payload.date.to_string()),
    };
    state.next_transaction_id += 1;
    state.transactions.push(StoredTransaction {
        owner,
        record: record.clone(),
    });
    record
}

/// Date descending, then id descending
fn sorted_for(state: &MockState, owner: i64) -> Vec<Transaction> {
    let mut rows: Vec<Transaction> = state
        .transactions
        .iter()
        .filter(|t| t.owner == owner)
        .map(|t| t.record.clone())
        .collect();
    rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    rows
}

/// Deterministic stand-in for the server's random color
fn color_for(id: i64) -> String {
    format!("#{:06x}", (id as u64).wrapping_mul(0x9E37_79B1) & 0xFF_FFFF)
}

fn not_found(id: i64) -> Error {
    Error::NotFoundOrUnauthorized(format!("id {}", id))
}

#[async_trait]
impl RemoteStore for MockRemote {
    async fn current_user(&self) -> Result<User> {
        let (state, _) = self.begin()?;
        state.user.clone().ok_or(Error::Unauthenticated)
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let (state, user_id) = self.begin()?;
        Ok(state
            .categories
            .iter()
            .filter(|c| c.owner.is_none() || c.owner == Some(user_id))
            .cloned()
            .collect())
    }

    async fn create_category(&self, category: &NewCategory) -> Result<Category> {
        let (mut state, user_id) = self.begin()?;

        let duplicate = state.categories.iter().any(|c| {
            c.name == category.name && (c.owner.is_none() || c.owner == Some(user_id))
        });
        if duplicate {
            return Err(Error::Remote {
                status: 500,
                message: "Server Error".into(),
            });
        }

        let id = state.next_category_id;
        state.next_category_id += 1;
        let created = Category {
            id: Some(id),
            name: category.name.clone(),
            color: color_for(id),
            category_type: category.category_type,
            owner: Some(user_id),
        };
        state.categories.push(created.clone());
        Ok(created)
    }

    async fn delete_category(&self, id: i64) -> Result<()> {
        let (mut state, user_id) = self.begin()?;
        let before = state.categories.len();
        state
            .categories
            .retain(|c| !(c.id == Some(id) && c.owner == Some(user_id)));
        if state.categories.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        let (state, user_id) = self.begin()?;
        Ok(sorted_for(&state, user_id))
    }

    async fn create_transaction(&self, payload: &TransactionPayload) -> Result<Transaction> {
        let (mut state, user_id) = self.begin()?;
        Ok(insert_transaction(&mut state, user_id, payload))
    }

    async fn update_transaction(
        &self,
        id: i64,
        payload: &TransactionPayload,
    ) -> Result<Transaction> {
        let (mut state, user_id) = self.begin()?;
        let stored = state
            .transactions
            .iter_mut()
            .find(|t| t.record.id == id && t.owner == user_id)
            .ok_or_else(|| not_found(id))?;

        stored.record.text = payload.text.clone();
        stored.record.amount = payload.amount;
        stored.record.category = Some(payload.category.clone());
        stored.record.date = Some(payload.date.to_string());
        Ok(stored.record.clone())
    }

    async fn delete_transaction(&self, id: i64) -> Result<()> {
        let (mut state, user_id) = self.begin()?;
        let before = state.transactions.len();
        state
            .transactions
            .retain(|t| !(t.record.id == id && t.owner == user_id));
        if state.transactions.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn clear_transactions(&self) -> Result<()> {
        let (mut state, user_id) = self.begin()?;
        state.transactions.retain(|t| t.owner != user_id);
        Ok(())
    }

    fn endpoint(&self) -> &str {
        "mock://spendwise"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn payload(text: &str, amount: i64, date: (i32, u32, u32)) -> TransactionPayload {
        TransactionPayload {
            text: text.to_string(),
            amount: Decimal::new(amount, 0),
            category: "Food".to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_list_orders_by_date_then_id_desc() {
        let mock = MockRemote::new();
        mock.seed_transaction(&payload("a", -1, (2024, 3, 1)));
        mock.seed_transaction(&payload("b", -2, (2024, 3, 5)));
        mock.seed_transaction(&payload("c", -3, (2024, 3, 1)));

        let texts: Vec<String> = mock
            .list_transactions()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(texts, vec!["b", "c", "a"]);
    }

    #[tokio::test]
    async fn test_foreign_rows_are_invisible_and_untouchable() {
        let mock = MockRemote::new();
        let foreign = mock.seed_foreign_transaction(&payload("theirs", -9, (2024, 3, 1)));

        assert!(mock.list_transactions().await.unwrap().is_empty());
        assert!(matches!(
            mock.delete_transaction(foreign.id).await,
            Err(Error::NotFoundOrUnauthorized(_))
        ));
        assert!(matches!(
            mock.update_transaction(foreign.id, &payload("mine", 1, (2024, 3, 1)))
                .await,
            Err(Error::NotFoundOrUnauthorized(_))
        ));

        // clear only touches the caller's rows
        mock.clear_transactions().await.unwrap();
        assert_eq!(mock.inspect().transactions.len(), 1);
    }

    #[tokio::test]
    async fn test_unauthenticated_and_offline() {
        let mock = MockRemote::unauthenticated();
        assert!(matches!(
            mock.current_user().await,
            Err(Error::Unauthenticated)
        ));
        assert!(matches!(
            mock.list_categories().await,
            Err(Error::Unauthenticated)
        ));

        let mock = MockRemote::new();
        mock.set_offline(true);
        assert!(matches!(
            mock.list_transactions().await,
            Err(Error::Unavailable(_))
        ));
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_category_ids_and_colors_assigned() {
        let mock = MockRemote::new();
        let created = mock
            .create_category(&NewCategory {
                name: "Pets".into(),
                category_type: crate::models::CategoryType::Expense,
            })
            .await
            .unwrap();
        assert_eq!(created.id, Some(14));
        assert_eq!(created.owner, Some(MOCK_USER_ID));
        assert_eq!(created.color.len(), 7);
    }
}
