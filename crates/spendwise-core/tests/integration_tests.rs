//! Integration tests for spendwise-core
//!
//! These tests exercise the full startup → entry → month view → export
//! workflow through the public API, against the in-memory remote.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use spendwise_core::{
    CategoryType, ConfirmedOutcome, Error, MockRemote, Period, RemoteClient, RemoteStore,
    SubmitOutcome, Tracker, Transaction, TransactionPayload,
};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
}

fn payload(text: &str, amount: &str, category: &str, date: &str) -> TransactionPayload {
    TransactionPayload {
        text: text.to_string(),
        amount: dec(amount),
        category: category.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
    }
}

async fn submit<R: RemoteStore>(
    tracker: &mut Tracker<R>,
    text: &str,
    amount: &str,
    category: &str,
    date: &str,
) -> SubmitOutcome {
    let form = tracker.form_mut();
    form.text = text.to_string();
    form.amount = amount.to_string();
    form.category = category.to_string();
    form.date = date.to_string();
    tracker.submit().await.expect("submit failed")
}

// =============================================================================
// Month Workflow
// =============================================================================

#[tokio::test]
async fn test_month_workflow() {
    let mut tracker = Tracker::with_today(RemoteClient::mock(), today());
    let user = tracker.init().await.expect("init failed").clone();
    assert_eq!(user.label(), "Test User");
    assert_eq!(tracker.registry().len(), 13);
    assert!(!tracker.registry().using_defaults());

    submit(&mut tracker, "Lunch", "12.50", "Food", "2024-03-05").await;
    submit(&mut tracker, "Salary", "3000", "Income", "2024-03-01").await;
    submit(&mut tracker, "Groceries", "40.25", "Grocery", "2024-03-07").await;
    submit(&mut tracker, "Dinner", "20", "Food", "2024-03-08").await;

    let view = tracker.view().unwrap();
    assert_eq!(view.transactions.len(), 4);
    assert_eq!(view.totals.income, dec("3000.00"));
    assert_eq!(view.totals.expense, dec("72.75"));
    assert_eq!(view.totals.balance, dec("2927.25"));

    let (balance, income, expense) = view.totals.display("₹");
    assert_eq!(balance, "₹2927.25");
    assert_eq!(income, "+₹3000.00");
    assert_eq!(expense, "-₹72.75");

    // first-appearance order, Food collects both meals
    let labels: Vec<&str> = view.segments.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Food", "Income", "Grocery"]);
    assert_eq!(view.breakdown.get("Food"), Some(dec("32.50")));

    let mut csv = Vec::new();
    assert_eq!(tracker.export_csv(&mut csv).unwrap(), 4);
    let csv = String::from_utf8(csv).unwrap();
    assert!(csv.contains("Net Balance,2927.25"));
}

#[tokio::test]
async fn test_reload_sees_same_records() {
    let remote = MockRemote::new();
    let mut first = Tracker::with_today(remote.clone(), today());
    first.init().await.unwrap();
    submit(&mut first, "Lunch", "12.50", "Food", "2024-03-05").await;
    submit(&mut first, "Salary", "3000", "Income", "2024-03-01").await;

    let mut second = Tracker::with_today(remote, today());
    second.init().await.unwrap();

    // server order: newest date first
    let texts: Vec<&str> = second.store().all().iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["Lunch", "Salary"]);
    assert_eq!(second.view().unwrap().totals, first.view().unwrap().totals);
}

#[tokio::test]
async fn test_other_users_rows_are_invisible() {
    let remote = MockRemote::new();
    remote.seed_foreign_transaction(&payload("Theirs", "-99", "Food", "2024-03-02"));
    let mine = remote.seed_transaction(&payload("Mine", "-5", "Food", "2024-03-02"));

    let mut tracker = Tracker::with_today(remote.clone(), today());
    tracker.init().await.unwrap();
    assert_eq!(tracker.store().len(), 1);
    assert_eq!(tracker.store().all()[0].id, mine.id);
    assert_eq!(tracker.view().unwrap().totals.expense, dec("5.00"));
}

#[tokio::test]
async fn test_undated_and_unlabeled_rows() {
    let remote = MockRemote::new();
    remote.seed_raw_transaction(Transaction {
        id: 40,
        text: "No date".into(),
        amount: dec("-3"),
        category: Some("Food".into()),
        date: None,
    });
    remote.seed_raw_transaction(Transaction {
        id: 41,
        text: "No label".into(),
        amount: dec("-7"),
        category: None,
        date: Some("2024-03-09T00:00:00.000Z".into()),
    });

    let mut tracker = Tracker::with_today(remote, today());
    tracker.init().await.unwrap();
    assert_eq!(tracker.store().len(), 2);

    let view = tracker.view().unwrap();
    assert_eq!(view.transactions.len(), 1);
    assert_eq!(view.breakdown.get("Other"), Some(dec("7")));
}

// =============================================================================
// Period Switching
// =============================================================================

#[tokio::test]
async fn test_period_switch_refilters() {
    let mut tracker = Tracker::with_today(MockRemote::new(), today());
    tracker.init().await.unwrap();

    let outcome = submit(&mut tracker, "Rent", "900", "EMI", "2024-02-01").await;
    assert_eq!(
        outcome.notice(),
        Some("Transaction added! Switch month to view it.")
    );
    submit(&mut tracker, "Tea", "2", "Snacks", "2024-03-03").await;

    assert_eq!(tracker.view().unwrap().transactions.len(), 1);
    tracker.select_period(Period::from_str("2024-02").unwrap());
    let view = tracker.view().unwrap();
    assert_eq!(view.transactions.len(), 1);
    assert_eq!(view.totals.expense, dec("900.00"));
}

// =============================================================================
// Categories and Destructive Actions
// =============================================================================

#[tokio::test]
async fn test_category_lifecycle() {
    let remote = MockRemote::new();
    let mut tracker = Tracker::with_today(remote.clone(), today());
    tracker.init().await.unwrap();

    let bonus = tracker
        .add_category("Bonus", CategoryType::Income)
        .await
        .unwrap();
    // the new category is used when the form leaves it empty
    let outcome = submit(&mut tracker, "Q1 bonus", "500", "", "2024-03-15").await;
    assert_eq!(outcome.record().category.as_deref(), Some("Bonus"));
    assert_eq!(outcome.record().amount, dec("500"));

    let dup = tracker.add_category("Bonus", CategoryType::Income).await;
    assert!(dup.is_err());
    assert_eq!(tracker.registry().user_categories().count(), 1);

    let token = tracker.request_delete_category(bonus.id.unwrap()).unwrap();
    let done = tracker.confirm(token).await.unwrap();
    assert_eq!(
        done,
        ConfirmedOutcome::CategoryDeleted {
            id: bonus.id.unwrap(),
            name: "Bonus".into()
        }
    );

    // orphaned label: still bucketed, gray, and treated as expense on re-save
    assert_eq!(tracker.view().unwrap().breakdown.get("Bonus"), Some(dec("500")));
    let id = outcome.record().id;
    tracker.begin_edit(id).unwrap();
    let updated = tracker.submit().await.unwrap();
    assert_eq!(updated.record().amount, dec("-500"));
}

#[tokio::test]
async fn test_confirmation_superseded() {
    let mut tracker = Tracker::with_today(MockRemote::new(), today());
    tracker.init().await.unwrap();
    let tea = submit(&mut tracker, "Tea", "2", "Snacks", "2024-03-03").await;

    let stale = tracker.request_delete(tea.record().id);
    let current = tracker.request_clear_all();
    assert!(matches!(
        tracker.confirm(stale).await,
        Err(Error::StaleConfirmation)
    ));
    assert_eq!(tracker.store().len(), 1);

    tracker.confirm(current).await.unwrap();
    assert!(tracker.store().is_empty());
}

// =============================================================================
// Failure Handling
// =============================================================================

#[tokio::test]
async fn test_unauthenticated_user_loads_nothing() {
    let remote = MockRemote::unauthenticated();
    let mut tracker = Tracker::with_today(remote.clone(), today());

    let err = tracker.init().await.unwrap_err();
    assert!(matches!(err, Error::Unauthenticated));
    assert_eq!(err.user_message(), "Please log in to continue.");
    assert!(tracker.user().is_none());
    assert!(tracker.store().is_empty());
    assert_eq!(remote.request_count(), 1);
}

#[tokio::test]
async fn test_offline_submit_keeps_form() {
    let remote = MockRemote::new();
    let mut tracker = Tracker::with_today(remote.clone(), today());
    tracker.init().await.unwrap();

    remote.set_offline(true);
    let form = tracker.form_mut();
    form.text = "Lunch".into();
    form.amount = "12.50".into();
    form.category = "Food".into();

    let err = tracker.submit().await.unwrap_err();
    assert_eq!(err.user_message(), "Something went wrong. Please try again.");
    assert!(tracker.store().is_empty());
    // nothing was cleared, the user can retry
    assert_eq!(tracker.session().form().text, "Lunch");

    remote.set_offline(false);
    tracker.submit().await.unwrap();
    assert_eq!(tracker.store().len(), 1);
}
