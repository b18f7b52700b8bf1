//! Domain models for Spendwise

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a category records money coming in or going out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Income,
    #[default]
    Expense,
}

impl CategoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for CategoryType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown category type: {}", s)),
        }
    }
}

impl std::fmt::Display for CategoryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A transaction category
///
/// Built-in defaults have no id. `owner` is `None` for system categories
/// visible to everyone and the user id for categories a user created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub color: String,
    #[serde(rename = "type", default)]
    pub category_type: CategoryType,
    #[serde(rename = "user_id", default)]
    pub owner: Option<i64>,
}

impl Category {
    /// A category that only exists client side (no id, no owner)
    pub fn builtin(name: &str, color: &str, category_type: CategoryType) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            color: color.to_string(),
            category_type,
            owner: None,
        }
    }

    pub fn is_user_owned(&self) -> bool {
        self.owner.is_some()
    }
}

/// Body of `POST /api/categories`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
}

/// A stored transaction, as returned by the remote
///
/// `amount` is signed: negative for expenses, positive for income.
/// `category` is a plain label and may name a category that no longer exists.
/// `date` is kept as the remote's string so a malformed value does not poison
/// the whole collection; see [`Transaction::calendar_date`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(default)]
    pub text: String,
    pub amount: Decimal,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl Transaction {
    /// Parse the calendar date, ignoring any time suffix (`2024-03-05T00:00:00Z`)
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        parse_calendar_date(self.date.as_deref()?)
    }

    pub fn is_expense(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// The category label, or "Other" when the transaction has none
    pub fn category_label(&self) -> &str {
        match self.category.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => OTHER_CATEGORY,
        }
    }

    /// The same record as a request body (for comparisons and re-submission)
    pub fn to_payload(&self) -> Option<TransactionPayload> {
        Some(TransactionPayload {
            text: self.text.clone(),
            amount: self.amount,
            category: self.category_label().to_string(),
            date: self.calendar_date()?,
        })
    }
}

/// Label used for transactions without a category
pub const OTHER_CATEGORY: &str = "Other";

/// Parse `YYYY-MM-DD`, optionally followed by `T...` or a space and a time
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let day = raw.get(..10)?;
    match raw.as_bytes().get(10) {
        None | Some(b'T') | Some(b' ') => {}
        Some(_) => return None,
    }
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Body of `POST /api/transactions` and `PUT /api/transactions/:id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPayload {
    pub text: String,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
}

/// The logged-in user's profile from `GET /api/user`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl User {
    /// Name for the profile badge: display name, then email
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_category_type_from_str() {
        assert_eq!(
            CategoryType::from_str("Income").unwrap(),
            CategoryType::Income
        );
        assert_eq!(
            CategoryType::from_str(" expense ").unwrap(),
            CategoryType::Expense
        );
        assert!(CategoryType::from_str("transfer").is_err());
    }

    #[test]
    fn test_category_deserializes_remote_row() {
        let json = r##"{"id":4,"user_id":9,"name":"Pets","color":"#a1b2c3","type":"expense"}"##;
        let cat: Category = serde_json::from_str(json).unwrap();
        assert_eq!(cat.id, Some(4));
        assert_eq!(cat.owner, Some(9));
        assert_eq!(cat.category_type, CategoryType::Expense);
        assert!(cat.is_user_owned());

        let system = r##"{"id":1,"user_id":null,"name":"Food","color":"#e74c3c","type":"expense"}"##;
        let cat: Category = serde_json::from_str(system).unwrap();
        assert!(!cat.is_user_owned());
    }

    #[test]
    fn test_transaction_amount_from_number_or_string() {
        let from_string = r#"{"id":1,"text":"Lunch","amount":"-12.50","category":"Food","date":"2024-03-05"}"#;
        let tx: Transaction = serde_json::from_str(from_string).unwrap();
        assert_eq!(tx.amount, Decimal::new(-1250, 2));

        let from_number = r#"{"id":2,"text":"Salary","amount":3000,"category":"Income","date":"2024-03-01T00:00:00.000Z"}"#;
        let tx: Transaction = serde_json::from_str(from_number).unwrap();
        assert_eq!(tx.amount, Decimal::new(3000, 0));
        assert_eq!(
            tx.calendar_date(),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
    }

    #[test]
    fn test_parse_calendar_date() {
        assert!(parse_calendar_date("2024-03-31").is_some());
        assert!(parse_calendar_date("2024-03-31 10:00:00").is_some());
        assert!(parse_calendar_date("2024-02-30").is_none());
        assert!(parse_calendar_date("2024-03").is_none());
        assert!(parse_calendar_date("2024-03-311").is_none());
        assert!(parse_calendar_date("").is_none());
        assert!(parse_calendar_date("not a date").is_none());
    }

    #[test]
    fn test_category_label_falls_back_to_other() {
        let mut tx = Transaction {
            id: 1,
            text: "Misc".into(),
            amount: Decimal::new(-5, 0),
            category: None,
            date: Some("2024-03-01".into()),
        };
        assert_eq!(tx.category_label(), "Other");
        tx.category = Some(String::new());
        assert_eq!(tx.category_label(), "Other");
        tx.category = Some("Snacks".into());
        assert_eq!(tx.category_label(), "Snacks");
    }

    #[test]
    fn test_user_label() {
        let user = User {
            id: 1,
            display_name: None,
            email: Some("a@example.com".into()),
            avatar: None,
        };
        assert_eq!(user.label(), "a@example.com");
    }
}
