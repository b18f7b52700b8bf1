//! Month view filter
//!
//! The list, totals, chart and export all work on the transactions of one
//! calendar month.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::Transaction;

/// A calendar year-month (`YYYY-MM`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The month containing `date`
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current local month
    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("Invalid period (expected YYYY-MM): {}", s))?;
        if year.len() != 4 || month.len() != 2 {
            return Err(format!("Invalid period (expected YYYY-MM): {}", s));
        }
        let year: i32 = year
            .parse()
            .map_err(|_| format!("Invalid year in period: {}", s))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("Invalid month in period: {}", s))?;
        Self::new(year, month).ok_or_else(|| format!("Month out of range: {}", s))
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl TryFrom<String> for Period {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}

/// Transactions dated within `period`, in their original order
///
/// Records with a missing or malformed date are never included.
pub fn select_period<'a, I>(transactions: I, period: &Period) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|tx| tx.calendar_date().is_some_and(|d| period.contains(d)))
        .collect()
}
