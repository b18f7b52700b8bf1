//! Category registry
//!
//! Holds the categories visible to the user (system defaults plus their own),
//! resolves a label to its type and color, and tracks which category the entry
//! form currently has selected.

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::models::{Category, CategoryType, NewCategory};
use crate::remote::RemoteStore;

/// Color for labels that match no known category
pub const FALLBACK_COLOR: &str = "#95a5a6";

/// Built-in categories used when the remote list cannot be fetched
const DEFAULT_CATEGORIES: [(&str, &str, CategoryType); 13] = [
    ("Food", "#e74c3c", CategoryType::Expense),
    ("Income", "#27ae60", CategoryType::Income),
    ("Borrow From", "#8e44ad", CategoryType::Income),
    ("EMI", "#f1c40f", CategoryType::Expense),
    ("Daily Expenses", "#9b59b6", CategoryType::Expense),
    ("Savings", "#2ecc71", CategoryType::Expense),
    ("Grocery", "#e67e22", CategoryType::Expense),
    ("Snacks", "#d35400", CategoryType::Expense),
    ("School Fee", "#3498db", CategoryType::Expense),
    ("Medical", "#1abc9c", CategoryType::Expense),
    ("Petrol", "#34495e", CategoryType::Expense),
    ("Loan", "#7f8c8d", CategoryType::Expense),
    ("Other", "#ecf0f1", CategoryType::Expense),
];

/// The offline default set
pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|(name, color, category_type)| Category::builtin(name, color, *category_type))
        .collect()
}

/// What a label resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub category_type: CategoryType,
    pub color: String,
}

impl Resolved {
    /// Unknown labels: gray, and treated as an expense
    pub fn fallback() -> Self {
        Self {
            category_type: CategoryType::Expense,
            color: FALLBACK_COLOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
    selected: Option<String>,
    using_defaults: bool,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with a known set (tests, offline start)
    pub fn with_categories(categories: Vec<Category>) -> Self {
        let mut registry = Self::default();
        registry.replace(categories);
        registry
    }

    /// Fetch the visible categories, degrading to the built-in defaults
    ///
    /// Never fails: a remote error is logged and the defaults take over so the
    /// entry form stays usable.
    pub async fn load<R: RemoteStore + ?Sized>(&mut self, remote: &R) {
        match remote.list_categories().await {
            Ok(categories) => {
                debug!(count = categories.len(), "Loaded categories");
                self.using_defaults = false;
                self.replace(categories);
            }
            Err(e) => {
                warn!("Error fetching categories, using defaults: {}", e);
                self.using_defaults = true;
                self.replace(default_categories());
            }
        }
    }

    /// Swap in a new set, keeping the selection when it still exists
    fn replace(&mut self, categories: Vec<Category>) {
        self.categories = categories;
        self.reselect();
    }

    fn reselect(&mut self) {
        let keep = self
            .selected
            .as_deref()
            .is_some_and(|name| self.find(name).is_some());
        if !keep {
            self.selected = self.categories.first().map(|c| c.name.clone());
        }
    }

    /// True when the last load fell back to the built-in set
    pub fn using_defaults(&self) -> bool {
        self.using_defaults
    }

    pub fn find(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn find_by_id(&self, id: i64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == Some(id))
    }

    /// Type and color for a label; first match wins
    pub fn resolve(&self, name: &str) -> Resolved {
        self.find(name)
            .map(|c| Resolved {
                category_type: c.category_type,
                color: c.color.clone(),
            })
            .unwrap_or_else(Resolved::fallback)
    }

    /// Create a user category
    ///
    /// The name is trimmed and must not be empty. The remote assigns the id
    /// and color and rejects duplicates in scope. The new category becomes
    /// the selection.
    pub async fn add<R: RemoteStore + ?Sized>(
        &mut self,
        remote: &R,
        name: &str,
        category_type: CategoryType,
    ) -> Result<&Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation("Category name cannot be empty".into()));
        }

        let created = remote
            .create_category(&NewCategory {
                name: name.to_string(),
                category_type,
            })
            .await?;

        info!(name = %created.name, category_type = %created.category_type, "Added category");
        self.selected = Some(created.name.clone());
        self.categories.push(created);
        self.categories
            .last()
            .ok_or_else(|| Error::NotFound("created category".into()))
    }

    /// Delete a user category
    ///
    /// Transactions that use its name are not touched; they keep the label
    /// and render with the fallback color.
    pub async fn remove<R: RemoteStore + ?Sized>(&mut self, remote: &R, id: i64) -> Result<()> {
        remote.delete_category(id).await?;
        self.categories.retain(|c| c.id != Some(id));
        self.reselect();
        info!(id, "Removed category");
        Ok(())
    }

    /// Categories the user created (the ones they can delete)
    pub fn user_categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(|c| c.is_user_owned())
    }

    /// Select a category for the entry form; unknown names are ignored
    pub fn select(&mut self, name: &str) -> bool {
        if self.find(name).is_some() {
            self.selected = Some(name.to_string());
            true
        } else {
            false
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
