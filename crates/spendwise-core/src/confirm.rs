//! Two-phase confirmation for destructive actions
//!
//! Deleting a transaction, clearing the history and deleting a category all
//! go through [`ConfirmationGate`]: `request` hands back a token and nothing
//! happens until that token is confirmed. Like a modal dialog, only one
//! request is pending at a time; a new request replaces the old one.

/// A destructive action waiting for the user's yes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestructiveAction {
    DeleteTransaction(i64),
    ClearAll,
    DeleteCategory { id: i64, name: String },
}

impl DestructiveAction {
    pub fn title(&self) -> &'static str {
        match self {
            Self::DeleteTransaction(_) => "Delete Transaction?",
            Self::ClearAll => "Clear All History?",
            Self::DeleteCategory { .. } => "Delete Category?",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::DeleteTransaction(_) => {
                "This will permanently remove this transaction.".to_string()
            }
            Self::ClearAll => "Are you sure? This will delete ALL transactions.".to_string(),
            Self::DeleteCategory { name, .. } => format!(
                "Are you sure you want to delete \"{}\"? Transactions using this category \
                 will remain, but the category label will be unstyled.",
                name
            ),
        }
    }
}

/// Handle for a pending confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingToken(u64);

#[derive(Debug, Default)]
pub struct ConfirmationGate {
    pending: Option<(PendingToken, DestructiveAction)>,
    next: u64,
}

impl ConfirmationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park `action` until confirmed; supersedes any earlier request
    pub fn request(&mut self, action: DestructiveAction) -> PendingToken {
        self.next += 1;
        let token = PendingToken(self.next);
        self.pending = Some((token, action));
        token
    }

    /// The action awaiting confirmation, if any
    pub fn pending(&self) -> Option<&DestructiveAction> {
        self.pending.as_ref().map(|(_, action)| action)
    }

    /// Release the action for execution if `token` is the pending one
    pub fn confirm(&mut self, token: PendingToken) -> Option<DestructiveAction> {
        match self.pending.take() {
            Some((pending, action)) if pending == token => Some(action),
            other => {
                self.pending = other;
                None
            }
        }
    }

    /// Drop the pending action; returns whether `token` was pending
    pub fn cancel(&mut self, token: PendingToken) -> bool {
        match &self.pending {
            Some((pending, _)) if *pending == token => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}
