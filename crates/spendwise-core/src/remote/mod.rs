//! Remote store abstraction
//!
//! The tracker never owns the data; the server does. This module provides a
//! backend-agnostic interface for the tracker API.
//!
//! # Architecture
//!
//! - `RemoteStore` trait: the operations the engine consumes
//! - `RemoteClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Implementations: `HttpRemote` (reqwest, the real API) and `MockRemote`
//!   (in-memory, behaves like the server)
//!
//! # Configuration
//!
//! Environment variables:
//! - `REMOTE_BACKEND`: `http` (default) or `mock`
//! - `SPENDWISE_URL` / `SPENDWISE_SESSION`: see [`crate::config`]

mod http;
mod mock;

pub use http::HttpRemote;
pub use mock::{MockRemote, MOCK_USER_ID};

use async_trait::async_trait;

use crate::config::Config;
use crate::error::Result;
use crate::models::{Category, NewCategory, Transaction, TransactionPayload, User};

/// Operations of the tracker API
///
/// Every method is one request. Implementations must not retry.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// `GET /api/user`; `Error::Unauthenticated` when not logged in
    async fn current_user(&self) -> Result<User>;

    /// `GET /api/categories`: system defaults plus the user's own
    async fn list_categories(&self) -> Result<Vec<Category>>;

    /// `POST /api/categories`; fails on a duplicate name in scope
    async fn create_category(&self, category: &NewCategory) -> Result<Category>;

    /// `DELETE /api/categories/:id`; fails unless the user owns it
    async fn delete_category(&self, id: i64) -> Result<()>;

    /// `GET /api/transactions`, newest date first, then highest id
    async fn list_transactions(&self) -> Result<Vec<Transaction>>;

    /// `POST /api/transactions`
    async fn create_transaction(&self, payload: &TransactionPayload) -> Result<Transaction>;

    /// `PUT /api/transactions/:id`
    async fn update_transaction(&self, id: i64, payload: &TransactionPayload)
        -> Result<Transaction>;

    /// `DELETE /api/transactions/:id`
    async fn delete_transaction(&self, id: i64) -> Result<()>;

    /// `DELETE /api/transactions`: everything the user owns
    async fn clear_transactions(&self) -> Result<()>;

    /// Where requests go (for logging)
    fn endpoint(&self) -> &str;
}

/// Concrete remote client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum RemoteClient {
    /// The tracker HTTP API
    Http(HttpRemote),
    /// In-memory store for tests and demos
    Mock(MockRemote),
}

impl RemoteClient {
    /// Pick a backend from `REMOTE_BACKEND`, defaulting to HTTP
    pub fn from_config(config: &Config) -> Result<Self> {
        let backend = std::env::var("REMOTE_BACKEND").unwrap_or_else(|_| "http".to_string());

        match backend.to_lowercase().as_str() {
            "http" => Ok(RemoteClient::Http(HttpRemote::from_config(config)?)),
            "mock" => Ok(RemoteClient::Mock(MockRemote::new())),
            _ => {
                tracing::warn!(backend = %backend, "Unknown REMOTE_BACKEND, falling back to http");
                Ok(RemoteClient::Http(HttpRemote::from_config(config)?))
            }
        }
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        RemoteClient::Mock(MockRemote::new())
    }
}

// Implement RemoteStore for RemoteClient by delegating to the inner backend
#[async_trait]
impl RemoteStore for RemoteClient {
    async fn current_user(&self) -> Result<User> {
        match self {
            RemoteClient::Http(r) => r.current_user().await,
            RemoteClient::Mock(r) => r.current_user().await,
        }
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        match self {
            RemoteClient::Http(r) => r.list_categories().await,
            RemoteClient::Mock(r) => r.list_categories().await,
        }
    }

    async fn create_category(&self, category: &NewCategory) -> Result<Category> {
        match self {
            RemoteClient::Http(r) => r.create_category(category).await,
            RemoteClient::Mock(r) => r.create_category(category).await,
        }
    }

    async fn delete_category(&self, id: i64) -> Result<()> {
        match self {
            RemoteClient::Http(r) => r.delete_category(id).await,
            RemoteClient::Mock(r) => r.delete_category(id).await,
        }
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        match self {
            RemoteClient::Http(r) => r.list_transactions().await,
            RemoteClient::Mock(r) => r.list_transactions().await,
        }
    }

    async fn create_transaction(&self, payload: &TransactionPayload) -> Result<Transaction> {
        match self {
            RemoteClient::Http(r) => r.create_transaction(payload).await,
            RemoteClient::Mock(r) => r.create_transaction(payload).await,
        }
    }

    async fn update_transaction(
        &self,
        id: i64,
        payload: &TransactionPayload,
    ) -> Result<Transaction> {
        match self {
            RemoteClient::Http(r) => r.update_transaction(id, payload).await,
            RemoteClient::Mock(r) => r.update_transaction(id, payload).await,
        }
    }

    async fn delete_transaction(&self, id: i64) -> Result<()> {
        match self {
            RemoteClient::Http(r) => r.delete_transaction(id).await,
            RemoteClient::Mock(r) => r.delete_transaction(id).await,
        }
    }

    async fn clear_transactions(&self) -> Result<()> {
        match self {
            RemoteClient::Http(r) => r.clear_transactions().await,
            RemoteClient::Mock(r) => r.clear_transactions().await,
        }
    }

    fn endpoint(&self) -> &str {
        match self {
            RemoteClient::Http(r) => r.endpoint(),
            RemoteClient::Mock(r) => r.endpoint(),
        }
    }
}
