//! HTTP backend for the tracker API
//!
//! Authenticates with the session cookie the browser login produced and maps
//! response statuses onto the engine's error kinds:
//! 401 → `Unauthenticated`, 403/404 → `NotFoundOrUnauthorized`,
//! anything else non-2xx → `Remote`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{Category, NewCategory, Transaction, TransactionPayload, User};

use super::RemoteStore;

/// Cookie name used by the server's session middleware
const SESSION_COOKIE_NAME: &str = "connect.sid";

#[derive(Clone)]
pub struct HttpRemote {
    http_client: Client,
    base_url: String,
}

impl HttpRemote {
    /// Create a client for `base_url`, optionally carrying a session cookie
    pub fn new(base_url: &str, session: Option<&str>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(session) = session.filter(|s| !s.trim().is_empty()) {
            let cookie = session_cookie_header(session);
            let value = HeaderValue::from_str(&cookie)
                .map_err(|e| Error::Config(format!("Invalid session cookie: {}", e)))?;
            headers.insert(COOKIE, value);
        }

        let http_client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.server_url,
            config.session_cookie.as_deref(),
            config.timeout(),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!(path, "GET");
        let response = self.http_client.get(self.url(path)).send().await?;
        Ok(check(response).await?.json().await?)
    }

    async fn delete(&self, path: &str) -> Result<()> {
        debug!(path, "DELETE");
        let response = self.http_client.delete(self.url(path)).send().await?;
        check(response).await?;
        Ok(())
    }
}

/// Accept either a bare session id or a full `name=value` pair
fn session_cookie_header(session: &str) -> String {
    let session = session.trim();
    if session.contains('=') {
        session.to_string()
    } else {
        format!("{}={}", SESSION_COOKIE_NAME, session)
    }
}

/// Turn non-success statuses into errors
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    debug!(status = status.as_u16(), %message, "Remote rejected request");
    Err(match status {
        StatusCode::UNAUTHORIZED => Error::Unauthenticated,
        StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => Error::NotFoundOrUnauthorized(message),
        _ => Error::Remote {
            status: status.as_u16(),
            message,
        },
    })
}

#[async_trait]
impl RemoteStore for HttpRemote {
    async fn current_user(&self) -> Result<User> {
        self.get_json("/api/user").await
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.get_json("/api/categories").await
    }

    async fn create_category(&self, category: &NewCategory) -> Result<Category> {
        debug!(name = %category.name, "POST /api/categories");
        let response = self
            .http_client
            .post(self.url("/api/categories"))
            .json(category)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn delete_category(&self, id: i64) -> Result<()> {
        self.delete(&format!("/api/categories/{}", id)).await
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        self.get_json("/api/transactions").await
    }

    async fn create_transaction(&self, payload: &TransactionPayload) -> Result<Transaction> {
        debug!("POST /api/transactions");
        let response = self
            .http_client
            .post(self.url("/api/transactions"))
            .json(payload)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn update_transaction(
        &self,
        id: i64,
        payload: &TransactionPayload,
    ) -> Result<Transaction> {
        debug!(id, "PUT /api/transactions/:id");
        let response = self
            .http_client
            .put(self.url(&format!("/api/transactions/{}", id)))
            .json(payload)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn delete_transaction(&self, id: i64) -> Result<()> {
        self.delete(&format!("/api/transactions/{}", id)).await
    }

    async fn clear_transactions(&self) -> Result<()> {
        self.delete("/api/transactions").await
    }

    fn endpoint(&self) -> &str {
        &self.base_url
    }
}
