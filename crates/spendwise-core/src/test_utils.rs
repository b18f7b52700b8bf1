//! Test utilities for spendwise-core
//!
//! This module provides a mock tracker API server that serves the HTTP
//! endpoints from a [`MockRemote`], so the reqwest client can be exercised
//! end to end in integration tests and local development.

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, put},
    Router,
};
use std::net::SocketAddr;
use tokio::sync::oneshot;

use crate::error::Error;
use crate::models::{Category, NewCategory, Transaction, TransactionPayload, User};
use crate::remote::{MockRemote, RemoteStore};

/// Mock tracker API server for testing and development
pub struct MockApiServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockApiServer {
    /// Start the mock server on an available port, backed by `store`
    pub async fn start(store: MockRemote) -> Self {
        let app = Router::new()
            .route("/api/user", get(handle_user))
            .route(
                "/api/categories",
                get(handle_list_categories).post(handle_create_category),
            )
            .route("/api/categories/:id", delete(handle_delete_category))
            .route(
                "/api/transactions",
                get(handle_list_transactions)
                    .post(handle_create_transaction)
                    .delete(handle_clear_transactions),
            )
            .route(
                "/api/transactions/:id",
                put(handle_update_transaction).delete(handle_delete_transaction),
            )
            .with_state(store);

        Self::serve(app).await
    }

    /// Start a server that answers every request with `status`, the way a
    /// gateway in front of the API refuses a request
    pub async fn start_rejecting(status: StatusCode) -> Self {
        let app = Router::new().fallback(move || async move {
            (status, status.canonical_reason().unwrap_or_default())
        });
        Self::serve(app).await
    }

    async fn serve(app: Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockApiServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Status codes the real server answers with
struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            Error::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "msg": "Not authorized" })),
            )
                .into_response(),
            Error::NotFoundOrUnauthorized(_) => (
                StatusCode::NOT_FOUND,
                Json("Transaction not found or not authorized"),
            )
                .into_response(),
            Error::Remote { status, message } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                message,
            )
                .into_response(),
            Error::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg).into_response(),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()).into_response(),
        }
    }
}

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

async fn handle_user(State(store): State<MockRemote>) -> ApiResult<User> {
    Ok(Json(store.current_user().await?))
}

async fn handle_list_categories(State(store): State<MockRemote>) -> ApiResult<Vec<Category>> {
    Ok(Json(store.list_categories().await?))
}

async fn handle_create_category(
    State(store): State<MockRemote>,
    Json(body): Json<NewCategory>,
) -> ApiResult<Category> {
    Ok(Json(store.create_category(&body).await?))
}

async fn handle_delete_category(
    State(store): State<MockRemote>,
    Path(id): Path<i64>,
) -> ApiResult<&'static str> {
    store.delete_category(id).await?;
    Ok(Json("Category deleted"))
}

async fn handle_list_transactions(State(store): State<MockRemote>) -> ApiResult<Vec<Transaction>> {
    Ok(Json(store.list_transactions().await?))
}

async fn handle_create_transaction(
    State(store): State<MockRemote>,
    Json(body): Json<TransactionPayload>,
) -> ApiResult<Transaction> {
    Ok(Json(store.create_transaction(&body).await?))
}

async fn handle_update_transaction(
    State(store): State<MockRemote>,
    Path(id): Path<i64>,
    Json(body): Json<TransactionPayload>,
) -> ApiResult<Transaction> {
    Ok(Json(store.update_transaction(id, &body).await?))
}

async fn handle_delete_transaction(
    State(store): State<MockRemote>,
    Path(id): Path<i64>,
) -> ApiResult<&'static str> {
    store.delete_transaction(id).await?;
    Ok(Json("Transaction was deleted!"))
}

async fn handle_clear_transactions(State(store): State<MockRemote>) -> ApiResult<&'static str> {
    store.clear_transactions().await?;
    Ok(Json("All transactions deleted!"))
}
