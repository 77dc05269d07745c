#![allow(dead_code)]

use accounts_budget::{
    AppState,
    error::{CreateError, StoreError},
    models::account::{Account, AccountChanges, NewAccount},
    router,
    store::{AccountStore, CreatedAccount, MemoryAccountStore},
};
use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

pub fn memory_app() -> Router {
    router(AppState::new(MemoryAccountStore::new()))
}

/// A router over a fresh in-memory SQLite database with migrations applied.
pub async fn sqlite_app() -> Router {
    // One connection, since every connection to :memory: is its own database
    let pool = accounts_budget::db::create_pool("sqlite::memory:", 1)
        .await
        .expect("Failed to create in-memory SQLite DB");
    accounts_budget::db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    router(AppState::sqlite(pool))
}

pub fn faulty_app(fault: Fault) -> Router {
    router(AppState::new(FaultyStore(fault)))
}

/// Send a request and decode the JSON response body.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    assert_eq!(
        response.headers()["content-type"],
        "application/json",
        "every response is JSON"
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, serde_json::from_slice(&bytes).unwrap())
}

/// How a [`FaultyStore`] misbehaves on create. Every other call fails outright.
#[derive(Debug, Clone, Copy)]
pub enum Fault {
    Offline,
    LostInsert,
    UnreadableInsert,
}

pub struct FaultyStore(pub Fault);

fn offline() -> StoreError {
    StoreError::Backend("store offline".to_string())
}

#[async_trait]
impl AccountStore for FaultyStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Err(offline())
    }

    async fn list(&self) -> Result<Vec<Account>, StoreError> {
        Err(offline())
    }

    async fn find_by_id(&self, _id: &str) -> Result<Vec<Account>, StoreError> {
        Err(offline())
    }

    async fn create(&self, _account: &NewAccount) -> Result<CreatedAccount, CreateError> {
        match self.0 {
            Fault::Offline => Err(CreateError::Insert(offline())),
            Fault::LostInsert => Ok(CreatedAccount {
                id: 7,
                account: None,
            }),
            Fault::UnreadableInsert => Err(CreateError::Fetch(StoreError::Backend(
                "row locked".to_string(),
            ))),
        }
    }

    async fn update(
        &self,
        _id: &str,
        _changes: &AccountChanges,
    ) -> Result<Option<Vec<Account>>, StoreError> {
        Err(offline())
    }

    async fn delete(&self, _id: &str) -> Result<u64, StoreError> {
        Err(offline())
    }
}
