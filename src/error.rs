//! Error types and HTTP error response handling.
//!
//! Store errors are kept separate from API errors: the store layer reports
//! what went wrong, and the handlers decide which user-visible outcome that
//! becomes. Every API error is rendered as a JSON body `{"message": "..."}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Failure of a data-access call.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// SQL execution failed (connection, constraint, decoding...).
    #[error("{0}")]
    Database(#[from] sqlx::Error),

    /// A non-SQL store failed.
    #[error("{0}")]
    Backend(String),
}

/// Failure of the insert-then-fetch sequence used to create an account.
///
/// The two stages surface different messages to the client, so the stage is
/// kept even though both run inside one transaction.
#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    #[error("{0}")]
    Insert(StoreError),

    #[error("{0}")]
    Fetch(StoreError),
}

/// Application-wide error type returned by the handlers.
///
/// `Display` yields the exact `message` sent to the client.
///
/// # Status Code Mapping
///
/// - `MissingAccount`, `MissingName`, `MissingBudget`, `InvalidUpdate` → 400
/// - `AccountNotFound`, `UpdateTargetNotFound`, `DeleteTargetNotFound` → 404
/// - `RetrieveAccounts`, `AddAccount`, `RetrieveNewAccount`, `UpdateAccount`, `DeleteAccount` → 500
/// - `StoreUnavailable` → 503
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("You must send an account to add.")]
    MissingAccount,

    #[error("You must add a name to the account.")]
    MissingName,

    #[error("You must add a budget to the account.")]
    MissingBudget,

    #[error("Invalid account update: {0}")]
    InvalidUpdate(String),

    #[error("Account with id: {0} not found ")]
    AccountNotFound(String),

    #[error("Account with id: {0} not found")]
    UpdateTargetNotFound(String),

    #[error("Account with id: {0} was not found in the database")]
    DeleteTargetNotFound(String),

    /// Detail is logged but never sent to the client.
    #[error("Error retrieving accounts")]
    RetrieveAccounts(#[source] StoreError),

    #[error("Error adding account: {0}")]
    AddAccount(#[source] StoreError),

    #[error("Error retrieving new account: {0}")]
    RetrieveNewAccount(#[source] StoreError),

    #[error("Error updating account: {0}")]
    UpdateAccount(#[source] StoreError),

    /// Detail is logged but never sent to the client.
    #[error("error deleting account")]
    DeleteAccount(#[source] StoreError),

    #[error("Service unavailable")]
    StoreUnavailable(#[source] StoreError),
}

impl From<CreateError> for ApiError {
    fn from(err: CreateError) -> Self {
        match err {
            CreateError::Insert(e) => ApiError::AddAccount(e),
            CreateError::Fetch(e) => ApiError::RetrieveNewAccount(e),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingAccount
            | ApiError::MissingName
            | ApiError::MissingBudget
            | ApiError::InvalidUpdate(_) => StatusCode::BAD_REQUEST,
            ApiError::AccountNotFound(_)
            | ApiError::UpdateTargetNotFound(_)
            | ApiError::DeleteTargetNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::RetrieveAccounts(_)
            | ApiError::AddAccount(_)
            | ApiError::RetrieveNewAccount(_)
            | ApiError::UpdateAccount(_)
            | ApiError::DeleteAccount(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn store_error(&self) -> Option<&StoreError> {
        match self {
            ApiError::RetrieveAccounts(e)
            | ApiError::AddAccount(e)
            | ApiError::RetrieveNewAccount(e)
            | ApiError::UpdateAccount(e)
            | ApiError::DeleteAccount(e)
            | ApiError::StoreUnavailable(e) => Some(e),
            _ => None,
        }
    }
}

/// Convert ApiError into an HTTP response.
///
/// ```json
/// { "message": "You must add a name to the account." }
/// ```
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let Some(source) = self.store_error() {
            tracing::error!(error = %source, status = status.as_u16(), "{}", self);
        }

        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}
