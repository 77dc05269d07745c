//! Account management HTTP handlers.
//!
//! This module implements the account endpoints:
//! - GET / - List all accounts
//! - GET /:id - Get accounts matching an id
//! - POST /add - Create an account
//! - PUT /:id - Update an account
//! - DELETE /:id - Delete an account
//!
//! Ids are taken from the path as strings and handed to the store unchanged.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};

use crate::{
    error::ApiError,
    models::account::{
        Account, AccountChanges, AccountCreated, AccountUpdated, MessageResponse, NewAccount,
    },
    routes::AppState,
};

/// List all accounts.
///
/// # Endpoint
///
/// `GET /`
///
/// # Response
///
/// - **Success (200 OK)**: Array of accounts, ordered by id (may be empty)
/// - **Error (500)**: `{"message": "Error retrieving accounts"}`
///
/// ```json
/// [
///   { "id": 1, "name": "Eva", "budget": 32 },
///   { "id": 2, "name": "Ava", "budget": 500 }
/// ]
/// ```
pub async fn list_accounts(State(state): State<AppState>) -> Result<Json<Vec<Account>>, ApiError> {
    let accounts = state
        .store
        .list()
        .await
        .map_err(ApiError::RetrieveAccounts)?;

    tracing::debug!(count = accounts.len(), "Fetched accounts");

    Ok(Json(accounts))
}

/// Get the accounts whose id equals the path parameter.
///
/// # Endpoint
///
/// `GET /:id`
///
/// # Response
///
/// - **Success (200 OK)**: Array with the matching account
/// - **Error (404)**: `{"message": "Account with id: {id} not found "}`
/// - **Error (500)**: `{"message": "Error retrieving accounts"}`
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Account>>, ApiError> {
    let accounts = state
        .store
        .find_by_id(&id)
        .await
        .map_err(ApiError::RetrieveAccounts)?;

    tracing::debug!(%id, count = accounts.len(), "Fetched account");

    if accounts.is_empty() {
        return Err(ApiError::AccountNotFound(id));
    }

    Ok(Json(accounts))
}

/// Create a new account.
///
/// # Endpoint
///
/// `POST /add`
///
/// # Request Body
///
/// ```json
/// { "name": "Eva", "budget": 32 }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: The created row under `newAccount`
/// - **Error (400)**: Missing body, `name` or `budget` (checked in that order)
/// - **Error (404)**: The row could not be read back after insert
/// - **Error (500)**: Insert or read-back failed
///
/// ```json
/// {
///   "message": "Account with id: 1 created ",
///   "newAccount": { "id": 1, "name": "Eva", "budget": 32 }
/// }
/// ```
///
/// The body is taken as raw bytes so that an absent or unparsable body is
/// answered with the same JSON message as an empty one.
pub async fn create_account(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AccountCreated>, ApiError> {
    let new_account = NewAccount::from_body(&body)?;

    let created = state.store.create(&new_account).await?;

    let Some(account) = created.account else {
        tracing::warn!(id = created.id, "Inserted account could not be read back");
        return Err(ApiError::AccountNotFound(created.id.to_string()));
    };

    tracing::info!(id = account.id, name = %account.name, "Account created");

    Ok(Json(AccountCreated::new(account)))
}

/// Update an account.
///
/// # Endpoint
///
/// `PUT /:id`
///
/// # Request Body
///
/// Any subset of the mutable fields. Other keys are ignored.
///
/// ```json
/// { "budget": 500 }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: The updated row(s) under `account`
/// - **Error (400)**: Body is not valid JSON for `name`/`budget`
/// - **Error (404)**: `{"message": "Account with id: {id} not found"}`
/// - **Error (500)**: `{"message": "Error updating account: {error}"}`
pub async fn update_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<AccountUpdated>, ApiError> {
    let changes = AccountChanges::from_body(&body)?;
    if changes.is_empty() {
        tracing::debug!(%id, "Update carries no changes");
    }

    let updated = state
        .store
        .update(&id, &changes)
        .await
        .map_err(ApiError::UpdateAccount)?
        .and_then(AccountUpdated::new)
        .ok_or_else(|| ApiError::UpdateTargetNotFound(id.clone()))?;

    tracing::info!(%id, "Account updated");

    Ok(Json(updated))
}

/// Delete an account.
///
/// # Endpoint
///
/// `DELETE /:id`
///
/// # Response
///
/// - **Success (200 OK)**: `{"message": "Account with id: {id} successfully deleted"}`
/// - **Error (404)**: `{"message": "Account with id: {id} was not found in the database"}`
/// - **Error (500)**: `{"message": "error deleting account"}`
pub async fn delete_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = state
        .store
        .delete(&id)
        .await
        .map_err(ApiError::DeleteAccount)?;

    tracing::debug!(%id, deleted, "Delete executed");

    if deleted == 0 {
        return Err(ApiError::DeleteTargetNotFound(id));
    }

    tracing::info!(%id, "Account deleted");

    Ok(Json(MessageResponse::deleted(&id)))
}
