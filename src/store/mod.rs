//! Account persistence.
//!
//! Handlers talk to an [`AccountStore`] rather than to a pool directly, so the
//! same routes run against SQLite in production and an in-memory store in
//! tests. Every lookup takes the `id` exactly as it arrived in the path; ids
//! that do not name a row (including non-numeric ones) simply match nothing.

use async_trait::async_trait;

use crate::error::{CreateError, StoreError};
use crate::models::account::{Account, AccountChanges, NewAccount};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryAccountStore;
pub use sqlite::SqliteAccountStore;

/// Result of a successful insert-then-fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedAccount {
    /// Id assigned by the store
    pub id: i64,

    /// The row read back by `id`, `None` if the read found nothing
    pub account: Option<Account>,
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Cheap round-trip used by the health check.
    async fn ping(&self) -> Result<(), StoreError>;

    /// All accounts, ordered by id.
    async fn list(&self) -> Result<Vec<Account>, StoreError>;

    /// Rows whose id equals `id`.
    async fn find_by_id(&self, id: &str) -> Result<Vec<Account>, StoreError>;

    /// Insert `account`, then read it back by its new id, atomically.
    async fn create(&self, account: &NewAccount) -> Result<CreatedAccount, CreateError>;

    /// Apply `changes` to the rows whose id equals `id`, then read them back,
    /// atomically. `None` when no row was affected.
    async fn update(
        &self,
        id: &str,
        changes: &AccountChanges,
    ) -> Result<Option<Vec<Account>>, StoreError>;

    /// Delete the rows whose id equals `id`, returning how many were removed.
    async fn delete(&self, id: &str) -> Result<u64, StoreError>;
}
