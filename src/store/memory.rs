//! In-memory account store.
//!
//! Mirrors the SQLite store's observable behavior (auto-increment ids that
//! are never reused, numeric matching of path ids) without a database.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{AccountStore, CreatedAccount};
use crate::error::{CreateError, StoreError};
use crate::models::account::{Account, AccountChanges, NewAccount};

#[derive(Debug, Default)]
struct Table {
    rows: Vec<Account>,
    last_id: i64,
}

#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    table: RwLock<Table>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing rows; new ids continue after the largest one.
    pub fn with_accounts(rows: Vec<Account>) -> Self {
        let last_id = rows.iter().map(|a| a.id).max().unwrap_or(0);
        Self {
            table: RwLock::new(Table { rows, last_id }),
        }
    }
}

/// Convert a path id the way SQLite's numeric affinity does: `"7"`, `"07"`,
/// `"7.0"` and `"7e0"` all name row 7, while `"7.5"` and `"abc"` name none.
fn parse_id(id: &str) -> Option<i64> {
    let id = id.trim();
    if let Ok(id) = id.parse::<i64>() {
        return Some(id);
    }

    let real = id.parse::<f64>().ok().filter(|r| r.is_finite())?;
    (real.fract() == 0.0 && real.abs() < i64::MAX as f64).then_some(real as i64)
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Account>, StoreError> {
        Ok(self.table.read().await.rows.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Vec<Account>, StoreError> {
        let Some(id) = parse_id(id) else {
            return Ok(Vec::new());
        };

        let table = self.table.read().await;
        Ok(table.rows.iter().filter(|a| a.id == id).cloned().collect())
    }

    async fn create(&self, account: &NewAccount) -> Result<CreatedAccount, CreateError> {
        let mut table = self.table.write().await;

        table.last_id += 1;
        let row = Account {
            id: table.last_id,
            name: account.name.clone(),
            budget: account.budget,
        };
        table.rows.push(row.clone());

        Ok(CreatedAccount {
            id: row.id,
            account: Some(row),
        })
    }

    async fn update(
        &self,
        id: &str,
        changes: &AccountChanges,
    ) -> Result<Option<Vec<Account>>, StoreError> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };

        let mut table = self.table.write().await;
        let mut rows = Vec::new();
        for account in table.rows.iter_mut().filter(|a| a.id == id) {
            changes.apply_to(account);
            rows.push(account.clone());
        }

        Ok((!rows.is_empty()).then_some(rows))
    }

    async fn delete(&self, id: &str) -> Result<u64, StoreError> {
        let Some(id) = parse_id(id) else {
            return Ok(0);
        };

        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|a| a.id != id);

        Ok((before - table.rows.len()) as u64)
    }
}
