//! SQLite-backed account store.
//!
//! Multi-step operations (insert + read back, update + read back) run inside
//! one database transaction, so a concurrent delete cannot slip in between.

use async_trait::async_trait;

use super::{AccountStore, CreatedAccount};
use crate::db::DbPool;
use crate::error::{CreateError, StoreError};
use crate::models::account::{Account, AccountChanges, NewAccount};

const SELECT_BY_ID: &str = "SELECT id, name, budget FROM accounts WHERE id = ?";

pub struct SqliteAccountStore {
    pool: DbPool,
}

impl SqliteAccountStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for SqliteAccountStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Account>, StoreError> {
        let accounts =
            sqlx::query_as::<_, Account>("SELECT id, name, budget FROM accounts ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(accounts)
    }

    async fn find_by_id(&self, id: &str) -> Result<Vec<Account>, StoreError> {
        // The INTEGER column applies numeric affinity to the bound text,
        // so "7" matches id 7 and "abc" matches nothing.
        let accounts = sqlx::query_as::<_, Account>(SELECT_BY_ID)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        Ok(accounts)
    }

    async fn create(&self, account: &NewAccount) -> Result<CreatedAccount, CreateError> {
        let insert = |e: sqlx::Error| CreateError::Insert(e.into());

        let mut tx = self.pool.begin().await.map_err(insert)?;

        let id = sqlx::query("INSERT INTO accounts (name, budget) VALUES (?, ?)")
            .bind(&account.name)
            .bind(account.budget)
            .execute(&mut *tx)
            .await
            .map_err(insert)?
            .last_insert_rowid();

        let row = sqlx::query_as::<_, Account>(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| CreateError::Fetch(e.into()))?;

        // Nothing is persisted until commit
        tx.commit().await.map_err(insert)?;

        Ok(CreatedAccount { id, account: row })
    }

    async fn update(
        &self,
        id: &str,
        changes: &AccountChanges,
    ) -> Result<Option<Vec<Account>>, StoreError> {
        let mut tx = self.pool.begin().await?;

        // Omitted fields bind NULL and keep their stored value
        let updated = sqlx::query(
            r#"
            UPDATE accounts
            SET name = COALESCE(?, name),
                budget = COALESCE(?, budget)
            WHERE id = ?
            "#,
        )
        .bind(changes.name.as_deref())
        .bind(changes.budget)
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if updated == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let rows = sqlx::query_as::<_, Account>(SELECT_BY_ID)
            .bind(id)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Some(rows))
    }

    async fn delete(&self, id: &str) -> Result<u64, StoreError> {
        let deleted = sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}
