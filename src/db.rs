//! Database connection pool and migration management.
//!
//! This module provides utilities for:
//! - Creating a SQLite connection pool
//! - Running the embedded migrations that create the `accounts` table

use sqlx::{Pool, Sqlite, sqlite::SqlitePoolOptions};

/// Type alias for the SQLite connection pool.
pub type DbPool = Pool<Sqlite>;

/// Create a new SQLite connection pool.
///
/// # Arguments
///
/// * `database_url` - SQLite connection string (`sqlite://path?mode=rwc`, `sqlite::memory:`)
/// * `max_connections` - Upper bound on pooled connections
///
/// An in-memory database lives per connection, so callers using
/// `sqlite::memory:` should pass `max_connections = 1`.
///
/// # Errors
///
/// Returns an error if the connection string is invalid or the database
/// file cannot be opened.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Run database migrations from the `migrations/` directory.
///
/// Applied migrations are tracked in `_sqlx_migrations`, so each runs once.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    // Migrations are embedded at compile time
    sqlx::migrate!("./migrations").run(pool).await
}
