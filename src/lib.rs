//! Accounts budget service.
//!
//! A small REST API over a single `accounts` table: list, fetch, create,
//! update and delete accounts, each with a name and a budget.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: SQLite with sqlx, behind the [`store::AccountStore`] trait
//! - **Format**: JSON requests/responses, errors as `{"message": ...}`

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod store;

pub use routes::{AppState, router};
