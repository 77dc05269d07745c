//! Router construction and shared state.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{
    db::DbPool,
    handlers,
    store::{AccountStore, SqliteAccountStore},
};

/// State shared with every handler.
///
/// The store is the only dependency; swapping it is how tests run the real
/// routes without a database.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AccountStore>,
}

impl AppState {
    pub fn new(store: impl AccountStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn sqlite(pool: DbPool) -> Self {
        Self::new(SqliteAccountStore::new(pool))
    }
}

/// Build the HTTP router.
///
/// `/health` and `/add` are static routes and take precedence over `/{id}`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/", get(handlers::accounts::list_accounts))
        .route("/add", post(handlers::accounts::create_account))
        .route(
            "/{id}",
            get(handlers::accounts::get_account)
                .put(handlers::accounts::update_account)
                .delete(handlers::accounts::delete_account),
        )
        // Request/response tracing
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
