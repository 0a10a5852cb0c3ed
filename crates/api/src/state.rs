use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference-counted and the config sits
/// behind an `Arc`. Handlers keep no other state between requests.
#[derive(Clone)]
pub struct AppState {
    /// Single-connection SQLite pool.
    pub pool: scribble_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
