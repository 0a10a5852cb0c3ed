pub mod drawings;
pub mod health;
pub mod moderation;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /drawings          list, create
/// /drawings/         list, create (trailing slash)
/// /drawings/{id}     get, delete
///
/// /moderate          heuristic content check (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/drawings", drawings::router())
        .route(
            "/drawings/",
            get(handlers::drawings::list).post(handlers::drawings::create),
        )
        .nest("/moderate", moderation::router())
}
