//! Route definitions for the `/drawings` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::drawings;
use crate::state::AppState;

/// Drawing routes mounted at `/api/drawings`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(drawings::list).post(drawings::create))
        .route("/{id}", get(drawings::get_by_id).delete(drawings::delete))
}
