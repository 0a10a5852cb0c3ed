use axum::routing::post;
use axum::Router;

use crate::handlers::moderation;
use crate::state::AppState;

/// Moderation route mounted at `/api/moderate`.
///
/// ```text
/// POST /  -> moderate
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(moderation::moderate))
}
