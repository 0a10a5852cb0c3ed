//! Request handlers.
//!
//! Drawing handlers delegate to [`scribble_db::repositories::DrawingRepo`]
//! and map errors via [`AppError`](crate::error::AppError); the moderation
//! handler runs the pixel heuristic from `scribble_core`.

pub mod drawings;
pub mod moderation;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;

use crate::error::AppError;

/// Map a JSON extraction failure to an [`AppError`], keeping 413 for
/// oversized bodies and answering everything else with `message`.
pub(crate) fn reject_body(rejection: JsonRejection, message: &str) -> AppError {
    tracing::debug!(%rejection, "Rejected request body");
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::BadRequest(message.to_string())
    }
}
