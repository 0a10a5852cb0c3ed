//! Handler for server-side content checks.
//!
//! Only the pixel heuristic runs here; classifier inference stays on the
//! client.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use scribble_core::moderation::{self, ModerationResult};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::handlers::reject_body;
use crate::response::ApiResponse;

const IMAGE_REQUIRED: &str = "Image data is required";
const IMAGE_INVALID: &str = "Image data is not a valid image";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerateRequest {
    /// Base64 image bytes, optionally as a `data:` URL.
    pub image_data: Option<String>,
}

/// POST /api/moderate
pub async fn moderate(
    body: Result<Json<ModerateRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<ModerationResult>>> {
    let Json(request) = body.map_err(|rejection| reject_body(rejection, IMAGE_REQUIRED))?;
    let image_data = request
        .image_data
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest(IMAGE_REQUIRED.to_string()))?;

    // Decoding and scanning are CPU-bound.
    let result = tokio::task::spawn_blocking(move || analyze_image_data(&image_data))
        .await
        .map_err(|e| AppError::InternalError(format!("moderation task failed: {e}")))??;

    tracing::debug!(
        is_nsfw = result.is_nsfw,
        confidence = result.confidence,
        "Moderated image"
    );

    Ok(Json(ApiResponse::ok(result)))
}

/// Decode a base64 (or `data:` URL) image and run the pixel heuristic.
pub fn analyze_image_data(image_data: &str) -> Result<ModerationResult, AppError> {
    let encoded = match image_data.split_once("base64,") {
        Some((_, rest)) => rest,
        None => image_data,
    };
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|_| AppError::BadRequest(IMAGE_INVALID.to_string()))?;
    let image = image::load_from_memory(&bytes)
        .map_err(|_| AppError::BadRequest(IMAGE_INVALID.to_string()))?;
    Ok(moderation::analyze_pixels(&image.to_rgba8()))
}
