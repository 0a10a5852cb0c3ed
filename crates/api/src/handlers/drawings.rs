//! Handlers for the `/drawings` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use scribble_core::drawing::{CreateDrawing, Drawing, INVALID_CREATE_MESSAGE};
use scribble_core::error::CoreError;
use scribble_core::types::DrawingId;
use scribble_db::repositories::DrawingRepo;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::handlers::reject_body;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/drawings
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Drawing>>>> {
    let drawings = DrawingRepo::list(&state.pool).await?;
    tracing::debug!(count = drawings.len(), "Listed drawings");
    Ok(Json(ApiResponse::ok(drawings)))
}

/// GET /api/drawings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Drawing>>> {
    let drawing = match parse_id(&id) {
        Some(drawing_id) => DrawingRepo::find_by_id(&state.pool, &drawing_id).await?,
        None => None,
    };
    let drawing = drawing.ok_or_else(|| not_found(id))?;
    Ok(Json(ApiResponse::ok(drawing)))
}

/// POST /api/drawings
///
/// The body is taken as untyped JSON so that wrong shapes (missing title,
/// non-array strokes, malformed JSON) all map to the same 400 envelope.
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<Drawing>>)> {
    let Json(body) = body.map_err(|rejection| reject_body(rejection, INVALID_CREATE_MESSAGE))?;
    let input = CreateDrawing::from_json(body)?;

    let drawing = DrawingRepo::create(&state.pool, &Drawing::create(input)).await?;

    tracing::info!(
        drawing_id = %drawing.id,
        strokes = drawing.strokes.len(),
        "Created drawing"
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(drawing))))
}

/// DELETE /api/drawings/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let deleted = match parse_id(&id) {
        Some(drawing_id) => DrawingRepo::delete(&state.pool, &drawing_id).await?,
        None => false,
    };
    if !deleted {
        return Err(not_found(id));
    }

    tracing::info!(drawing_id = %id, "Deleted drawing");
    Ok(Json(ApiResponse::empty()))
}

/// Ids that are not UUIDs cannot exist, so they are simply not found.
fn parse_id(id: &str) -> Option<DrawingId> {
    DrawingId::parse_str(id).ok()
}

fn not_found(id: String) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Drawing",
        id,
    })
}
