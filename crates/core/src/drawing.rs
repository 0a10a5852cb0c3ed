//! Drawing model, create-request validation and server-side assembly.
//!
//! A [`Drawing`] is created exactly once and never edited afterwards, so
//! `updated_at` always equals `created_at`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::types::{self, DrawingId, Timestamp};

/// Message returned for every malformed create request.
pub const INVALID_CREATE_MESSAGE: &str = "Invalid request: title and strokes are required";

/// A single input-device sample in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One continuous pointer drag. `points` keeps capture order.
///
/// Only these five fields are stored; strokes carrying anything else are
/// rejected rather than silently trimmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Stroke {
    pub id: String,
    pub points: Vec<Point>,
    pub color: String,
    pub width: f64,
    /// Capture time in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl Stroke {
    /// Strokes with fewer than two points have no segment to draw.
    pub fn is_renderable(&self) -> bool {
        self.points.len() >= 2
    }
}

/// A titled collection of strokes; the unit of persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drawing {
    pub id: DrawingId,
    pub title: String,
    pub strokes: Vec<Stroke>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Drawing {
    /// Assemble a new drawing from a validated request, assigning a fresh
    /// id and creation timestamps.
    pub fn create(input: CreateDrawing) -> Self {
        let now = types::now();
        Self {
            id: DrawingId::new_v4(),
            title: input.title,
            strokes: input.strokes,
            author: input.author,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Body of `POST /api/drawings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDrawing {
    pub title: String,
    pub strokes: Vec<Stroke>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl CreateDrawing {
    /// Validate an untyped JSON body.
    ///
    /// `title` must be a non-empty string and `strokes` an array of
    /// well-formed strokes. Any violation, including wrong JSON types,
    /// yields [`CoreError::Validation`].
    pub fn from_json(body: Value) -> Result<Self, CoreError> {
        let title_ok = matches!(body.get("title"), Some(Value::String(t)) if !t.is_empty());
        let strokes_ok = matches!(body.get("strokes"), Some(Value::Array(_)));
        if !title_ok || !strokes_ok {
            return Err(invalid());
        }
        serde_json::from_value(body).map_err(|_| invalid())
    }
}

fn invalid() -> CoreError {
    CoreError::Validation(INVALID_CREATE_MESSAGE.to_string())
}
