//! Row shape of the `drawings` table and its conversion to the domain model.

use scribble_core::drawing::{Drawing, Stroke};
use scribble_core::types::{self, DrawingId};
use sqlx::FromRow;

use crate::DbError;

/// A raw row from the `drawings` table. Every column is stored as text.
#[derive(Debug, Clone, FromRow)]
pub struct DrawingRow {
    pub id: String,
    pub title: String,
    pub strokes: String,
    pub author: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<DrawingRow> for Drawing {
    type Error = DbError;

    /// Any malformed column is a hard error; rows are never patched up.
    fn try_from(row: DrawingRow) -> Result<Self, Self::Error> {
        let id = DrawingId::parse_str(&row.id).map_err(|e| decode("id", e))?;
        let strokes: Vec<Stroke> =
            serde_json::from_str(&row.strokes).map_err(|e| decode("strokes", e))?;
        let created_at = types::parse_iso(&row.created_at).map_err(|e| decode("created_at", e))?;
        let updated_at = types::parse_iso(&row.updated_at).map_err(|e| decode("updated_at", e))?;

        Ok(Drawing {
            id,
            title: row.title,
            strokes,
            // Empty author strings are treated as absent.
            author: row.author.filter(|a| !a.is_empty()),
            created_at,
            updated_at,
        })
    }
}

fn decode(column: &'static str, err: impl std::fmt::Display) -> DbError {
    DbError::Decode {
        column,
        message: err.to_string(),
    }
}
