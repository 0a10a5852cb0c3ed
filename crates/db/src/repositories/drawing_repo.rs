//! Repository for the `drawings` table.

use scribble_core::drawing::Drawing;
use scribble_core::types::{self, DrawingId};
use sqlx::SqlitePool;

use crate::models::drawing::DrawingRow;
use crate::DbError;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, strokes, author, created_at, updated_at";

/// Create, list, fetch and delete drawings. Drawings are never updated.
pub struct DrawingRepo;

impl DrawingRepo {
    /// Insert a drawing, returning the row as stored.
    pub async fn create(pool: &SqlitePool, drawing: &Drawing) -> Result<Drawing, DbError> {
        let strokes = serde_json::to_string(&drawing.strokes).map_err(DbError::Encode)?;
        let query = format!(
            "INSERT INTO drawings (id, title, strokes, author, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, DrawingRow>(&query)
            .bind(drawing.id.to_string())
            .bind(&drawing.title)
            .bind(strokes)
            .bind(&drawing.author)
            .bind(types::to_iso(&drawing.created_at))
            .bind(types::to_iso(&drawing.updated_at))
            .fetch_one(pool)
            .await?;
        Drawing::try_from(row)
    }

    /// List all drawings, newest first.
    ///
    /// Rows created within the same millisecond fall back to insertion order.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Drawing>, DbError> {
        let query =
            format!("SELECT {COLUMNS} FROM drawings ORDER BY created_at DESC, rowid DESC");
        let rows = sqlx::query_as::<_, DrawingRow>(&query)
            .fetch_all(pool)
            .await?;
        rows.into_iter().map(Drawing::try_from).collect()
    }

    /// Find a drawing by id.
    pub async fn find_by_id(
        pool: &SqlitePool,
        id: &DrawingId,
    ) -> Result<Option<Drawing>, DbError> {
        let query = format!("SELECT {COLUMNS} FROM drawings WHERE id = ?");
        sqlx::query_as::<_, DrawingRow>(&query)
            .bind(id.to_string())
            .fetch_optional(pool)
            .await?
            .map(Drawing::try_from)
            .transpose()
    }

    /// Delete a drawing by id. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: &DrawingId) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM drawings WHERE id = ?")
            .bind(id.to_string())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of stored drawings.
    pub async fn count(pool: &SqlitePool) -> Result<i64, DbError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM drawings")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
