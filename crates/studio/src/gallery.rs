//! Gallery of saved drawings with scaled previews.

use std::fmt;

use image::RgbaImage;
use scribble_core::drawing::Drawing;
use scribble_core::render;
use scribble_core::types::DrawingId;

use crate::client::{ClientError, DrawingApi};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryStatus {
    Loading,
    Loaded,
    Failed(String),
}

/// Text shown under a preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    pub title: String,
    /// Creation date, `YYYY-MM-DD`.
    pub created: String,
    pub author: Option<String>,
    pub stroke_count: usize,
}

impl fmt::Display for Caption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} · {}", self.title, self.created)?;
        if let Some(author) = &self.author {
            write!(f, " · by {author}")?;
        }
        let plural = if self.stroke_count == 1 { "" } else { "s" };
        write!(f, " · {} stroke{plural}", self.stroke_count)
    }
}

/// A 300x200 re-rendering of a drawing.
#[derive(Debug, Clone)]
pub struct Preview {
    pub id: DrawingId,
    pub image: RgbaImage,
    pub caption: Caption,
}

impl Preview {
    pub fn of(drawing: &Drawing) -> Self {
        Self {
            id: drawing.id,
            image: render::render_preview(&drawing.strokes),
            caption: Caption {
                title: drawing.title.clone(),
                created: drawing.created_at.format("%Y-%m-%d").to_string(),
                author: drawing.author.clone(),
                stroke_count: drawing.strokes.len(),
            },
        }
    }
}

#[derive(Debug)]
pub struct Gallery {
    status: GalleryStatus,
    drawings: Vec<Drawing>,
}

impl Default for Gallery {
    fn default() -> Self {
        Self::new()
    }
}

impl Gallery {
    pub fn new() -> Self {
        Self {
            status: GalleryStatus::Loading,
            drawings: Vec::new(),
        }
    }

    pub fn status(&self) -> &GalleryStatus {
        &self.status
    }

    pub fn drawings(&self) -> &[Drawing] {
        &self.drawings
    }

    /// Fetch the full list. A failure keeps the previously shown drawings
    /// and records the message; calling `load` again retries.
    pub async fn load(&mut self, api: &dyn DrawingApi) -> &GalleryStatus {
        self.status = GalleryStatus::Loading;
        match api.list().await {
            Ok(drawings) => {
                tracing::debug!(count = drawings.len(), "Gallery loaded");
                self.drawings = drawings;
                self.status = GalleryStatus::Loaded;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load drawings");
                self.status = GalleryStatus::Failed(format!("Failed to load drawings: {e}"));
            }
        }
        &self.status
    }

    /// Delete a shown drawing after `confirm` approves it.
    ///
    /// Returns `Ok(false)` without any request when the drawing is not
    /// shown or confirmation is declined. The drawing leaves the list only
    /// once the API reports success.
    pub async fn delete(
        &mut self,
        api: &dyn DrawingApi,
        id: &DrawingId,
        confirm: impl FnOnce(&Drawing) -> bool,
    ) -> Result<bool, ClientError> {
        let Some(drawing) = self.drawings.iter().find(|d| d.id == *id) else {
            return Ok(false);
        };
        if !confirm(drawing) {
            return Ok(false);
        }

        api.delete(id).await?;
        self.drawings.retain(|d| d.id != *id);
        tracing::info!(drawing_id = %id, "Deleted drawing from gallery");
        Ok(true)
    }

    pub fn previews(&self) -> Vec<Preview> {
        self.drawings.iter().map(Preview::of).collect()
    }
}
