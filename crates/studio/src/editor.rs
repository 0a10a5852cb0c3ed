//! Freehand canvas editor.
//!
//! Pointer events build strokes on an 800x600 canvas. [`CanvasEditor::save`]
//! validates the drawing, consults the moderation gate when it is ready and
//! submits it through a [`DrawingApi`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use image::RgbaImage;
use scribble_core::drawing::{CreateDrawing, Drawing, Point, Stroke};
use scribble_core::moderation::ModerationResult;
use scribble_core::render;
use scribble_core::types;

use crate::client::{ClientError, DrawingApi};
use crate::moderation::ModerationGate;

/// Selectable stroke colours; the first is the default.
pub const PALETTE: [&str; 7] = [
    "#000000", "#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FF00FF", "#00FFFF",
];

pub const MIN_BRUSH_SIZE: u32 = 1;
pub const MAX_BRUSH_SIZE: u32 = 20;
pub const DEFAULT_BRUSH_SIZE: u32 = 2;

/// Author recorded on every drawing saved from the editor.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    #[error("Please enter a title for your drawing")]
    MissingTitle,

    #[error("Please draw something before saving")]
    NoStrokes,

    #[error("{}", flagged_message(.0))]
    Flagged(ModerationResult),

    #[error("Failed to save drawing: {0}")]
    Api(#[from] ClientError),
}

fn flagged_message(verdict: &ModerationResult) -> String {
    format!(
        "Content Warning: Your drawing contains inappropriate content and cannot be saved. \
         Flagged categories: {}. Confidence: {}%",
        verdict.flagged_categories.join(", "),
        (verdict.confidence * 100.0).round()
    )
}

/// Observes whether a save is in flight, from outside the editor.
#[derive(Debug, Clone, Default)]
pub struct SavingIndicator(Arc<AtomicBool>);

impl SavingIndicator {
    pub fn is_saving(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Clears the saving flag when a save finishes or is abandoned.
struct SavingGuard(Arc<AtomicBool>);

impl SavingGuard {
    fn start(flag: &Arc<AtomicBool>) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(Arc::clone(flag))
    }
}

impl Drop for SavingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[derive(Debug)]
pub struct CanvasEditor {
    title: String,
    strokes: Vec<Stroke>,
    /// Points of the stroke being drawn, while the pointer is held.
    current: Option<Vec<Point>>,
    color: &'static str,
    brush_size: u32,
    saving: SavingIndicator,
}

impl Default for CanvasEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasEditor {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            strokes: Vec::new(),
            current: None,
            color: PALETTE[0],
            brush_size: DEFAULT_BRUSH_SIZE,
            saving: SavingIndicator::default(),
        }
    }

    // ---- pointer input ----

    pub fn pointer_down(&mut self, at: Point) {
        self.current = Some(vec![at]);
    }

    /// Ignored unless the pointer is held.
    pub fn pointer_move(&mut self, to: Point) {
        if let Some(points) = self.current.as_mut() {
            points.push(to);
        }
    }

    /// Finish the stroke in progress. Returns the committed stroke, or
    /// `None` when nothing was drawn or the stroke had a single point.
    pub fn pointer_up(&mut self) -> Option<&Stroke> {
        let points = self.current.take()?;
        if points.len() < 2 {
            return None;
        }

        self.strokes.push(Stroke {
            id: uuid::Uuid::new_v4().to_string(),
            points,
            color: self.color.to_string(),
            width: f64::from(self.brush_size),
            timestamp: types::epoch_millis(),
        });
        self.strokes.last()
    }

    /// Leaving the canvas finishes the stroke like releasing the pointer.
    pub fn pointer_leave(&mut self) -> Option<&Stroke> {
        self.pointer_up()
    }

    pub fn is_drawing(&self) -> bool {
        self.current.is_some()
    }

    // ---- tools ----

    pub fn color(&self) -> &str {
        self.color
    }

    /// Select a palette colour (case-insensitive). Returns false and keeps
    /// the current colour for anything outside the palette.
    pub fn set_color(&mut self, color: &str) -> bool {
        match PALETTE.iter().find(|c| c.eq_ignore_ascii_case(color)) {
            Some(&c) => {
                self.color = c;
                true
            }
            None => false,
        }
    }

    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    pub fn set_brush_size(&mut self, size: u32) {
        self.brush_size = size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Drop every stroke, including the one in progress.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.current = None;
    }

    /// The canvas bitmap: committed strokes plus the stroke in progress.
    pub fn render(&self) -> RgbaImage {
        match &self.current {
            Some(points) => {
                let mut strokes = self.strokes.clone();
                strokes.push(Stroke {
                    id: String::new(),
                    points: points.clone(),
                    color: self.color.to_string(),
                    width: f64::from(self.brush_size),
                    timestamp: 0,
                });
                render::render_canvas(&strokes)
            }
            None => render::render_canvas(&self.strokes),
        }
    }

    // ---- saving ----

    pub fn is_saving(&self) -> bool {
        self.saving.is_saving()
    }

    pub fn saving_indicator(&self) -> SavingIndicator {
        self.saving.clone()
    }

    /// Validate, moderate and submit the drawing.
    ///
    /// The gate is consulted only when it is ready; otherwise the save goes
    /// ahead unchecked. On success the title and strokes are reset. On any
    /// failure the editor keeps its content so the user can retry.
    pub async fn save(
        &mut self,
        api: &dyn DrawingApi,
        gate: Option<&ModerationGate>,
    ) -> Result<Drawing, SaveError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(SaveError::MissingTitle);
        }
        if self.strokes.is_empty() {
            return Err(SaveError::NoStrokes);
        }

        let _saving = SavingGuard::start(&self.saving.0);

        if let Some(gate) = gate {
            if gate.is_ready().await {
                let verdict = gate.moderate(&self.render()).await;
                if verdict.is_nsfw {
                    tracing::warn!(
                        confidence = verdict.confidence,
                        categories = ?verdict.flagged_categories,
                        "Save blocked by moderation"
                    );
                    return Err(SaveError::Flagged(verdict));
                }
            }
        }

        let input = CreateDrawing {
            title,
            strokes: self.strokes.clone(),
            author: Some(ANONYMOUS_AUTHOR.to_string()),
        };
        let drawing = api.create(&input).await?;

        tracing::info!(drawing_id = %drawing.id, strokes = drawing.strokes.len(), "Saved drawing");
        self.title.clear();
        self.clear();
        Ok(drawing)
    }
}
