//! Scribble domain layer.
//!
//! Pure types and rules shared by the storage layer, the HTTP API and the
//! studio client: the drawing model and its validation, stroke
//! rasterisation and preview scaling, and the moderation verdict rules.

pub mod drawing;
pub mod error;
pub mod moderation;
pub mod render;
pub mod types;
