//! Client side of the drawing app: an HTTP client for the drawings API,
//! the content moderation gate, the canvas editor and the gallery.

pub mod client;
pub mod config;
pub mod editor;
pub mod gallery;
pub mod moderation;
