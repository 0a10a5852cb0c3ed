//! Repository layer: one stateless struct per table.

pub mod drawing_repo;

pub use drawing_repo::DrawingRepo;
