//! Persistent caches that make repeated runs cheaper

/// Path and segment to average color cache persisted as text
pub mod colors;
/// Resized candidate tiles persisted as image files
pub mod tiles;
