//! Candidate image classification: segments, sampling boxes and memoized colors

/// Candidate images and the selection pool
pub mod candidate;
/// Cache-backed color classification of image files
pub mod classifier;
/// Sampling boxes and average colors
pub mod sampling;
/// Named image sub-regions
pub mod segment;
