//! Mathematical utilities for the algorithm

/// RGB colors and color distance
pub mod color;
