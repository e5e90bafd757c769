//! Spatial layout of the mosaic
//!
//! This module contains:
//! - Output block partitioning of the resized source
//! - Per-pixel and neighbor color queries

/// Block geometry and neighbor lookups
pub mod grid;

pub use grid::{Block, BlockLayout, Direction, NeighborColors};
