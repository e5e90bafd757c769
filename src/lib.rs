//! Photo mosaic composition by greedy nearest-color tile selection
//!
//! A source image is shrunk so that each remaining pixel becomes one tile.
//! Every pixel is replaced by the candidate image whose average color is
//! closest, preferring candidates whose edge colors agree with the adjacent
//! source pixels and rotating among equally good matches to avoid repeats.

#![forbid(unsafe_code)]

/// Candidate selection, eager classification and composition orchestration
pub mod algorithm;
/// Sampling regions, average colors and the candidate pool
pub mod analysis;
/// Persistent color and resized tile caches
pub mod cache;
/// Input/output operations and error handling
pub mod io;
/// RGB colors and distances
pub mod math;
/// Output block layout and neighbor color queries
pub mod spatial;

pub use io::error::{MosaicError, Result};
