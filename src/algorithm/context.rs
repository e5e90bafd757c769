//! Shared state carried through one composition run

use std::path::Path;

use crate::analysis::classifier::Classifier;
use crate::analysis::sampling::SampleConfig;
use crate::cache::colors::ColorCache;
use crate::cache::tiles::ResizeCache;
use crate::io::error::Result;
use crate::io::progress::ProgressReporter;

/// Caches, classifier and progress display owned by a run
///
/// Passed explicitly to the composer instead of living in globals, so several
/// runs can coexist in one process with separate caches.
pub struct RunContext {
    /// Color classifier over the persistent color cache
    pub classifier: Classifier,
    /// Resized tile cache
    pub tiles: ResizeCache,
    /// Progress display, absent when running quietly
    pub progress: Option<ProgressReporter>,
}

impl RunContext {
    /// Assemble a context from ready-made parts
    pub const fn new(
        classifier: Classifier,
        tiles: ResizeCache,
        progress: Option<ProgressReporter>,
    ) -> Self {
        Self {
            classifier,
            tiles,
            progress,
        }
    }

    /// Load the color cache from `color_cache_file` and root the tile cache at `tile_cache_dir`
    ///
    /// # Errors
    ///
    /// Returns an error if the color cache exists but cannot be read or parsed
    pub fn open(
        color_cache_file: &Path,
        tile_cache_dir: &Path,
        sample_config: SampleConfig,
        show_progress: bool,
    ) -> Result<Self> {
        Ok(Self::new(
            Classifier::new(sample_config, ColorCache::load(color_cache_file)?),
            ResizeCache::new(tile_cache_dir),
            show_progress.then(ProgressReporter::new),
        ))
    }
}
