//! Progress bars for the classification and tiling phases

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static CLASSIFY_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Classifying [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

static TILE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix} [{bar:30.cyan/blue}] {pos}/{len} tiles ({eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates progress display for one composition run
///
/// Bars are handed out per phase; they are `Send + Sync`, so classification
/// workers advance the same bar concurrently.
pub struct ProgressReporter {
    multi_progress: MultiProgress,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter {
    /// Create a reporter drawing to stderr
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
        }
    }

    /// Create a reporter that draws nothing
    pub fn hidden() -> Self {
        Self {
            multi_progress: MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
        }
    }

    /// Bar for eager classification of `candidates` images
    pub fn start_classification(&self, candidates: usize) -> ProgressBar {
        let bar = ProgressBar::new(candidates as u64);
        bar.set_style(CLASSIFY_STYLE.clone());
        self.multi_progress.add(bar)
    }

    /// Bar for tiling the output image at `destination`
    pub fn start_block(&self, destination: &Path, cells: u64) -> ProgressBar {
        let bar = ProgressBar::new(cells);
        bar.set_style(TILE_STYLE.clone());
        bar.set_prefix(
            destination
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string(),
        );
        self.multi_progress.add(bar)
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        let _ = self.multi_progress.clear();
    }
}
