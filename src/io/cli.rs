//! Command-line interface for composing a photo mosaic from a folder of images

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use log::info;

use crate::algorithm::context::RunContext;
use crate::algorithm::executor::{MosaicComposer, MosaicConfig};
use crate::analysis::sampling::SampleConfig;
use crate::io::configuration::{
    COLOR_CACHE_FILE, DEFAULT_COLS, DEFAULT_NEAREST_THRESHOLD, DEFAULT_RESIZED_WIDTH,
    DEFAULT_ROWS, DEFAULT_SAMPLE_PERCENTAGE, DEFAULT_TILE_HEIGHT, DEFAULT_TILE_WIDTH,
    TILE_CACHE_DIR,
};
use crate::io::discovery::find_candidates;
use crate::io::error::Result;
use crate::io::output::OutputKind;

#[derive(Parser, Debug)]
#[command(name = "greedymosaic")]
#[command(
    author,
    version,
    about = "Rebuild an image as a mosaic of other images"
)]
/// Command-line arguments for the mosaic composer
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Image to rebuild
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Candidate image files or directories searched recursively
    #[arg(value_name = "CANDIDATES", required = true, num_args = 1..)]
    pub candidates: Vec<PathBuf>,

    /// Directory receiving output images
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Number of output image rows
    #[arg(short, long, default_value_t = DEFAULT_ROWS)]
    pub rows: u32,

    /// Number of output image columns
    #[arg(short, long, default_value_t = DEFAULT_COLS)]
    pub cols: u32,

    /// Size the source's smaller side is resized to; one tile per pixel
    #[arg(short, long, default_value_t = DEFAULT_RESIZED_WIDTH)]
    pub width: u32,

    /// Width of each tile in pixels
    #[arg(long, default_value_t = DEFAULT_TILE_WIDTH)]
    pub tile_width: u32,

    /// Height of each tile in pixels
    #[arg(long, default_value_t = DEFAULT_TILE_HEIGHT)]
    pub tile_height: u32,

    /// Initial color distance threshold for matching
    #[arg(short, long, default_value_t = DEFAULT_NEAREST_THRESHOLD)]
    pub threshold: u32,

    /// Classify every candidate before tiling, in parallel
    #[arg(short, long)]
    pub eager: bool,

    /// Match on each cell's own color only, ignoring neighbors
    #[arg(long)]
    pub no_neighbors: bool,

    /// Worker threads for eager classification (defaults to all cores)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Fraction of each candidate's width sampled for its color
    #[arg(long, default_value_t = DEFAULT_SAMPLE_PERCENTAGE)]
    pub sample_width: f32,

    /// Fraction of each candidate's height sampled for its color
    #[arg(long, default_value_t = DEFAULT_SAMPLE_PERCENTAGE)]
    pub sample_height: f32,

    /// Color cache file
    #[arg(long, default_value = COLOR_CACHE_FILE)]
    pub color_cache: PathBuf,

    /// Resized tile cache directory
    #[arg(long, default_value = TILE_CACHE_DIR)]
    pub tile_cache: PathBuf,

    /// Write HTML pages referencing the tiles instead of images
    #[arg(long)]
    pub html: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Composition parameters selected by the arguments
    pub fn mosaic_config(&self) -> MosaicConfig {
        MosaicConfig {
            resized_width: self.width,
            rows: self.rows,
            cols: self.cols,
            tile_width: self.tile_width,
            tile_height: self.tile_height,
            threshold: self.threshold,
            out_dir: self.out_dir.clone(),
            eager: self.eager,
            neighbor_matching: !self.no_neighbors,
            workers: self.workers,
            output: if self.html {
                OutputKind::Html
            } else {
                OutputKind::Raster
            },
        }
    }

    /// Candidate sampling region selected by the arguments
    ///
    /// # Errors
    ///
    /// Returns an error if either percentage lies outside (0, 1]
    pub fn sample_config(&self) -> Result<SampleConfig> {
        SampleConfig::new(self.sample_width, self.sample_height)
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Runs one composition from parsed arguments
pub struct MosaicRunner {
    cli: Cli,
}

impl MosaicRunner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Discover candidates, open the caches and compose the mosaic
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any argument is out of range
    /// - No candidate image is found
    /// - The color cache is malformed
    /// - Composition fails
    pub fn run(self) -> Result<Vec<PathBuf>> {
        let start_time = Instant::now();
        let config = self.cli.mosaic_config();
        config.validate()?;

        let candidates = find_candidates(&self.cli.candidates)?;
        info!("Found {} candidate images", candidates.len());

        let context = RunContext::open(
            &self.cli.color_cache,
            &self.cli.tile_cache,
            self.cli.sample_config()?,
            self.cli.should_show_progress(),
        )?;

        let mut composer = MosaicComposer::new(config, context)?;
        let written = composer.compose(&self.cli.source, candidates)?;

        info!("Finished in {:.1?}", start_time.elapsed());
        Ok(written)
    }
}
