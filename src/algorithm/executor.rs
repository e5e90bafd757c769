//! Composition orchestration: classification, source resizing and the tiling loop
//!
//! A run moves through [`Phase`]s in order:
//! `Init -> EagerClassify (optional) -> ResizeSource -> Tiling -> Done`.
//! The tiling loop is sequential. The selector's usage table is shared
//! by every block, so cells are always visited block by block in row-major
//! order.

use std::borrow::Cow;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use image::RgbImage;
use log::{debug, info};

use crate::algorithm::classification::classify_eagerly;
use crate::algorithm::context::RunContext;
use crate::algorithm::selection::CandidateSelector;
use crate::analysis::candidate::CandidatePool;
use crate::io::configuration::{
    DEFAULT_COLS, DEFAULT_NEAREST_THRESHOLD, DEFAULT_RESIZED_WIDTH, DEFAULT_ROWS,
    DEFAULT_TILE_HEIGHT, DEFAULT_TILE_WIDTH, FALLBACK_EXTENSION, OUTPUT_SUFFIX,
};
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::io::image::{load_rgb, resize_smaller_side};
use crate::io::output::{OutputKind, write_html_index};
use crate::spatial::grid::{neighbor_colors, target_color};
use crate::spatial::{Block, BlockLayout};

/// Parameters of one composition run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MosaicConfig {
    /// Smaller side of the source after resizing; one tile per resized pixel
    pub resized_width: u32,
    /// Number of output image rows
    pub rows: u32,
    /// Number of output image columns
    pub cols: u32,
    /// Width in pixels of each placed tile
    pub tile_width: u32,
    /// Height in pixels of each placed tile
    pub tile_height: u32,
    /// Seed threshold for nearest-color matching
    pub threshold: u32,
    /// Directory receiving output images
    pub out_dir: Option<PathBuf>,
    /// Classify every candidate up front on a worker pool
    pub eager: bool,
    /// Match tile edges against neighboring source pixels
    pub neighbor_matching: bool,
    /// Worker threads for eager classification; all cores when `None`
    pub workers: Option<usize>,
    /// Kind of output written per block
    pub output: OutputKind,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            resized_width: DEFAULT_RESIZED_WIDTH,
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            tile_width: DEFAULT_TILE_WIDTH,
            tile_height: DEFAULT_TILE_HEIGHT,
            threshold: DEFAULT_NEAREST_THRESHOLD,
            out_dir: None,
            eager: false,
            neighbor_matching: true,
            workers: None,
            output: OutputKind::Raster,
        }
    }
}

impl MosaicConfig {
    /// Check that every size and count is positive
    ///
    /// # Errors
    ///
    /// Returns an error naming the first zero-valued parameter
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("resized_width", self.resized_width),
            ("rows", self.rows),
            ("cols", self.cols),
            ("tile_width", self.tile_width),
            ("tile_height", self.tile_height),
            ("threshold", self.threshold),
        ];
        for (parameter, value) in positive {
            if value == 0 {
                return Err(invalid_parameter(parameter, &value, &"must be positive"));
            }
        }

        if self.workers == Some(0) {
            return Err(invalid_parameter("workers", &0, &"must be positive"));
        }

        Ok(())
    }

    /// Whether more than one output image is produced
    pub const fn is_multi_block(&self) -> bool {
        self.rows > 1 || self.cols > 1
    }
}

/// Stage a composer is in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Validating inputs
    Init,
    /// Classifying every candidate in parallel
    EagerClassify,
    /// Decoding and resizing the source image
    ResizeSource,
    /// Placing tiles block by block
    Tiling,
    /// Every block written
    Done,
}

/// Base output name: `<stem>-<resized>w<tile width>xh<tile height>`
pub fn output_base_name(source: &Path, config: &MosaicConfig) -> String {
    format!(
        "{}-{}w{}xh{}",
        source.file_stem().unwrap_or_default().to_string_lossy(),
        config.resized_width,
        config.tile_width,
        config.tile_height
    )
}

fn output_extension(source: &Path) -> Cow<'_, str> {
    source
        .extension()
        .map_or(Cow::Borrowed(FALLBACK_EXTENSION), OsStr::to_string_lossy)
}

fn block_file_name(source: &Path, config: &MosaicConfig, row: u32, col: u32) -> String {
    let base = output_base_name(source, config);
    let extension = output_extension(source);
    if config.is_multi_block() {
        format!("{base}-{row}-{col}.{extension}")
    } else {
        format!("{base}{OUTPUT_SUFFIX}.{extension}")
    }
}

/// Directory receiving the output images of a run
///
/// A single-block run writes to `out_dir` or the working directory. A
/// multi-block run defaults to `<base>-<rows>x<cols>-out`.
pub fn output_directory(source: &Path, config: &MosaicConfig) -> PathBuf {
    match &config.out_dir {
        Some(dir) => dir.clone(),
        None if config.is_multi_block() => PathBuf::from(format!(
            "{}-{}x{}{OUTPUT_SUFFIX}",
            output_base_name(source, config),
            config.rows,
            config.cols
        )),
        None => PathBuf::from("."),
    }
}

/// Destination of the output image for block (`row`, `col`)
pub fn block_output_path(source: &Path, config: &MosaicConfig, row: u32, col: u32) -> PathBuf {
    output_directory(source, config).join(block_file_name(source, config, row, col))
}

/// Composes a mosaic of one source image from a candidate pool
pub struct MosaicComposer {
    config: MosaicConfig,
    context: RunContext,
    selector: CandidateSelector,
    phase: Phase,
}

impl MosaicComposer {
    /// Create a composer for a validated configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn new(config: MosaicConfig, context: RunContext) -> Result<Self> {
        config.validate()?;
        let selector = CandidateSelector::new(config.threshold, config.neighbor_matching);
        Ok(Self {
            config,
            context,
            selector,
            phase: Phase::Init,
        })
    }

    /// Current phase
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Run configuration
    pub const fn config(&self) -> &MosaicConfig {
        &self.config
    }

    /// Caches and progress display of this run
    pub const fn context(&self) -> &RunContext {
        &self.context
    }

    /// Candidate selector with its usage history
    pub const fn selector(&self) -> &CandidateSelector {
        &self.selector
    }

    /// Compose `source` from the candidate files at `candidates`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `source` does not exist
    /// - `candidates` is empty
    /// - Any phase of [`Self::compose_pool`] fails
    pub fn compose(&mut self, source: &Path, candidates: Vec<PathBuf>) -> Result<Vec<PathBuf>> {
        self.phase = Phase::Init;
        check_source(source)?;
        let pool = CandidatePool::from_paths(candidates)?;
        self.compose_pool(source, &pool)
    }

    /// Compose `source` from an existing pool, returning the files written
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `source` does not exist or cannot be decoded
    /// - The resized source is too small for the requested blocks
    /// - The output canvas for the requested tile size overflows
    /// - Eager classification fails
    /// - The color cache cannot be flushed
    /// - No candidate carries a usable color
    /// - A tile or output file cannot be read or written
    pub fn compose_pool(&mut self, source: &Path, pool: &CandidatePool) -> Result<Vec<PathBuf>> {
        self.phase = Phase::Init;
        check_source(source)?;
        info!(
            "Composing {} from {} candidates",
            source.display(),
            pool.len()
        );

        if self.config.eager {
            self.phase = Phase::EagerClassify;
            classify_eagerly(
                pool,
                &self.context.classifier,
                self.config.workers,
                self.context.progress.as_ref(),
            )?;
        }

        self.phase = Phase::ResizeSource;
        let resized = resize_smaller_side(&load_rgb(source)?, self.config.resized_width);
        let layout = BlockLayout::new(
            resized.width(),
            resized.height(),
            self.config.rows,
            self.config.cols,
        );
        if layout.is_degenerate() {
            return Err(invalid_parameter(
                "rows/cols",
                &format!("{}x{}", self.config.rows, self.config.cols),
                &format!(
                    "resized source is only {}x{} pixels",
                    resized.width(),
                    resized.height()
                ),
            ));
        }

        let canvas = canvas_size(&layout, &self.config)?;

        self.phase = Phase::Tiling;
        let mut written = Vec::new();
        for block in layout.blocks() {
            written.push(self.compose_block(source, &resized, pool, canvas, block)?);
        }

        if self.config.is_multi_block() && self.config.output == OutputKind::Raster {
            let index = write_html_index(
                &output_directory(source, &self.config),
                self.config.rows,
                self.config.cols,
                |row, col| block_file_name(source, &self.config, row, col),
            )?;
            info!("Wrote index {}", index.display());
        }

        self.context.classifier.flush()?;
        if let Some(progress) = &self.context.progress {
            progress.finish();
        }
        let stats = self.context.tiles.stats;
        info!(
            "Done: {} output files, tile cache {} hits / {} misses",
            written.len(),
            stats.hits,
            stats.misses
        );
        self.phase = Phase::Done;
        Ok(written)
    }

    fn compose_block(
        &mut self,
        source: &Path,
        image: &RgbImage,
        pool: &CandidatePool,
        (width, height): (u32, u32),
        block: Block,
    ) -> Result<PathBuf> {
        let Self {
            config,
            context,
            selector,
            ..
        } = self;
        let RunContext {
            classifier,
            tiles,
            progress,
        } = context;

        let destination = block_output_path(source, config, block.row, block.col);
        let mut sink = config.output.open(&destination, width, height)?;
        let bar = progress
            .as_ref()
            .map(|p| p.start_block(&destination, block.cell_count()));

        for (x, y) in block.cells() {
            if x == block.origin_x {
                debug!("Starting row {y}");
            }
            let target = target_color(image, x, y)?;
            let neighbors = neighbor_colors(image, x, y);

            let candidate = selector
                .select(pool, classifier, target, &neighbors)
                .and_then(|index| pool.get(index))
                .ok_or(MosaicError::NoMatchingCandidate { x, y })?;

            let tile = candidate.resized_tile(tiles, config.tile_width)?;
            let (offset_x, offset_y) =
                block.tile_offset(x, y, config.tile_width, config.tile_height);
            sink.write(&tile, offset_x, offset_y)?;

            if let Some(bar) = &bar {
                bar.inc(1);
            }
        }

        if let Some(bar) = bar {
            bar.finish_and_clear();
        }
        sink.close()
    }
}

fn canvas_size(layout: &BlockLayout, config: &MosaicConfig) -> Result<(u32, u32)> {
    layout
        .canvas_size(config.tile_width, config.tile_height)
        .ok_or_else(|| {
            let (parameter, tile, cells) =
                if layout.block_width.checked_mul(config.tile_width).is_none() {
                    ("tile_width", config.tile_width, layout.block_width)
                } else {
                    ("tile_height", config.tile_height, layout.block_height)
                };
            invalid_parameter(
                parameter,
                &tile,
                &format!("{cells} tiles of this size overflow the output canvas"),
            )
        })
}

fn check_source(source: &Path) -> Result<()> {
    if source.is_file() {
        Ok(())
    } else {
        Err(MosaicError::MissingSource {
            path: source.to_path_buf(),
        })
    }
}
