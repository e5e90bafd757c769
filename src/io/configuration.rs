//! Algorithm constants and runtime configuration defaults

// Candidate selection tuning
/// Seed threshold for the nearest-color search
pub const DEFAULT_NEAREST_THRESHOLD: u32 = 20;
/// Largest candidate set kept after threshold narrowing
pub const MAX_NARROWED_CANDIDATES: usize = 50;
/// Upper bound on the Euclidean distance between two 8-bit RGB colors (ceil of 255 * sqrt 3)
pub const MAX_COLOR_DISTANCE: u32 = 442;

// Query colors with a strong red channel are pulled down before matching
/// Red values above this are dampened
pub const RED_DAMPEN_THRESHOLD: u8 = 100;
/// Amount subtracted from a dampened red channel
pub const RED_DAMPEN_AMOUNT: u8 = 50;

// Default values for configurable parameters
/// Width the source image is resized to before tiling
pub const DEFAULT_RESIZED_WIDTH: u32 = 200;
/// Number of output image rows
pub const DEFAULT_ROWS: u32 = 1;
/// Number of output image columns
pub const DEFAULT_COLS: u32 = 1;
/// Width in pixels of each placed tile
pub const DEFAULT_TILE_WIDTH: u32 = 25;
/// Height in pixels of each placed tile
pub const DEFAULT_TILE_HEIGHT: u32 = 25;
/// Fraction of each candidate's width sampled for color
pub const DEFAULT_SAMPLE_PERCENTAGE: f32 = 1.0;

// Persistent cache locations
/// Color cache file name, relative to the working directory
pub const COLOR_CACHE_FILE: &str = "mosaic-color-cache.txt";
/// Resized tile cache directory, relative to the working directory
pub const TILE_CACHE_DIR: &str = "tile-cache";

// Candidate discovery
/// File extensions accepted as candidate images (compared case-insensitively)
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

// Output settings
/// Suffix added to single-image output filenames
pub const OUTPUT_SUFFIX: &str = "-out";
/// Extension used when the source image has none, and for tiles resized
/// from candidates that are neither JPEG nor PNG
pub const FALLBACK_EXTENSION: &str = "png";
/// File name of the page that lays out multi-block output
pub const HTML_INDEX_FILE: &str = "index.html";
