//! Output block geometry and per-pixel color queries on the resized source
//!
//! The resized source is cut into `rows x cols` equal blocks (remainder pixels
//! on the right and bottom edges are dropped). Each block becomes one output
//! image in which every source pixel is replaced by a tile.

use image::RgbImage;

use crate::analysis::segment::Segment;
use crate::io::error::{MosaicError, Result};
use crate::math::color::Rgb;

/// Side of a source pixel on which a neighbor lies
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Pixel above
    Up,
    /// Pixel to the right
    Right,
    /// Pixel below
    Down,
    /// Pixel to the left
    Left,
}

impl Direction {
    /// Every direction, clockwise from `Up`
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Segment of the cell facing this neighbor
    pub const fn segment(self) -> Segment {
        match self {
            Self::Up => Segment::Top,
            Self::Right => Segment::Right,
            Self::Down => Segment::Bottom,
            Self::Left => Segment::Left,
        }
    }

    /// Neighbor coordinates of (`x`, `y`), if they are non-negative
    pub fn step(self, x: u32, y: u32) -> Option<(u32, u32)> {
        match self {
            Self::Up => y.checked_sub(1).map(|ny| (x, ny)),
            Self::Right => x.checked_add(1).map(|nx| (nx, y)),
            Self::Down => y.checked_add(1).map(|ny| (x, ny)),
            Self::Left => x.checked_sub(1).map(|nx| (nx, y)),
        }
    }
}

/// Query colors of the four pixels adjacent to a cell; `None` past an image edge
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NeighborColors {
    /// Pixel above
    pub up: Option<Rgb>,
    /// Pixel to the right
    pub right: Option<Rgb>,
    /// Pixel below
    pub down: Option<Rgb>,
    /// Pixel to the left
    pub left: Option<Rgb>,
}

impl NeighborColors {
    /// No neighbor information
    pub const fn none() -> Self {
        Self {
            up: None,
            right: None,
            down: None,
            left: None,
        }
    }

    /// Color in `direction`
    pub const fn get(&self, direction: Direction) -> Option<Rgb> {
        match direction {
            Direction::Up => self.up,
            Direction::Right => self.right,
            Direction::Down => self.down,
            Direction::Left => self.left,
        }
    }

    /// All four colors, or `None` when any neighbor is missing
    pub fn complete(&self) -> Option<[(Direction, Rgb); 4]> {
        let [up, right, down, left] = Direction::ALL.map(|d| self.get(d).map(|c| (d, c)));
        Some([up?, right?, down?, left?])
    }
}

/// Dampened color of the source pixel at (`x`, `y`)
pub fn query_color(image: &RgbImage, x: u32, y: u32) -> Option<Rgb> {
    image
        .get_pixel_checked(x, y)
        .map(|pixel| Rgb::from_pixel(*pixel).dampened())
}

/// Dampened color of the cell at (`x`, `y`) that a tile must match
///
/// # Errors
///
/// Returns an error if the cell lies outside `image`
pub fn target_color(image: &RgbImage, x: u32, y: u32) -> Result<Rgb> {
    query_color(image, x, y).ok_or(MosaicError::PixelOutOfBounds {
        x,
        y,
        width: image.width(),
        height: image.height(),
    })
}

/// Dampened colors of the pixels adjacent to (`x`, `y`) within the whole image
pub fn neighbor_colors(image: &RgbImage, x: u32, y: u32) -> NeighborColors {
    let color_at = |direction: Direction| {
        direction
            .step(x, y)
            .and_then(|(nx, ny)| query_color(image, nx, ny))
    };

    NeighborColors {
        up: color_at(Direction::Up),
        right: color_at(Direction::Right),
        down: color_at(Direction::Down),
        left: color_at(Direction::Left),
    }
}

/// One output image's share of the resized source
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Block {
    /// Block row index
    pub row: u32,
    /// Block column index
    pub col: u32,
    /// First source column covered
    pub origin_x: u32,
    /// First source row covered
    pub origin_y: u32,
    /// Source columns covered
    pub width: u32,
    /// Source rows covered
    pub height: u32,
}

impl Block {
    /// Source pixel coordinates covered, in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> + use<> {
        let Self {
            origin_x,
            origin_y,
            width,
            height,
            ..
        } = *self;
        (origin_y..origin_y + height)
            .flat_map(move |y| (origin_x..origin_x + width).map(move |x| (x, y)))
    }

    /// Number of source pixels covered
    pub const fn cell_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Pixel offset inside the output image of the tile for source pixel (`x`, `y`)
    pub const fn tile_offset(
        &self,
        x: u32,
        y: u32,
        tile_width: u32,
        tile_height: u32,
    ) -> (u32, u32) {
        (
            tile_width * (x - self.origin_x),
            tile_height * (y - self.origin_y),
        )
    }
}

/// Partition of a resized source into output blocks
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockLayout {
    /// Number of block rows
    pub rows: u32,
    /// Number of block columns
    pub cols: u32,
    /// Source columns per block
    pub block_width: u32,
    /// Source rows per block
    pub block_height: u32,
}

impl BlockLayout {
    /// Split an `image_width` x `image_height` source into `rows x cols` blocks
    pub const fn new(image_width: u32, image_height: u32, rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            block_width: if cols == 0 { 0 } else { image_width / cols },
            block_height: if rows == 0 { 0 } else { image_height / rows },
        }
    }

    /// Test whether blocks cover no pixels
    pub const fn is_degenerate(&self) -> bool {
        self.block_width == 0 || self.block_height == 0
    }

    /// Number of blocks
    pub const fn block_count(&self) -> u32 {
        self.rows * self.cols
    }

    /// Output image size for blocks tiled at `tile_width` x `tile_height`
    ///
    /// `None` when either side overflows `u32`.
    pub const fn canvas_size(&self, tile_width: u32, tile_height: u32) -> Option<(u32, u32)> {
        match (
            self.block_width.checked_mul(tile_width),
            self.block_height.checked_mul(tile_height),
        ) {
            (Some(width), Some(height)) => Some((width, height)),
            _ => None,
        }
    }

    /// Blocks in row-major order
    pub fn blocks(&self) -> impl Iterator<Item = Block> + use<> {
        let Self {
            rows,
            cols,
            block_width,
            block_height,
        } = *self;
        (0..rows).flat_map(move |row| {
            (0..cols).map(move |col| Block {
                row,
                col,
                origin_x: block_width * col,
                origin_y: block_height * row,
                width: block_width,
                height: block_height,
            })
        })
    }
}
