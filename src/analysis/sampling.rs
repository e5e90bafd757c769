//! Sampling boxes and average-color computation
//!
//! A [`ColorBox`] is derived from an image's dimensions, a [`SampleConfig`] and a
//! [`Segment`]. The crop percentages first shrink the image symmetrically to the
//! `All` box; the directional segments then take bands of that box. The bands
//! are not mirror images of each other: `Left` ends at a third of the cropped
//! right edge while `Right` starts at two thirds of the cropped left margin, and
//! likewise for `Top`/`Bottom`.

use std::fmt;

use image::RgbImage;

use crate::analysis::segment::Segment;
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::math::color::Rgb;

/// Cropping applied before averaging a candidate's colors
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleConfig {
    width_percentage: f32,
    height_percentage: f32,
    thresholds: [u8; 3],
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            width_percentage: 1.0,
            height_percentage: 1.0,
            thresholds: [0; 3],
        }
    }
}

impl SampleConfig {
    /// Create a config keeping the given fractions of width and height
    ///
    /// # Errors
    ///
    /// Returns an error if either percentage lies outside (0, 1]
    pub fn new(width_percentage: f32, height_percentage: f32) -> Result<Self> {
        for (parameter, value) in [
            ("sample_width", width_percentage),
            ("sample_height", height_percentage),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &"must lie in the interval (0, 1]",
                ));
            }
        }

        Ok(Self {
            width_percentage,
            height_percentage,
            thresholds: [0; 3],
        })
    }

    /// Attach per-channel thresholds (red, green, blue)
    ///
    /// Carried with the config but not consulted by sampling.
    #[must_use]
    pub const fn with_thresholds(mut self, thresholds: [u8; 3]) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Fraction of the width kept
    pub const fn width_percentage(&self) -> f32 {
        self.width_percentage
    }

    /// Fraction of the height kept
    pub const fn height_percentage(&self) -> f32 {
        self.height_percentage
    }

    /// Per-channel thresholds (red, green, blue)
    pub const fn thresholds(&self) -> [u8; 3] {
        self.thresholds
    }
}

/// Half-open pixel rectangle `[first_row, last_row) x [first_col, last_col)`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColorBox {
    /// First sampled row
    pub first_row: u32,
    /// One past the last sampled row
    pub last_row: u32,
    /// First sampled column
    pub first_col: u32,
    /// One past the last sampled column
    pub last_col: u32,
}

impl ColorBox {
    /// Create a box from explicit bounds
    pub const fn new(first_row: u32, last_row: u32, first_col: u32, last_col: u32) -> Self {
        Self {
            first_row,
            last_row,
            first_col,
            last_col,
        }
    }

    /// Test whether the box spans zero rows or zero columns
    pub const fn is_empty(&self) -> bool {
        self.last_row <= self.first_row || self.last_col <= self.first_col
    }

    /// Number of pixels covered
    pub const fn pixel_count(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            (self.last_row - self.first_row) as u64 * (self.last_col - self.first_col) as u64
        }
    }
}

impl fmt::Display for ColorBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rows {}..{}, cols {}..{}",
            self.first_row, self.last_row, self.first_col, self.last_col
        )
    }
}

/// Compute the sampling box for `segment` of a `width` x `height` image
pub fn compute_box(width: u32, height: u32, config: &SampleConfig, segment: Segment) -> ColorBox {
    let real_first_row = ((1.0 - config.height_percentage) / 2.0 * height as f32) as u32;
    let real_last_row = height.saturating_sub(real_first_row);
    let real_first_col = ((1.0 - config.width_percentage) / 2.0 * width as f32) as u32;
    let real_last_col = width.saturating_sub(real_first_col);

    match segment {
        Segment::All => ColorBox::new(real_first_row, real_last_row, real_first_col, real_last_col),
        Segment::Left => ColorBox::new(
            real_first_row,
            real_last_row,
            real_first_col,
            real_last_col / 3,
        ),
        Segment::Right => ColorBox::new(
            real_first_row,
            real_last_row,
            2 * real_first_col / 3,
            real_last_col,
        ),
        Segment::Top => ColorBox::new(
            real_first_row,
            real_last_row / 3,
            real_first_col,
            real_last_col,
        ),
        Segment::Bottom => ColorBox::new(
            2 * real_first_row / 3,
            real_last_row,
            real_first_col,
            real_last_col,
        ),
    }
}

/// Average RGB over every pixel inside `color_box`, truncating each channel
///
/// # Errors
///
/// Returns an error if the box covers no pixels of the image
pub fn average_color(image: &RgbImage, color_box: &ColorBox) -> Result<Rgb> {
    let mut sums = [0u64; 3];
    let mut pixel_count = 0u64;

    for row in color_box.first_row..color_box.last_row {
        for col in color_box.first_col..color_box.last_col {
            if let Some(pixel) = image.get_pixel_checked(col, row) {
                for (sum, &channel) in sums.iter_mut().zip(pixel.0.iter()) {
                    *sum += u64::from(channel);
                }
                pixel_count += 1;
            }
        }
    }

    if pixel_count == 0 {
        return Err(MosaicError::EmptySampleRegion {
            color_box: *color_box,
        });
    }

    let [red, green, blue] = sums.map(|sum| (sum / pixel_count) as u8);
    Ok(Rgb::new(red, green, blue))
}

/// Average color of `segment` of `image` under `config`
///
/// # Errors
///
/// Returns an error if the segment's box is empty for this image
pub fn sample_color(image: &RgbImage, config: &SampleConfig, segment: Segment) -> Result<Rgb> {
    let color_box = compute_box(image.width(), image.height(), config, segment);
    average_color(image, &color_box)
}
