//! Opaque RGB colors, Euclidean distance and the packed integer form stored in the color cache

use std::fmt;

use crate::io::configuration::{RED_DAMPEN_AMOUNT, RED_DAMPEN_THRESHOLD};

/// Alpha byte of the packed form; colors are always opaque
const OPAQUE_ALPHA: u32 = 0xFF00_0000;

/// 8-bit RGB color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel
    pub red: u8,
    /// Green channel
    pub green: u8,
    /// Blue channel
    pub blue: u8,
}

impl Rgb {
    /// Create a color from its channels
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Read a color from an `image` pixel
    pub const fn from_pixel(pixel: image::Rgb<u8>) -> Self {
        let [red, green, blue] = pixel.0;
        Self { red, green, blue }
    }

    /// Convert back to an `image` pixel
    pub const fn to_pixel(self) -> image::Rgb<u8> {
        image::Rgb([self.red, self.green, self.blue])
    }

    /// Pull a strong red channel down before the color is used as a query
    #[must_use]
    pub const fn dampened(self) -> Self {
        let red = if self.red > RED_DAMPEN_THRESHOLD {
            self.red - RED_DAMPEN_AMOUNT
        } else {
            self.red
        };
        Self { red, ..self }
    }

    /// Euclidean RGB distance, truncated to an integer
    pub fn distance(self, other: Self) -> u32 {
        let dr = f64::from(self.red) - f64::from(other.red);
        let dg = f64::from(self.green) - f64::from(other.green);
        let db = f64::from(self.blue) - f64::from(other.blue);
        dr.mul_add(dr, dg.mul_add(dg, db * db)).sqrt() as u32
    }

    /// Signed packed form: opaque alpha in the high byte, then red, green, blue
    pub const fn to_packed(self) -> i32 {
        (OPAQUE_ALPHA | ((self.red as u32) << 16) | ((self.green as u32) << 8) | self.blue as u32)
            as i32
    }

    /// Inverse of [`Rgb::to_packed`]; the alpha byte is ignored
    pub const fn from_packed(packed: i32) -> Self {
        let bits = packed as u32;
        Self {
            red: (bits >> 16) as u8,
            green: (bits >> 8) as u8,
            blue: bits as u8,
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}
