//! Image decoding, aspect-preserving resize and encoding

use std::path::Path;

use image::{ImageFormat, RgbImage, imageops::FilterType};

use crate::io::error::{MosaicError, Result, file_system};

/// Decode the image at `path` into 8-bit RGB
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not a decodable image
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    image::open(path)
        .map(|img| img.to_rgb8())
        .map_err(|e| MosaicError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Dimensions after scaling so the smaller side equals `size`
///
/// The larger side keeps the aspect ratio using truncating integer math and
/// never drops below one pixel.
pub fn resized_dimensions(width: u32, height: u32, size: u32) -> (u32, u32) {
    let scale = |side: u32, smaller: u32| {
        let scaled = u64::from(side) * u64::from(size) / u64::from(smaller.max(1));
        u32::try_from(scaled).unwrap_or(u32::MAX).max(1)
    };

    if width < height {
        (size, scale(height, width))
    } else {
        (scale(width, height), size)
    }
}

/// Bilinear resize so the smaller side of `img` becomes exactly `size`
pub fn resize_smaller_side(img: &RgbImage, size: u32) -> RgbImage {
    let (width, height) = resized_dimensions(img.width(), img.height(), size);
    if (width, height) == img.dimensions() {
        return img.clone();
    }
    image::imageops::resize(img, width, height, FilterType::Triangle)
}

/// Encode `img` to `path`, choosing the format from the extension
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The extension names no supported format or encoding fails
pub fn save_rgb(img: &RgbImage, path: &Path) -> Result<()> {
    create_parent(path)?;
    img.save(path).map_err(|e| MosaicError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Encode `img` to `path` as `format`, whatever the extension says
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - Encoding fails
pub fn save_rgb_as(img: &RgbImage, path: &Path, format: ImageFormat) -> Result<()> {
    create_parent(path)?;
    img.save_with_format(path, format)
        .map_err(|e| MosaicError::ImageExport {
            path: path.to_path_buf(),
            source: e,
        })
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(file_system(parent, "create directory"))?;
    }
    Ok(())
}
