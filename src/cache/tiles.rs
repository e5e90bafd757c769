//! Disk-backed cache of candidate images resized to a tile width
//!
//! Layout is `<root>/<width>/<candidate file name>`. Entries are written once
//! and reused across runs. Candidates from different directories that share a
//! file name map to the same entry. JPEG and PNG candidates keep their format;
//! any other candidate is encoded as PNG under its file name plus `.png`.

use std::path::{Path, PathBuf};

use image::ImageFormat;
use log::debug;

use crate::io::configuration::FALLBACK_EXTENSION;
use crate::io::error::{Result, file_system, invalid_parameter};
use crate::io::image::{load_rgb, resize_smaller_side, save_rgb_as};

/// Hit and miss counters
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups served from an existing file
    pub hits: usize,
    /// Lookups that decoded, resized and encoded a new file
    pub misses: usize,
}

/// Resized tile cache rooted at a directory
#[derive(Debug)]
pub struct ResizeCache {
    root: PathBuf,

    /// Cache performance statistics for this process
    pub stats: CacheStats,
}

impl ResizeCache {
    /// Create a cache rooted at `root`; directories are created on demand
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            stats: CacheStats::default(),
        }
    }

    /// Cache root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the entry for `candidate` at `width`
    ///
    /// # Errors
    ///
    /// Returns an error if `candidate` has no file name component
    pub fn entry_path(&self, candidate: &Path, width: u32) -> Result<PathBuf> {
        let file_name = candidate.file_name().ok_or_else(|| {
            invalid_parameter(
                "candidate",
                &candidate.display(),
                &"path has no file name",
            )
        })?;
        let mut entry_name = file_name.to_os_string();
        if entry_format(candidate).is_none() {
            entry_name.push(".");
            entry_name.push(FALLBACK_EXTENSION);
        }
        Ok(self.root.join(width.to_string()).join(entry_name))
    }

    /// Path of `candidate` resized so its smaller side is `width`
    ///
    /// An existing entry is returned untouched; otherwise the candidate is
    /// decoded, resized bilinearly and encoded to the entry path first.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `candidate` has no file name
    /// - The candidate cannot be decoded
    /// - The cache directory or entry cannot be written
    pub fn get_resized_tile(&mut self, candidate: &Path, width: u32) -> Result<PathBuf> {
        let entry = self.entry_path(candidate, width)?;
        if entry.is_file() {
            self.stats.hits += 1;
            return Ok(entry);
        }

        self.stats.misses += 1;
        debug!("Resizing {} to {width}px", candidate.display());

        if let Some(dir) = entry.parent() {
            std::fs::create_dir_all(dir).map_err(file_system(dir, "create tile cache"))?;
        }

        let resized = resize_smaller_side(&load_rgb(candidate)?, width);
        let format = entry_format(candidate).unwrap_or(ImageFormat::Png);
        save_rgb_as(&resized, &entry, format)?;

        Ok(entry)
    }
}

/// Format a candidate's entry is stored in when it can keep its own
fn entry_format(candidate: &Path) -> Option<ImageFormat> {
    match ImageFormat::from_path(candidate) {
        Ok(format @ (ImageFormat::Jpeg | ImageFormat::Png)) => Some(format),
        _ => None,
    }
}
