//! Resolving command-line inputs into an ordered list of candidate files

use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::io::configuration::IMAGE_EXTENSIONS;
use crate::io::error::{MosaicError, Result};

/// Test whether `path` carries a candidate image extension (case-insensitive)
pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Expand files and directories into candidate image paths
///
/// Files named directly are kept as given, in argument order. Directories
/// are then walked recursively in file-name order, keeping only image files.
/// Inputs that do not exist and unreadable directory entries are logged and
/// skipped.
///
/// # Errors
///
/// Returns an error if no candidate image is found
pub fn find_candidates(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    let mut directories = Vec::new();

    for input in inputs {
        if input.is_dir() {
            directories.push(input);
        } else if input.is_file() {
            found.push(input.clone());
        } else {
            warn!("Ignoring missing candidate input {}", input.display());
        }
    }

    for directory in directories {
        let before = found.len();
        for entry in WalkDir::new(directory).sort_by_file_name() {
            match entry {
                Ok(entry) if entry.file_type().is_file() && is_image(entry.path()) => {
                    found.push(entry.into_path());
                }
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable entry under {}: {e}", directory.display()),
            }
        }
        debug!(
            "Found {} images under {}",
            found.len() - before,
            directory.display()
        );
    }

    if found.is_empty() {
        return Err(MosaicError::EmptyCandidatePool);
    }
    Ok(found)
}
