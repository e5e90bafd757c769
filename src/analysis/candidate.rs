//! Candidate images and the pool they are selected from

use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::analysis::classifier::Classifier;
use crate::analysis::segment::Segment;
use crate::cache::tiles::ResizeCache;
use crate::io::error::{MosaicError, Result, file_system};
use crate::math::color::Rgb;

/// An image file that may be placed as a tile
///
/// Identity, equality and ordering are by path. Segment colors are computed
/// lazily and memoized for the lifetime of the value, including failures, so
/// an undecodable file is attempted at most once per segment per run.
#[derive(Debug)]
pub struct CandidateImage {
    path: PathBuf,
    colors: Mutex<HashMap<Segment, Option<Rgb>>>,
}

impl CandidateImage {
    /// Wrap the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            colors: Mutex::new(HashMap::new()),
        }
    }

    /// Candidate whose colors are already known, so no file is read for them
    pub fn with_segment_colors(
        path: impl Into<PathBuf>,
        colors: impl IntoIterator<Item = (Segment, Option<Rgb>)>,
    ) -> Self {
        Self {
            path: path.into(),
            colors: Mutex::new(colors.into_iter().collect()),
        }
    }

    /// Candidate of a single uniform color across every segment
    pub fn uniform(path: impl Into<PathBuf>, color: Rgb) -> Self {
        Self::with_segment_colors(
            path,
            Segment::ALL_SEGMENTS.map(|segment| (segment, Some(color))),
        )
    }

    /// File backing this candidate
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Average color of `segment`, classifying on first access
    ///
    /// A miss classifies every segment from one decode and memoizes all of
    /// them, keeping any colors that were already known.
    pub fn color(&self, segment: Segment, classifier: &Classifier) -> Option<Rgb> {
        let mut memo = self.colors.lock();
        if let Some(&color) = memo.get(&segment) {
            return color;
        }
        for (sampled, color) in classifier.classify_all(&self.path) {
            memo.entry(sampled).or_insert(color);
        }
        memo.get(&segment).copied().flatten()
    }

    /// Path of this candidate resized to `width` via `cache`
    ///
    /// # Errors
    ///
    /// Returns an error if the resized tile cannot be produced
    pub fn resized_tile(&self, cache: &mut ResizeCache, width: u32) -> Result<PathBuf> {
        cache.get_resized_tile(&self.path, width)
    }
}

impl PartialEq for CandidateImage {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for CandidateImage {}

impl Hash for CandidateImage {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl PartialOrd for CandidateImage {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CandidateImage {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path.cmp(&other.path)
    }
}

/// Ordered, non-empty collection of candidates
///
/// Selection refers to candidates by their index in this pool.
#[derive(Debug)]
pub struct CandidatePool {
    candidates: Vec<CandidateImage>,
}

impl CandidatePool {
    /// Build a pool from resolved candidate files, made absolute
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No paths are supplied
    /// - A relative path cannot be made absolute
    pub fn from_paths(paths: impl IntoIterator<Item = PathBuf>) -> Result<Self> {
        let candidates = paths
            .into_iter()
            .map(|path| {
                std::path::absolute(&path)
                    .map(CandidateImage::new)
                    .map_err(file_system(&path, "resolve absolute path"))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_candidates(candidates)
    }

    /// Build a pool from prepared candidates
    ///
    /// # Errors
    ///
    /// Returns an error if `candidates` is empty
    pub fn from_candidates(candidates: Vec<CandidateImage>) -> Result<Self> {
        if candidates.is_empty() {
            return Err(MosaicError::EmptyCandidatePool);
        }
        Ok(Self { candidates })
    }

    /// Number of candidates
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Always false for a constructed pool
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Candidate at `index`
    pub fn get(&self, index: usize) -> Option<&CandidateImage> {
        self.candidates.get(index)
    }

    /// Candidates in pool order
    pub fn iter(&self) -> std::slice::Iter<'_, CandidateImage> {
        self.candidates.iter()
    }

    /// Candidates as a slice
    pub fn as_slice(&self) -> &[CandidateImage] {
        &self.candidates
    }
}

impl<'a> IntoIterator for &'a CandidatePool {
    type Item = &'a CandidateImage;
    type IntoIter = std::slice::Iter<'a, CandidateImage>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}
