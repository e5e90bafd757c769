//! Average-color classification of candidate files backed by the color cache

use std::path::Path;

use log::{debug, warn};

use crate::analysis::sampling::{SampleConfig, sample_color};
use crate::analysis::segment::Segment;
use crate::cache::colors::{ColorCache, ColorKey};
use crate::io::error::Result;
use crate::io::image::load_rgb;
use crate::math::color::Rgb;

/// Samples candidate images under one [`SampleConfig`], memoizing through a [`ColorCache`]
#[derive(Debug)]
pub struct Classifier {
    config: SampleConfig,
    cache: ColorCache,
}

impl Classifier {
    /// Create a classifier over `cache`
    pub const fn new(config: SampleConfig, cache: ColorCache) -> Self {
        Self { config, cache }
    }

    /// Sampling configuration
    pub const fn config(&self) -> &SampleConfig {
        &self.config
    }

    /// Underlying persistent cache
    pub const fn cache(&self) -> &ColorCache {
        &self.cache
    }

    /// Average color of `segment` of the image at `path`
    ///
    /// Served from the cache when present. Otherwise every segment is sampled
    /// from a single decode via [`Classifier::classify_all`].
    pub fn classify(&self, path: &Path, segment: Segment) -> Option<Rgb> {
        if let Some(color) = self.cache.get(&ColorKey::new(path, segment)) {
            debug!("Found cached {segment} color for {}", path.display());
            return Some(color);
        }

        self.classify_all(path)
            .into_iter()
            .find_map(|(sampled, color)| (sampled == segment).then_some(color))
            .flatten()
    }

    /// Average colors of every segment of the image at `path`
    ///
    /// The file is decoded at most once, and only when some segment is missing
    /// from the cache. Each sampled color is cached. Undecodable files and
    /// segments whose box is empty for this image yield `None` and are not
    /// cached.
    pub fn classify_all(&self, path: &Path) -> [(Segment, Option<Rgb>); 5] {
        let cached = Segment::ALL_SEGMENTS
            .map(|segment| (segment, self.cache.get(&ColorKey::new(path, segment))));
        if cached.iter().all(|(_, color)| color.is_some()) {
            debug!("Found cached colors for {}", path.display());
            return cached;
        }

        let image = match load_rgb(path) {
            Ok(image) => image,
            Err(e) => {
                warn!("Skipping candidate: {e}");
                return cached;
            }
        };

        cached.map(|(segment, known)| {
            let color = known.or_else(|| match sample_color(&image, &self.config, segment) {
                Ok(color) => {
                    self.cache.put(ColorKey::new(path, segment), color);
                    Some(color)
                }
                Err(e) => {
                    warn!("No {segment} color for {}: {e}", path.display());
                    None
                }
            });
            (segment, color)
        })
    }

    /// Persist the color cache
    ///
    /// # Errors
    ///
    /// Returns an error if the cache file cannot be written
    pub fn flush(&self) -> Result<()> {
        self.cache.flush()
    }
}
