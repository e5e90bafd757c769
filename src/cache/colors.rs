//! Persistent path-and-segment to color cache backed by a line-oriented text file
//!
//! Each record is `<absolutePath>:<signedPackedRgb>`. Whole-image colors use the
//! bare path, so files written for `All` stay readable by tools that only know
//! that form; other segments append `#<segment>` to the path. Records are split
//! on the last `:` so Windows drive letters survive, but nothing in the path is
//! escaped.

use std::collections::HashMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;
use parking_lot::RwLock;

use crate::analysis::segment::Segment;
use crate::io::error::{MosaicError, Result, file_system};
use crate::math::color::Rgb;

/// Separator between a path and its non-`All` segment name
const SEGMENT_SEPARATOR: char = '#';

/// Identifies one cached color: a candidate file and the segment sampled
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColorKey {
    path: PathBuf,
    segment: Segment,
}

impl ColorKey {
    /// Create a key for `segment` of the file at `path`
    pub fn new(path: impl Into<PathBuf>, segment: Segment) -> Self {
        Self {
            path: path.into(),
            segment,
        }
    }

    /// Candidate file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sampled segment
    pub const fn segment(&self) -> Segment {
        self.segment
    }

    /// Text form written before the `:` of a cache record
    pub fn to_record_key(&self) -> String {
        let path = self.path.to_string_lossy();
        match self.segment {
            Segment::All => path.into_owned(),
            segment => format!("{path}{SEGMENT_SEPARATOR}{}", segment.name()),
        }
    }

    /// Inverse of [`ColorKey::to_record_key`]
    pub fn from_record_key(key: &str) -> Self {
        key.rsplit_once(SEGMENT_SEPARATOR)
            .and_then(|(path, name)| {
                Segment::from_name(name)
                    .filter(|segment| *segment != Segment::All)
                    .map(|segment| Self::new(path, segment))
            })
            .unwrap_or_else(|| Self::new(key, Segment::All))
    }
}

/// Thread-safe color cache bound to a file on disk
///
/// Reads and writes are synchronized so eager classification workers can
/// share one cache. Nothing reaches disk until [`ColorCache::flush`].
#[derive(Debug)]
pub struct ColorCache {
    file: PathBuf,
    entries: RwLock<HashMap<ColorKey, Rgb>>,
}

impl ColorCache {
    /// Create an empty cache that will flush to `file`
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Load the cache stored at `file`
    ///
    /// A missing file yields an empty cache. Blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file exists but cannot be read as UTF-8 text
    /// - Any non-blank line is not `<key>:<signed integer>`
    pub fn load(file: impl Into<PathBuf>) -> Result<Self> {
        let file = file.into();
        if !file.exists() {
            info!("No color cache at {}, starting empty", file.display());
            return Ok(Self::new(file));
        }

        let contents =
            fs::read_to_string(&file).map_err(file_system(&file, "read color cache"))?;

        let mut entries = HashMap::new();
        for (index, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let (key, color) = parse_record(line).ok_or_else(|| MosaicError::MalformedCacheLine {
                path: file.clone(),
                line_number: index + 1,
                line: line.to_string(),
            })?;
            entries.insert(key, color);
        }

        info!(
            "Loaded {} cached colors from {}",
            entries.len(),
            file.display()
        );

        Ok(Self {
            file,
            entries: RwLock::new(entries),
        })
    }

    /// Backing file path
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Look up a cached color
    pub fn get(&self, key: &ColorKey) -> Option<Rgb> {
        self.entries.read().get(key).copied()
    }

    /// Store a color, replacing any previous value
    pub fn put(&self, key: ColorKey, color: Rgb) {
        self.entries.write().insert(key, color);
    }

    /// Number of cached colors
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Test if nothing is cached
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Write every entry to the backing file, one record per line
    ///
    /// Records are sorted so repeated flushes of the same contents are byte-identical.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its parent directory cannot be written
    pub fn flush(&self) -> Result<()> {
        let mut records: Vec<(String, i32)> = self
            .entries
            .read()
            .iter()
            .map(|(key, color)| (key.to_record_key(), color.to_packed()))
            .collect();
        records.sort_unstable();

        info!(
            "Serializing {} colors to {}",
            records.len(),
            self.file.display()
        );

        if let Some(parent) = self.file.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(file_system(parent, "create directory"))?;
        }

        let handle =
            fs::File::create(&self.file).map_err(file_system(&self.file, "create color cache"))?;
        let mut writer = BufWriter::new(handle);
        for (key, packed) in &records {
            writeln!(writer, "{key}:{packed}")
                .map_err(file_system(&self.file, "write color cache"))?;
        }
        writer
            .flush()
            .map_err(file_system(&self.file, "flush color cache"))?;

        Ok(())
    }
}

fn parse_record(line: &str) -> Option<(ColorKey, Rgb)> {
    let (key, packed) = line.rsplit_once(':')?;
    if key.is_empty() {
        return None;
    }
    let packed = packed.trim().parse::<i32>().ok()?;
    Some((ColorKey::from_record_key(key), Rgb::from_packed(packed)))
}
