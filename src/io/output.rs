//! Destinations that placed tiles are written to
//!
//! The composer only talks to [`Output`]; [`RasterOutput`] paints tiles onto
//! an image and [`HtmlOutput`] emits a page of `<img>` tags pointing at the
//! cached tiles.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::RgbImage;
use log::info;

use crate::io::configuration::HTML_INDEX_FILE;
use crate::io::error::{Result, file_system};
use crate::io::image::{load_rgb, save_rgb};

/// Sink receiving tiles at pixel offsets
pub trait Output {
    /// Place the tile image stored at `tile` with its top-left corner at (`x`, `y`)
    ///
    /// # Errors
    ///
    /// Returns an error if the tile cannot be read or the destination written
    fn write(&mut self, tile: &Path, x: u32, y: u32) -> Result<()>;

    /// Flush and finalize the destination, returning the path written
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be written
    fn close(self: Box<Self>) -> Result<PathBuf>;
}

/// Kind of sink opened for each output block
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputKind {
    /// Composite image
    #[default]
    Raster,
    /// HTML page referencing tile files
    Html,
}

impl OutputKind {
    /// Open a sink for a `width` x `height` output at `destination`
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be created
    pub fn open(self, destination: &Path, width: u32, height: u32) -> Result<Box<dyn Output>> {
        info!(
            "Creating new {width}x{height} output for {}",
            destination.display()
        );
        Ok(match self {
            Self::Raster => Box::new(RasterOutput::open(destination, width, height)),
            Self::Html => Box::new(HtmlOutput::open(destination, width, height)?),
        })
    }
}

/// Paints tiles onto an in-memory canvas and encodes it on close
pub struct RasterOutput {
    destination: PathBuf,
    canvas: RgbImage,
}

impl RasterOutput {
    /// Create a black canvas of the given size
    pub fn open(destination: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            destination: destination.into(),
            canvas: RgbImage::new(width, height),
        }
    }

    /// Canvas painted so far
    pub const fn canvas(&self) -> &RgbImage {
        &self.canvas
    }
}

impl Output for RasterOutput {
    fn write(&mut self, tile: &Path, x: u32, y: u32) -> Result<()> {
        let tile_image = load_rgb(tile)?;
        image::imageops::overlay(&mut self.canvas, &tile_image, i64::from(x), i64::from(y));
        Ok(())
    }

    fn close(self: Box<Self>) -> Result<PathBuf> {
        info!("Writing to {}", self.destination.display());
        save_rgb(&self.canvas, &self.destination)?;
        Ok(self.destination)
    }
}

/// Writes `<destination>.html` with one `<img>` per tile
pub struct HtmlOutput {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl HtmlOutput {
    /// Create the page and write its header
    ///
    /// # Errors
    ///
    /// Returns an error if the page file cannot be created
    pub fn open(destination: &Path, width: u32, _height: u32) -> Result<Self> {
        let mut name = destination.file_name().unwrap_or_default().to_os_string();
        name.push(".html");
        let path = destination.with_file_name(name);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(file_system(parent, "create directory"))?;
        }

        let file = File::create(&path).map_err(file_system(&path, "create html output"))?;
        let mut output = Self {
            path,
            writer: BufWriter::new(file),
        };
        output.emit(&format!(
            "<html>\n<body>\n<div style='width:{width}px; white-space:nowrap'>"
        ))?;
        Ok(output)
    }

    fn emit(&mut self, text: &str) -> Result<()> {
        writeln!(self.writer, "{text}").map_err(file_system(&self.path, "write html output"))
    }
}

impl Output for HtmlOutput {
    fn write(&mut self, tile: &Path, x: u32, y: u32) -> Result<()> {
        if x == 0 && y > 0 {
            self.emit("<br/>")?;
        }
        let source = std::path::absolute(tile).map_err(file_system(tile, "resolve tile path"))?;
        self.emit(&format!(
            "<img src='{}' style='position:relative'/>",
            source.display()
        ))
    }

    fn close(mut self: Box<Self>) -> Result<PathBuf> {
        self.emit("</div>\n</body>\n</html>")?;
        self.writer
            .flush()
            .map_err(file_system(&self.path, "flush html output"))?;
        info!("Wrote {}", self.path.display());
        Ok(self.path)
    }
}

/// Write an index page arranging `rows x cols` block images named by `block_name`
///
/// # Errors
///
/// Returns an error if the index file cannot be written
pub fn write_html_index(
    dir: &Path,
    rows: u32,
    cols: u32,
    block_name: impl Fn(u32, u32) -> String,
) -> Result<PathBuf> {
    let path = dir.join(HTML_INDEX_FILE);
    let mut page = String::from(
        "<html>\n<head>\n<style>\nimg { margin:0; padding:0}\nbody {white-space:nowrap;}\n</style>\n</head>\n<body>\n",
    );
    for row in 0..rows {
        for col in 0..cols {
            page.push_str(&format!("<img src='{}' />", block_name(row, col)));
        }
        page.push_str("<br/>\n");
    }
    page.push_str("</body>\n</html>\n");

    std::fs::write(&path, page).map_err(file_system(&path, "write html index"))?;
    Ok(path)
}
