//! Input/output: command line, configuration, files and progress display

/// Command-line parsing and the run entry point
pub mod cli;
/// Algorithm constants and defaults
pub mod configuration;
/// Candidate file discovery
pub mod discovery;
/// Error types
pub mod error;
/// Image decoding, resizing and encoding
pub mod image;
/// Raster and HTML output sinks
pub mod output;
/// Progress bars
pub mod progress;
