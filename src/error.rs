//! Error types for the sheet splitting library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the sheet splitting library
#[derive(Error, Debug)]
pub enum Error {
    /// Document has no pages to split
    #[error("Document has no pages")]
    EmptyDocument,

    /// Page rotation is not a right angle
    #[error("Invalid page rotation: {0} degrees (must be a multiple of 90)")]
    InvalidRotation(f64),

    /// Crop box cannot be bisected along the split axis
    #[error("Invalid crop box geometry: {width} x {height}")]
    InvalidGeometry { width: f64, height: f64 },

    /// Page index past the end of the document
    #[error("Page index {index} is out of range (document has {count} pages)")]
    PageOutOfRange { index: usize, count: usize },

    /// Page dictionary is missing something we need
    #[error("Malformed page: {0}")]
    MalformedPage(String),

    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Output file already exists and overwriting was not requested
    #[error("Output file already exists: {}", .0.display())]
    OutputExists(PathBuf),
}
