//! Error types for PPTX to Beamer conversion.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting a presentation.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read or write a file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The input path does not exist or is not a regular file.
    #[error("Input file not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// The input could not be opened as a ZIP container.
    #[error("Invalid PPTX archive: {0}")]
    InvalidArchive(String),

    /// ZIP archive error while reading or extracting entries.
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing error in a presentation part.
    #[error("XML parsing error: {0}")]
    XmlError(String),
}
