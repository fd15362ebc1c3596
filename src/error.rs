//! Error types for the twp library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for twp operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, extracting or rendering a workbook.
#[derive(Error, Debug)]
pub enum Error {
    /// The path does not exist, is not a regular file, or does not end in
    /// `.twb` / `.twbx`.
    #[error("{} is not a valid tableau workbook path", .0.display())]
    InvalidInput(PathBuf),

    /// The workbook could not be parsed, or an element the extractors rely
    /// on is missing.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reading the packaged workbook archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error during rendering.
    #[error("Render error: {0}")]
    Render(String),
}

impl Error {
    /// Shorthand for a [`Error::MalformedDocument`] built from any message.
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Error::MalformedDocument(msg.into())
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<roxmltree::Error> for Error {
    fn from(err: roxmltree::Error) -> Self {
        Error::MalformedDocument(format!("XML parse error: {}", err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}
