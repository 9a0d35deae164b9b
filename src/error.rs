//! Error types for the doctext library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for doctext operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading documents, extracting text or
/// searching it.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// No working directory was supplied.
    #[error("You must provide a path as an argument")]
    MissingArgument,

    /// The supplied working directory does not exist.
    #[error("The path does not exist")]
    InvalidPath(PathBuf),

    /// The file format could not be determined.
    #[error("Unknown file format")]
    UnknownFormat,

    /// The file format is recognized but not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Error reading ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// Invalid or malformed data in the document.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A required document component is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// The search strings file could not be understood.
    #[error("Invalid search strings: {0}")]
    SearchStrings(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SearchStrings(err.to_string())
    }
}
