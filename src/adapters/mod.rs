//! Input adapters feeding the pure splitting core.
//!
//! The core never touches the filesystem itself: these modules scan
//! folders, load feature tables, and perform container-format conversion,
//! then hand the core an already-materialized collection.

pub mod convert;
pub mod directory;
pub mod feature_table;

use std::fmt;
use std::path::PathBuf;

/// Error types for the input adapters
#[derive(Debug)]
pub enum AdapterError {
    /// Source folder does not exist
    FolderNotFound(PathBuf),
    /// Feature file does not exist
    TableNotFound(PathBuf),
    /// A named column is missing from the feature file header
    MissingColumn(String),
    /// A weight cell was non-numeric, negative, or not finite
    InvalidWeight { id: String, value: String },
    /// Target image format is not one we can encode
    UnsupportedFormat(String),
    IoError(std::io::Error),
    CsvError(csv::Error),
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdapterError::FolderNotFound(path) => {
                write!(f, "The folder does not exist: {:?}", path)
            }
            AdapterError::TableNotFound(path) => {
                write!(f, "The feature file does not exist: {:?}", path)
            }
            AdapterError::MissingColumn(column) => {
                write!(f, "Column {:?} does not exist in the feature file", column)
            }
            AdapterError::InvalidWeight { id, value } => {
                write!(f, "Invalid weight {:?} for item {:?}", value, id)
            }
            AdapterError::UnsupportedFormat(ext) => {
                write!(f, "Unsupported target image format: {:?}", ext)
            }
            AdapterError::IoError(e) => write!(f, "I/O error: {}", e),
            AdapterError::CsvError(e) => write!(f, "Feature file error: {}", e),
        }
    }
}

impl std::error::Error for AdapterError {}

impl From<std::io::Error> for AdapterError {
    fn from(error: std::io::Error) -> Self {
        AdapterError::IoError(error)
    }
}

impl From<csv::Error> for AdapterError {
    fn from(error: csv::Error) -> Self {
        AdapterError::CsvError(error)
    }
}
