//! Error types for exports

use thiserror::Error;

/// Errors that can occur while producing an export
#[derive(Error, Debug)]
pub enum ExportError {
    /// CSV writer or reader failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error while writing the export file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output was not valid UTF-8
    #[error("Encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}
