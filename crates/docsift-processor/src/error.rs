//! Error types for processing jobs

use thiserror::Error;

/// Errors that can occur while running a processing job
#[derive(Error, Debug)]
pub enum ProcessorError {
    /// Extraction failed and the job was configured to stop
    #[error("Extraction failed for '{document}': {message}")]
    Extraction {
        /// Document name
        document: String,
        /// Extractor error message
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration could not be parsed
    #[error("Failed to parse processing config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("Failed to serialize processing config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Worker error (tokio runtime issues)
    #[error("Worker error: {0}")]
    Worker(String),
}
