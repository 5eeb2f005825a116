//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Persistence error
    #[error(transparent)]
    Store(#[from] docsift_store::StoreError),

    /// Schema draft error
    #[error(transparent)]
    Draft(#[from] docsift_schema::DraftError),

    /// Export error
    #[error(transparent)]
    Export(#[from] docsift_export::ExportError),

    /// Upload error
    #[error(transparent)]
    Intake(#[from] docsift_intake::IntakeError),

    /// Processing error
    #[error(transparent)]
    Processor(#[from] docsift_processor::ProcessorError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Lookup by id or name failed
    #[error("{0} not found")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
