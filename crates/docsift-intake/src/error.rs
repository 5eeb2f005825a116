//! Intake error types

use thiserror::Error;

/// Errors that can occur while preparing an upload
#[derive(Error, Debug)]
pub enum IntakeError {
    /// File could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Failed to parse intake config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("Failed to serialize intake config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Configuration values are inconsistent
    #[error("Configuration error: {0}")]
    Config(String),
}
