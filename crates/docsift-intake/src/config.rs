//! Intake configuration

use crate::IntakeError;
use serde::{Deserialize, Serialize};

const MIB: u64 = 1024 * 1024;

/// Rules applied to every upload
///
/// # Examples
///
/// ```
/// use docsift_intake::IntakeConfig;
///
/// let config = IntakeConfig::default();
/// assert_eq!(config.max_file_size_bytes, 10 * 1024 * 1024);
/// assert!(config.accepts("application/pdf"));
///
/// let config = IntakeConfig::text_only();
/// assert!(!config.accepts("application/pdf"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Largest accepted file
    /// Default: 10 MiB
    pub max_file_size_bytes: u64,

    /// Accepted MIME types
    /// Default: PDF, DOCX, plain text, PNG and JPEG
    pub accepted_types: Vec<String>,

    /// Most files accepted in one upload; the rest are rejected
    /// Default: 50
    pub max_files_per_upload: usize,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 10 * MIB,
            accepted_types: vec![
                "application/pdf".to_string(),
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
                    .to_string(),
                "text/plain".to_string(),
                "image/png".to_string(),
                "image/jpeg".to_string(),
            ],
            max_files_per_upload: 50,
        }
    }
}

impl IntakeConfig {
    /// Plain text files only, 1 MiB each
    pub fn text_only() -> Self {
        Self {
            max_file_size_bytes: MIB,
            accepted_types: vec!["text/plain".to_string()],
            max_files_per_upload: 50,
        }
    }

    /// Whether `mime_type` is on the accepted list (case-insensitive)
    pub fn accepts(&self, mime_type: &str) -> bool {
        self.accepted_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(mime_type))
    }

    /// Check that the limits make sense
    pub fn validate(&self) -> Result<(), IntakeError> {
        if self.max_file_size_bytes == 0 {
            return Err(IntakeError::Config(
                "max_file_size_bytes must be greater than 0".to_string(),
            ));
        }
        if self.max_files_per_upload == 0 {
            return Err(IntakeError::Config(
                "max_files_per_upload must be greater than 0".to_string(),
            ));
        }
        if self.accepted_types.is_empty() {
            return Err(IntakeError::Config(
                "accepted_types must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a TOML fragment
    pub fn from_toml(s: &str) -> Result<Self, IntakeError> {
        let config: IntakeConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String, IntakeError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
