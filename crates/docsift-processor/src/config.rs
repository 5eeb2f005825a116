//! Configuration for processing jobs

use crate::ProcessorError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Longest allowed per-document delay
const MAX_DELAY_MS: u64 = 60_000;

/// Configuration for the processor
///
/// # Examples
///
/// ```
/// use docsift_processor::ProcessorConfig;
///
/// // Default: paced like a remote extraction service
/// let config = ProcessorConfig::default();
/// assert_eq!(config.per_document_delay_ms, 1500);
///
/// // No delay between documents
/// let config = ProcessorConfig::instant();
/// assert_eq!(config.per_document_delay_ms, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Wait before each document is extracted (in milliseconds)
    /// Default: 1500
    pub per_document_delay_ms: u64,

    /// Stop the job at the first extraction failure
    /// Default: false (failed documents are recorded and the job continues)
    pub fail_fast: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            per_document_delay_ms: 1500,
            fail_fast: false,
        }
    }
}

impl ProcessorConfig {
    /// No delay between documents
    pub fn instant() -> Self {
        Self {
            per_document_delay_ms: 0,
            ..Self::default()
        }
    }

    /// Get the per-document delay as Duration
    pub fn per_document_delay(&self) -> Duration {
        Duration::from_millis(self.per_document_delay_ms)
    }

    /// Check that values are in range
    pub fn validate(&self) -> Result<(), ProcessorError> {
        if self.per_document_delay_ms > MAX_DELAY_MS {
            return Err(ProcessorError::Config(format!(
                "per_document_delay_ms must be at most {} (got {})",
                MAX_DELAY_MS, self.per_document_delay_ms
            )));
        }
        Ok(())
    }

    /// Parse and validate a TOML fragment
    pub fn from_toml(s: &str) -> Result<Self, ProcessorError> {
        let config: ProcessorConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String, ProcessorError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
