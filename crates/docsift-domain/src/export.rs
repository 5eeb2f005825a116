//! Export configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Comma-separated values
    #[default]
    Csv,
}

/// Row orientation of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStructure {
    /// One row per document, one column per variable
    #[default]
    Wide,
    /// One row per extracted value
    Long,
}

impl fmt::Display for ExportStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportStructure::Wide => f.write_str("wide"),
            ExportStructure::Long => f.write_str("long"),
        }
    }
}

impl FromStr for ExportStructure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wide" => Ok(ExportStructure::Wide),
            "long" => Ok(ExportStructure::Long),
            other => Err(format!("Unknown export structure: {}", other)),
        }
    }
}

/// How extraction results are laid out when exported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportConfig {
    /// Output format
    #[serde(default)]
    pub format: ExportFormat,

    /// Row orientation
    #[serde(default)]
    pub structure: ExportStructure,

    /// Add confidence columns
    #[serde(default)]
    pub include_confidence: bool,

    /// Add a source text column (long structure only)
    #[serde(default)]
    pub include_source_text: bool,
}

impl ExportConfig {
    /// Wide export without optional columns
    pub fn wide() -> Self {
        Self {
            structure: ExportStructure::Wide,
            ..Default::default()
        }
    }

    /// Long export without optional columns
    pub fn long() -> Self {
        Self {
            structure: ExportStructure::Long,
            ..Default::default()
        }
    }

    /// Toggle confidence columns
    pub fn with_confidence(mut self, include: bool) -> Self {
        self.include_confidence = include;
        self
    }

    /// Toggle the source text column
    pub fn with_source_text(mut self, include: bool) -> Self {
        self.include_source_text = include;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExportConfig::default();
        assert_eq!(config.format, ExportFormat::Csv);
        assert_eq!(config.structure, ExportStructure::Wide);
        assert!(!config.include_confidence);
    }

    #[test]
    fn test_json_shape() {
        let config = ExportConfig::long().with_confidence(true);
        let json = serde_json::to_value(config).unwrap();
        assert_eq!(json["format"], "csv");
        assert_eq!(json["structure"], "long");
        assert_eq!(json["includeConfidence"], true);
    }
}
