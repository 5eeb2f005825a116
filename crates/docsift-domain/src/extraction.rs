//! Extraction results - the values pulled out of one document

use crate::{DocumentId, VariableId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single extracted value: string, number, boolean or null
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Boolean value
    Bool(bool),
    /// Numeric value
    Number(f64),
    /// Text value
    Text(String),
    /// No value was found
    #[default]
    Null,
}

impl CellValue {
    /// True for `Null`
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl fmt::Display for CellValue {
    /// Text verbatim, numbers in shortest form (`90`, `1.5`), booleans as
    /// `true`/`false`, null as the empty string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Null => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

/// One value extracted for one variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedValue {
    /// Variable this value belongs to (weak reference)
    pub variable_id: VariableId,

    /// The extracted value
    #[serde(default)]
    pub value: CellValue,

    /// Extraction confidence, 0-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    /// Snippet of the document the value came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_text: Option<String>,

    /// Marked by a reviewer as needing attention
    #[serde(default)]
    pub flagged: bool,
}

impl ExtractedValue {
    /// Create a value with no confidence or source text
    pub fn new(variable_id: VariableId, value: impl Into<CellValue>) -> Self {
        Self {
            variable_id,
            value: value.into(),
            confidence: None,
            source_text: None,
            flagged: false,
        }
    }

    /// Attach a confidence score
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Attach a source snippet
    pub fn with_source_text(mut self, source_text: impl Into<String>) -> Self {
        self.source_text = Some(source_text.into());
        self
    }
}

/// The extracted values for one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Document the values were extracted from
    pub document_id: DocumentId,

    /// Extracted values, in extraction order
    pub values: Vec<ExtractedValue>,
}

impl ExtractionResult {
    /// Create a result for a document
    pub fn new(document_id: DocumentId, values: Vec<ExtractedValue>) -> Self {
        Self { document_id, values }
    }

    /// Find the value for a variable, if any
    pub fn value_for(&self, variable_id: &VariableId) -> Option<&ExtractedValue> {
        self.values.iter().find(|v| &v.variable_id == variable_id)
    }

    /// Mutable lookup of the value for a variable
    pub fn value_for_mut(&mut self, variable_id: &VariableId) -> Option<&mut ExtractedValue> {
        self.values.iter_mut().find(|v| &v.variable_id == variable_id)
    }
}
