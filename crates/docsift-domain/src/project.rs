//! Projects and their documents

use crate::{DocumentId, ExtractionResult, ProjectId, Variable};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Processing state of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Uploaded, not yet processed
    #[default]
    Uploaded,
    /// Currently being processed
    Processing,
    /// Values extracted
    Processed,
    /// Extraction failed
    Failed,
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DocumentStatus::Uploaded => "uploaded",
            DocumentStatus::Processing => "processing",
            DocumentStatus::Processed => "processed",
            DocumentStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// An uploaded document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique identifier
    pub id: DocumentId,
    /// Original file name
    pub name: String,
    /// MIME type inferred at upload
    pub mime_type: String,
    /// File size in bytes
    pub size_bytes: u64,
    /// Upload time (seconds since epoch)
    pub uploaded_at: u64,
    /// Processing state
    #[serde(default)]
    pub status: DocumentStatus,
}

/// A project: documents, the approved schema and extraction results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique identifier
    pub id: ProjectId,
    /// Display name
    pub name: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation time (seconds since epoch)
    pub created_at: u64,
    /// Last modification time (seconds since epoch)
    pub updated_at: u64,
    /// Approved schema
    #[serde(default)]
    pub variables: Vec<Variable>,
    /// Uploaded documents
    #[serde(default)]
    pub documents: Vec<Document>,
    /// Extraction results, one per processed document
    #[serde(default)]
    pub results: Vec<ExtractionResult>,
}

impl Project {
    /// Create an empty project
    pub fn new(name: impl Into<String>, description: Option<String>, now: u64) -> Self {
        Self {
            id: ProjectId::new(),
            name: name.into(),
            description,
            created_at: now,
            updated_at: now,
            variables: Vec::new(),
            documents: Vec::new(),
            results: Vec::new(),
        }
    }

    /// Map of document id to file name, as used by exports
    pub fn document_names(&self) -> HashMap<DocumentId, String> {
        self.documents
            .iter()
            .map(|d| (d.id.clone(), d.name.clone()))
            .collect()
    }

    /// Look up a document by id
    pub fn document(&self, id: &DocumentId) -> Option<&Document> {
        self.documents.iter().find(|d| &d.id == id)
    }
}
