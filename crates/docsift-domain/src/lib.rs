//! docsift Domain Layer
//!
//! Value types and trait seams shared by every other docsift crate.
//! Infrastructure (persistence, CSV, the processing runtime) lives elsewhere;
//! this crate only depends on `uuid` and `serde`.
//!
//! ## Key Concepts
//!
//! - **Variable**: a named field to extract from documents, with a declared type
//! - **Extraction Result**: the extracted values for one document
//! - **Project**: documents, an approved schema and its results
//! - **Export Config**: how results are laid out when exported

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chat;
pub mod export;
pub mod extraction;
pub mod ids;
pub mod project;
pub mod traits;
pub mod variable;

// Re-exports for convenience
pub use chat::{AssistantReply, ChatMessage, ChatRole};
pub use export::{ExportConfig, ExportFormat, ExportStructure};
pub use extraction::{CellValue, ExtractedValue, ExtractionResult};
pub use ids::{DocumentId, ProjectId, VariableId};
pub use project::{Document, DocumentStatus, Project};
pub use variable::{sorted_by_order, NewVariable, Variable, VariablePatch, VariableType};

/// Seconds since the Unix epoch, saturating to zero if the clock is before it.
pub fn unix_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
