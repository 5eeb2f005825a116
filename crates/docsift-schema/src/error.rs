//! Error types for the schema draft

use docsift_store::StoreError;
use thiserror::Error;

/// Errors that can occur while editing a schema draft
#[derive(Error, Debug)]
pub enum DraftError {
    /// Position outside the variable list
    #[error("Index {index} out of range (draft has {len} variables)")]
    IndexOutOfRange {
        /// Requested position
        index: usize,
        /// Number of variables in the draft
        len: usize,
    },

    /// No assistant message at this position
    #[error("No assistant message at position {0}")]
    MessageNotFound(usize),

    /// The draft is not associated with a project
    #[error("Draft is not associated with a project")]
    NoProject,

    /// Approving a draft without variables
    #[error("Cannot approve an empty schema")]
    EmptySchema,

    /// Schema assistant failure
    #[error("Assistant error: {0}")]
    Assistant(String),

    /// Assistant reply could not be parsed
    #[error("Invalid suggestion format: {0}")]
    InvalidFormat(String),

    /// Persistence failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
