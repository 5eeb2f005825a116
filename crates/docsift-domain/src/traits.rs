//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{AssistantReply, Document, ExtractionResult, Variable};

/// Trait for persisting string documents under string keys
///
/// Implemented by the infrastructure layer (docsift-store)
pub trait KeyValueStore {
    /// Error type for store operations
    type Error;

    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Delete the value stored under `key` (no-op if absent)
    fn remove(&mut self, key: &str) -> Result<(), Self::Error>;
}

/// Trait for pulling variable values out of a document
///
/// Implemented by the processing layer (docsift-processor)
pub trait ValueExtractor {
    /// Error type for extraction operations
    type Error;

    /// Extract one value per variable from the document
    fn extract(
        &self,
        document: &Document,
        variables: &[Variable],
    ) -> Result<ExtractionResult, Self::Error>;
}

/// Trait for the conversational side of schema definition
///
/// Implemented by the schema layer (docsift-schema)
pub trait SchemaAssistant {
    /// Error type for assistant operations
    type Error;

    /// Answer a user message, optionally proposing variables
    fn respond(&self, message: &str, current: &[Variable]) -> Result<AssistantReply, Self::Error>;
}
