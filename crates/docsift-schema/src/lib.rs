//! docsift Schema Drafting
//!
//! Holds the working schema of the active project while it is being defined.
//!
//! # Overview
//!
//! A schema is an ordered list of variables. While the user edits it, the
//! list lives in a [`SchemaDraft`]: an explicit state container built on an
//! injected key-value store, persisted after every change. Once approved, the
//! variables are copied into the project and become its extraction schema.
//!
//! # Architecture
//!
//! ```text
//! chat message → SchemaAssistant → suggestions → SchemaDraft → approve → Project
//! ```
//!
//! # Example Usage
//!
//! ```
//! use docsift_schema::{KeywordAssistant, SchemaDraft};
//! use docsift_store::{MemoryStore, ProjectRepository};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut projects = ProjectRepository::new(MemoryStore::new());
//! let project = projects.create("Invoices", None)?;
//!
//! let mut draft = SchemaDraft::open(MemoryStore::new())?;
//! draft.load_draft(&project.id)?;
//!
//! let reply = draft.send_message(&KeywordAssistant::new(), "Total: number")?;
//! draft.apply_suggestions(reply)?;
//!
//! let project = draft.approve(&mut projects)?;
//! assert_eq!(project.variables[0].name, "Total");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]

mod assistant;
mod draft;
mod error;

pub use assistant::{parse_suggestions, KeywordAssistant};
pub use draft::{DraftState, SchemaDraft};
pub use error::DraftError;
