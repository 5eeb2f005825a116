//! docsift Processor
//!
//! Runs value extraction over a project's documents as a cancellable job.
//!
//! # Overview
//!
//! The processor is responsible for:
//! - **Pacing**: a fixed delay before each document
//! - **Progress**: snapshots after every state change, via callback or [`JobHandle::poll`]
//! - **Cancellation**: cooperative, through a [`CancellationToken`]
//! - **Review**: flagging extracted values for a second look
//!
//! # Usage
//!
//! ## Inline
//!
//! ```
//! use docsift_processor::{CancellationToken, JobStatus, MockExtractor, Processor, ProcessorConfig};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let processor = Processor::new(ProcessorConfig::instant(), MockExtractor::new());
//! let token = CancellationToken::new();
//!
//! let outcome = processor
//!     .run(&[], &[], &token, |p| println!("{:.0}% {}", p.percent(), p.status))
//!     .await?;
//! assert_eq!(outcome.status, JobStatus::Completed);
//! # Ok(())
//! # }
//! ```
//!
//! ## Background task
//!
//! [`Processor::spawn`] moves the job onto a tokio task and returns a
//! [`JobHandle`] to poll, cancel, or wait on.
//!
//! # Configuration
//!
//! ```toml
//! [processing]
//! per_document_delay_ms = 1500
//! fail_fast = false
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod mock;
mod processor;
mod progress;
mod review;
mod worker;

pub use config::ProcessorConfig;
pub use error::ProcessorError;
pub use mock::MockExtractor;
pub use processor::Processor;
pub use progress::{JobOutcome, JobProgress, JobStatus};
pub use review::{bulk_flag, flag, flagged_count, flagged_values, selections_for_variable};
pub use worker::JobHandle;

/// Cooperative cancellation for processing jobs
pub use tokio_util::sync::CancellationToken;
