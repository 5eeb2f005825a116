//! docsift Intake
//!
//! Decides which uploaded files become project documents.
//!
//! The validator checks, per upload:
//! - file type against the accepted list
//! - size against the configured maximum (and rejects empty files)
//! - the number of files in one upload
//!
//! Accepted files become [`Document`](docsift_domain::Document)s; everything
//! else is reported with a reason. The report can collapse all rejections into
//! one message for display.
//!
//! # Examples
//!
//! ```
//! use docsift_intake::{IntakeConfig, UploadCandidate, UploadValidator};
//!
//! let validator = UploadValidator::new(IntakeConfig::default());
//! let report = validator.validate(vec![
//!     UploadCandidate::new("invoice.pdf", "application/pdf", 2_048),
//!     UploadCandidate::new("movie.mp4", "video/mp4", 4_096),
//! ]);
//!
//! assert_eq!(report.accepted.len(), 1);
//! assert_eq!(
//!     report.rejection_message().as_deref(),
//!     Some("movie.mp4: unsupported file type (video/mp4)")
//! );
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod validator;

pub use config::IntakeConfig;
pub use error::IntakeError;
pub use validator::{
    candidate_from_path, mime_type_for, IntakeReport, Rejection, RejectionReason, UploadCandidate,
    UploadValidator,
};
