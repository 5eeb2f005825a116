//! Upload validation logic

use crate::{IntakeConfig, IntakeError};
use docsift_domain::{unix_timestamp, Document, DocumentId, DocumentStatus};
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

/// A file offered for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCandidate {
    /// File name as shown to the user
    pub name: String,
    /// MIME type
    pub mime_type: String,
    /// Size in bytes
    pub size_bytes: u64,
}

impl UploadCandidate {
    /// Create a candidate
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
        }
    }
}

/// Why a file was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    /// MIME type is not on the accepted list
    UnsupportedType(String),

    /// File exceeds the size limit
    TooLarge {
        /// Actual size
        size_bytes: u64,
        /// Configured limit
        max_bytes: u64,
    },

    /// File has no content
    Empty,

    /// Upload already holds the maximum number of files
    TooManyFiles {
        /// Configured limit
        max_files: usize,
    },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::UnsupportedType(mime) => {
                write!(f, "unsupported file type ({})", mime)
            }
            RejectionReason::TooLarge {
                size_bytes,
                max_bytes,
            } => write!(
                f,
                "file too large ({} bytes, limit {} bytes)",
                size_bytes, max_bytes
            ),
            RejectionReason::Empty => write!(f, "file is empty"),
            RejectionReason::TooManyFiles { max_files } => {
                write!(f, "too many files (limit {} per upload)", max_files)
            }
        }
    }
}

/// A refused file and the reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// File name
    pub file_name: String,
    /// Reason
    pub reason: RejectionReason,
}

/// Outcome of validating one upload
#[derive(Debug, Clone, Default)]
pub struct IntakeReport {
    /// Files turned into documents, in upload order
    pub accepted: Vec<Document>,
    /// Files refused, in upload order
    pub rejections: Vec<Rejection>,
}

impl IntakeReport {
    /// All rejections as one message, `None` if every file was accepted
    ///
    /// Each entry reads `"<file>: <reason>"`; entries are separated by `"; "`.
    pub fn rejection_message(&self) -> Option<String> {
        if self.rejections.is_empty() {
            return None;
        }
        let parts: Vec<String> = self
            .rejections
            .iter()
            .map(|r| format!("{}: {}", r.file_name, r.reason))
            .collect();
        Some(parts.join("; "))
    }
}

/// Validates uploads against an [`IntakeConfig`]
pub struct UploadValidator {
    config: IntakeConfig,
}

impl UploadValidator {
    /// Create a validator with the given configuration
    pub fn new(config: IntakeConfig) -> Self {
        Self { config }
    }

    /// Create a validator with the default configuration
    pub fn default_config() -> Self {
        Self::new(IntakeConfig::default())
    }

    /// The active configuration
    pub fn config(&self) -> &IntakeConfig {
        &self.config
    }

    /// Validate an upload
    ///
    /// Candidates are checked in order. Once `max_files_per_upload` files have
    /// been accepted, the remaining ones are rejected with `TooManyFiles`.
    pub fn validate(&self, candidates: Vec<UploadCandidate>) -> IntakeReport {
        let mut report = IntakeReport::default();
        let now = unix_timestamp();

        for candidate in candidates {
            match self.check(&candidate, report.accepted.len()) {
                Some(reason) => {
                    debug!("Rejected '{}': {}", candidate.name, reason);
                    report.rejections.push(Rejection {
                        file_name: candidate.name,
                        reason,
                    });
                }
                None => report.accepted.push(Document {
                    id: DocumentId::new(),
                    name: candidate.name,
                    mime_type: candidate.mime_type,
                    size_bytes: candidate.size_bytes,
                    uploaded_at: now,
                    status: DocumentStatus::Uploaded,
                }),
            }
        }

        info!(
            "Upload validated: {} accepted, {} rejected",
            report.accepted.len(),
            report.rejections.len()
        );
        report
    }

    fn check(&self, candidate: &UploadCandidate, accepted_so_far: usize) -> Option<RejectionReason> {
        if !self.config.accepts(&candidate.mime_type) {
            return Some(RejectionReason::UnsupportedType(candidate.mime_type.clone()));
        }
        if candidate.size_bytes == 0 {
            return Some(RejectionReason::Empty);
        }
        if candidate.size_bytes > self.config.max_file_size_bytes {
            return Some(RejectionReason::TooLarge {
                size_bytes: candidate.size_bytes,
                max_bytes: self.config.max_file_size_bytes,
            });
        }
        if accepted_so_far >= self.config.max_files_per_upload {
            return Some(RejectionReason::TooManyFiles {
                max_files: self.config.max_files_per_upload,
            });
        }
        None
    }
}

/// MIME type for a file name, guessed from its extension
///
/// Unknown extensions map to `application/octet-stream`.
pub fn mime_type_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Build a candidate from a file on disk
pub fn candidate_from_path(path: &Path) -> Result<UploadCandidate, IntakeError> {
    let metadata = std::fs::metadata(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(UploadCandidate::new(name, mime_type_for(path), metadata.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn pdf(name: &str, size: u64) -> UploadCandidate {
        UploadCandidate::new(name, "application/pdf", size)
    }

    #[test]
    fn test_accepts_valid_files() {
        let validator = UploadValidator::default_config();
        let report = validator.validate(vec![
            pdf("a.pdf", 100),
            UploadCandidate::new("b.txt", "text/plain", 5),
        ]);

        assert_eq!(report.accepted.len(), 2);
        assert!(report.rejections.is_empty());
        assert_eq!(report.rejection_message(), None);
        assert_eq!(report.accepted[0].name, "a.pdf");
        assert_eq!(report.accepted[0].status, DocumentStatus::Uploaded);
        assert_ne!(report.accepted[0].id, report.accepted[1].id);
    }

    #[test]
    fn test_rejection_reasons() {
        let validator = UploadValidator::default_config();
        let report = validator.validate(vec![
            UploadCandidate::new("clip.mp4", "video/mp4", 10),
            pdf("empty.pdf", 0),
            pdf("huge.pdf", 11 * 1024 * 1024),
        ]);

        assert!(report.accepted.is_empty());
        let reasons: Vec<_> = report.rejections.iter().map(|r| &r.reason).collect();
        assert!(matches!(reasons[0], RejectionReason::UnsupportedType(_)));
        assert_eq!(reasons[1], &RejectionReason::Empty);
        assert!(matches!(reasons[2], RejectionReason::TooLarge { .. }));
    }

    #[test]
    fn test_file_at_limit_is_accepted() {
        let validator = UploadValidator::default_config();
        let report = validator.validate(vec![pdf("edge.pdf", 10 * 1024 * 1024)]);
        assert_eq!(report.accepted.len(), 1);
    }

    #[test]
    fn test_too_many_files() {
        let config = IntakeConfig {
            max_files_per_upload: 2,
            ..IntakeConfig::default()
        };
        let report = UploadValidator::new(config).validate(vec![
            pdf("1.pdf", 1),
            pdf("2.pdf", 1),
            pdf("3.pdf", 1),
        ]);

        assert_eq!(report.accepted.len(), 2);
        assert_eq!(
            report.rejections[0].reason,
            RejectionReason::TooManyFiles { max_files: 2 }
        );
    }

    #[test]
    fn test_rejection_message_joins_entries() {
        let validator = UploadValidator::default_config();
        let report = validator.validate(vec![
            pdf("ok.pdf", 1),
            pdf("empty.pdf", 0),
            UploadCandidate::new("a.zip", "application/zip", 1),
        ]);

        assert_eq!(
            report.rejection_message().unwrap(),
            "empty.pdf: file is empty; a.zip: unsupported file type (application/zip)"
        );
    }

    #[test]
    fn test_mime_type_for() {
        assert_eq!(mime_type_for(Path::new("a.PDF")), "application/pdf");
        assert_eq!(mime_type_for(Path::new("photo.jpeg")), "image/jpeg");
        assert_eq!(mime_type_for(Path::new("photo.jpg")), "image/jpeg");
        assert_eq!(
            mime_type_for(Path::new("memo.docx")),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(mime_type_for(Path::new("noext")), "application/octet-stream");
    }

    #[test]
    fn test_unsupported_file_reports_its_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");
        std::fs::write(&path, "a,b").unwrap();

        let candidate = candidate_from_path(&path).unwrap();
        assert_eq!(candidate.mime_type, "text/csv");

        let report = UploadValidator::default_config().validate(vec![candidate]);
        assert_eq!(
            report.rejection_message().unwrap(),
            "table.csv: unsupported file type (text/csv)"
        );
    }

    #[test]
    fn test_candidate_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"hello").unwrap();

        let candidate = candidate_from_path(&path).unwrap();
        assert_eq!(candidate.name, "notes.txt");
        assert_eq!(candidate.mime_type, "text/plain");
        assert_eq!(candidate.size_bytes, 5);
    }

    #[test]
    fn test_candidate_from_missing_path() {
        let result = candidate_from_path(Path::new("/definitely/not/here.pdf"));
        assert!(matches!(result, Err(IntakeError::Io(_))));
    }
}
