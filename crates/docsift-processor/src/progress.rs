//! Job progress reporting

use docsift_domain::{DocumentId, ExtractionResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a processing job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Created, not started
    #[default]
    Queued,
    /// Working through documents
    Running,
    /// Every document was attempted
    Completed,
    /// Stopped by a cancellation request
    Cancelled,
    /// Stopped by an extraction failure
    Failed,
}

impl JobStatus {
    /// Whether the job has stopped
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Cancelled | JobStatus::Failed
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobStatus::Queued => "queued",
            JobStatus::Running => "running",
            JobStatus::Completed => "completed",
            JobStatus::Cancelled => "cancelled",
            JobStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Snapshot of a job's progress
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobProgress {
    /// Documents in the job
    pub total: usize,
    /// Documents extracted successfully
    pub completed: usize,
    /// Documents whose extraction failed
    pub failed: usize,
    /// Name of the document being worked on
    pub current_document: Option<String>,
    /// Lifecycle state
    pub status: JobStatus,
}

impl JobProgress {
    /// Queued progress for `total` documents
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    /// Documents attempted so far
    pub fn processed(&self) -> usize {
        self.completed + self.failed
    }

    /// Share of attempted documents, 0.0 to 100.0
    ///
    /// An empty job reports 100 once it has completed and 0 before.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return if self.status == JobStatus::Completed {
                100.0
            } else {
                0.0
            };
        }
        (self.processed() as f64 / self.total as f64) * 100.0
    }
}

/// What a finished job produced
#[derive(Debug, Clone, PartialEq)]
pub struct JobOutcome {
    /// How the job ended
    pub status: JobStatus,
    /// Results for every successfully extracted document, in input order
    pub results: Vec<ExtractionResult>,
    /// Documents whose extraction failed, with the error message
    pub failed: Vec<(DocumentId, String)>,
    /// Final progress snapshot
    pub progress: JobProgress,
}
