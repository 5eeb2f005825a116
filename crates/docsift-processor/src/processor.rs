//! Core processing loop

use crate::{CancellationToken, JobOutcome, JobProgress, JobStatus, ProcessorConfig, ProcessorError};
use docsift_domain::traits::ValueExtractor;
use docsift_domain::{Document, DocumentId, ExtractionResult, Variable};
use std::fmt::Display;
use tracing::{debug, info, warn};

/// Runs a [`ValueExtractor`] over a set of documents
///
/// Each document is preceded by the configured delay. The job can be stopped
/// at any point through a [`CancellationToken`]; it then returns the results
/// gathered so far with status [`JobStatus::Cancelled`].
pub struct Processor<E> {
    pub(crate) config: ProcessorConfig,
    pub(crate) extractor: E,
}

impl<E> Processor<E>
where
    E: ValueExtractor,
    E::Error: Display,
{
    /// Create a processor with the given configuration and extractor
    pub fn new(config: ProcessorConfig, extractor: E) -> Self {
        Self { config, extractor }
    }

    /// The active configuration
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Process `documents` in order, reporting progress after every change
    ///
    /// Cancellation is checked before each document and during each delay.
    /// Extraction failures are recorded in [`JobOutcome::failed`]. With
    /// `fail_fast` the first one stops the job with status
    /// [`JobStatus::Failed`], keeping the results gathered before it;
    /// otherwise the job moves on.
    pub async fn run<F>(
        &self,
        documents: &[Document],
        variables: &[Variable],
        token: &CancellationToken,
        mut on_progress: F,
    ) -> Result<JobOutcome, ProcessorError>
    where
        F: FnMut(&JobProgress),
    {
        let mut progress = JobProgress::new(documents.len());
        let mut results = Vec::with_capacity(documents.len());
        let mut failed = Vec::new();
        let delay = self.config.per_document_delay();

        info!(
            "Processing job started: {} documents, {} variables",
            documents.len(),
            variables.len()
        );
        progress.status = JobStatus::Running;
        on_progress(&progress);

        for document in documents {
            if token.is_cancelled() {
                return Ok(Self::cancelled(progress, results, failed, &mut on_progress));
            }

            progress.current_document = Some(document.name.clone());
            on_progress(&progress);

            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    return Ok(Self::cancelled(progress, results, failed, &mut on_progress));
                }
                _ = tokio::time::sleep(delay) => {}
            }

            match self.extractor.extract(document, variables) {
                Ok(result) => {
                    debug!("Extracted {} values from '{}'", result.values.len(), document.name);
                    results.push(result);
                    progress.completed += 1;
                }
                Err(e) => {
                    let message = e.to_string();
                    warn!("Extraction failed for '{}': {}", document.name, message);
                    progress.failed += 1;

                    failed.push((document.id.clone(), message));

                    if self.config.fail_fast {
                        progress.status = JobStatus::Failed;
                        progress.current_document = None;
                        on_progress(&progress);
                        info!(
                            "Processing job stopped at '{}' after {} of {} documents",
                            document.name,
                            progress.processed(),
                            progress.total
                        );
                        return Ok(JobOutcome {
                            status: JobStatus::Failed,
                            results,
                            failed,
                            progress,
                        });
                    }
                }
            }
            on_progress(&progress);
        }

        progress.status = JobStatus::Completed;
        progress.current_document = None;
        on_progress(&progress);
        info!(
            "Processing job completed: {} succeeded, {} failed",
            progress.completed, progress.failed
        );

        Ok(JobOutcome {
            status: JobStatus::Completed,
            results,
            failed,
            progress,
        })
    }

    fn cancelled<F>(
        mut progress: JobProgress,
        results: Vec<ExtractionResult>,
        failed: Vec<(DocumentId, String)>,
        on_progress: &mut F,
    ) -> JobOutcome
    where
        F: FnMut(&JobProgress),
    {
        progress.status = JobStatus::Cancelled;
        progress.current_document = None;
        on_progress(&progress);
        info!(
            "Processing job cancelled after {} of {} documents",
            progress.processed(),
            progress.total
        );

        JobOutcome {
            status: JobStatus::Cancelled,
            results,
            failed,
            progress,
        }
    }
}
