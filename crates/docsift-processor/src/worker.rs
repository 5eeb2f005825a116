//! Background execution of processing jobs

use crate::{CancellationToken, JobOutcome, JobProgress, Processor, ProcessorError};
use docsift_domain::traits::ValueExtractor;
use docsift_domain::{Document, Variable};
use std::fmt::Display;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinHandle;

/// Handle to a job running on a tokio task
///
/// # Examples
///
/// ```no_run
/// use docsift_processor::{MockExtractor, Processor, ProcessorConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let processor = Processor::new(ProcessorConfig::default(), MockExtractor::new());
///     let handle = processor.spawn(Vec::new(), Vec::new());
///
///     println!("{:.0}%", handle.poll().percent());
///     let outcome = handle.wait().await?;
///     println!("{}", outcome.status);
///     Ok(())
/// }
/// ```
pub struct JobHandle {
    progress: Arc<Mutex<JobProgress>>,
    token: CancellationToken,
    task: JoinHandle<Result<JobOutcome, ProcessorError>>,
}

fn lock(progress: &Mutex<JobProgress>) -> MutexGuard<'_, JobProgress> {
    // A panic while holding the lock leaves a complete snapshot behind
    progress.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl JobHandle {
    /// Latest progress snapshot
    pub fn poll(&self) -> JobProgress {
        lock(&self.progress).clone()
    }

    /// Request cancellation; the job stops before its next document
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// A token that cancels this job
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Whether the task has finished
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the job to end
    pub async fn wait(self) -> Result<JobOutcome, ProcessorError> {
        self.task
            .await
            .map_err(|e| ProcessorError::Worker(format!("processing task failed: {}", e)))?
    }
}

impl<E> Processor<E>
where
    E: ValueExtractor + Send + Sync + 'static,
    E::Error: Display + Send,
{
    /// Run the job on a tokio task and return a handle to it
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(self, documents: Vec<Document>, variables: Vec<Variable>) -> JobHandle {
        let token = CancellationToken::new();
        let progress = Arc::new(Mutex::new(JobProgress::new(documents.len())));

        let task = tokio::spawn({
            let token = token.clone();
            let progress = Arc::clone(&progress);
            async move {
                self.run(&documents, &variables, &token, |p| {
                    *lock(&progress) = p.clone();
                })
                .await
            }
        });

        JobHandle {
            progress,
            token,
            task,
        }
    }
}
