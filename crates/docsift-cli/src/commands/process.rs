//! Process command implementation.

use crate::cli::ProcessArgs;
use crate::config::OutputFormat;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::workspace::Workspace;
use docsift_domain::{Document, DocumentStatus, Project};
use docsift_processor::{
    JobOutcome, JobProgress, JobStatus, MockExtractor, Processor, ProcessorError,
};
use std::time::Duration;
use tracing::info;

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Execute the process command.
///
/// Runs the job on a background task, printing a progress line whenever the
/// snapshot changes. Ctrl+C cancels the job; results gathered before the
/// cancellation are kept. A job stopped by `fail_fast` also keeps its
/// finished results, then reports the failing document as an error.
pub async fn execute_process(
    args: ProcessArgs,
    workspace: &mut Workspace,
    formatter: &Formatter,
) -> Result<JobOutcome> {
    let project = workspace.project(&args.project)?;
    if project.variables.is_empty() {
        return Err(CliError::InvalidInput(format!(
            "Project '{}' has no approved schema. Run 'docsift schema {} approve' first",
            project.name, project.name
        )));
    }

    let documents = pending_documents(&project, args.all);
    if documents.is_empty() {
        println!("{}", formatter.info("Nothing to process"));
        return Ok(JobOutcome {
            status: JobStatus::Completed,
            results: Vec::new(),
            failed: Vec::new(),
            progress: JobProgress::new(0),
        });
    }

    let mut config = workspace.config.processing.clone();
    if let Some(delay_ms) = args.delay_ms {
        config.per_document_delay_ms = delay_ms;
    }
    config.validate()?;

    let ids: Vec<_> = documents.iter().map(|d| d.id.clone()).collect();
    workspace.projects.update(&project.id, |p| {
        for document in p.documents.iter_mut().filter(|d| ids.contains(&d.id)) {
            document.status = DocumentStatus::Processing;
        }
    })?;

    let variables = docsift_domain::sorted_by_order(&project.variables);
    let handle = Processor::new(config, MockExtractor::new()).spawn(documents, variables);
    let show_progress = formatter.format() == OutputFormat::Table;

    let mut ticker = tokio::time::interval(POLL_INTERVAL);
    let mut last = None;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let progress = handle.poll();
                if show_progress && last.as_ref() != Some(&progress) {
                    println!("{}", formatter.progress(&progress));
                }
                last = Some(progress);
                if handle.is_finished() {
                    break;
                }
            }
            Ok(()) = tokio::signal::ctrl_c() => {
                eprintln!("{}", formatter.warning("Cancelling..."));
                handle.cancel();
                break;
            }
        }
    }

    let outcome = match handle.wait().await {
        Ok(outcome) => outcome,
        Err(e) => {
            // Documents stuck in Processing go back to Uploaded
            workspace.projects.update(&project.id, |p| {
                for document in p.documents.iter_mut() {
                    if document.status == DocumentStatus::Processing {
                        document.status = DocumentStatus::Uploaded;
                    }
                }
            })?;
            return Err(e.into());
        }
    };

    workspace
        .projects
        .update(&project.id, |p| apply_outcome(p, &outcome))?;
    info!(
        "Stored {} results for project {}",
        outcome.results.len(),
        project.id
    );

    println!("{}", formatter.outcome(&outcome));

    if outcome.status == JobStatus::Failed {
        if let Some((id, message)) = outcome.failed.last() {
            let document = project
                .document(id)
                .map(|d| d.name.clone())
                .unwrap_or_else(|| id.to_string());
            return Err(ProcessorError::Extraction {
                document,
                message: message.clone(),
            }
            .into());
        }
    }
    Ok(outcome)
}

/// Documents to hand to the job: unprocessed ones, or all with `all`.
pub fn pending_documents(project: &Project, all: bool) -> Vec<Document> {
    project
        .documents
        .iter()
        .filter(|d| all || d.status != DocumentStatus::Processed)
        .cloned()
        .collect()
}

/// Merge a job outcome into the project.
///
/// New results replace older ones for the same document. Documents the job
/// never reached (after a cancellation) return to `Uploaded`.
pub fn apply_outcome(project: &mut Project, outcome: &JobOutcome) {
    for result in &outcome.results {
        project.results.retain(|r| r.document_id != result.document_id);
        project.results.push(result.clone());
    }

    for document in project.documents.iter_mut() {
        if outcome.results.iter().any(|r| r.document_id == document.id) {
            document.status = DocumentStatus::Processed;
        } else if outcome.failed.iter().any(|(id, _)| id == &document.id) {
            document.status = DocumentStatus::Failed;
        } else if document.status == DocumentStatus::Processing {
            document.status = DocumentStatus::Uploaded;
        }
    }

    if outcome.status == JobStatus::Completed {
        // Results of documents removed since the last run
        let ids: Vec<_> = project.documents.iter().map(|d| d.id.clone()).collect();
        project.results.retain(|r| ids.contains(&r.document_id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use docsift_domain::{
        DocumentId, ExtractionResult, NewVariable, Variable, VariableId, VariableType,
    };

    fn document(id: &str, status: DocumentStatus) -> Document {
        Document {
            id: DocumentId::from(id),
            name: format!("{}.txt", id),
            mime_type: "text/plain".to_string(),
            size_bytes: 3,
            uploaded_at: 0,
            status,
        }
    }

    #[test]
    fn test_apply_cancelled_outcome() {
        let mut project = Project::new("P", None, 0);
        project.documents = vec![
            document("d1", DocumentStatus::Processing),
            document("d2", DocumentStatus::Processing),
            document("d3", DocumentStatus::Processing),
        ];
        let outcome = JobOutcome {
            status: JobStatus::Cancelled,
            results: vec![ExtractionResult::new(DocumentId::from("d1"), Vec::new())],
            failed: vec![(DocumentId::from("d2"), "boom".to_string())],
            progress: JobProgress::new(3),
        };

        apply_outcome(&mut project, &outcome);

        let statuses: Vec<_> = project.documents.iter().map(|d| d.status).collect();
        assert_eq!(
            statuses,
            vec![
                DocumentStatus::Processed,
                DocumentStatus::Failed,
                DocumentStatus::Uploaded
            ]
        );
        assert_eq!(project.results.len(), 1);
    }

    #[test]
    fn test_pending_documents() {
        let mut project = Project::new("P", None, 0);
        project.documents = vec![
            document("d1", DocumentStatus::Processed),
            document("d2", DocumentStatus::Uploaded),
        ];
        assert_eq!(pending_documents(&project, false).len(), 1);
        assert_eq!(pending_documents(&project, true).len(), 2);
    }

    #[tokio::test]
    async fn test_process_stores_results() {
        let dir = tempfile::tempdir().unwrap();
        let mut ws = Workspace::open_at(&dir.path().join("proc.db"), Config::default()).unwrap();
        let project = ws.projects.create("Jobs", None).unwrap();
        ws.projects
            .add_documents(
                &project.id,
                vec![
                    document("d1", DocumentStatus::Uploaded),
                    document("d2", DocumentStatus::Uploaded),
                ],
            )
            .unwrap();
        ws.projects
            .set_schema(
                &project.id,
                vec![Variable::from_new(
                    VariableId::from("v1"),
                    NewVariable::new("Total", VariableType::Number),
                    0,
                )],
            )
            .unwrap();

        let args = ProcessArgs {
            project: "Jobs".to_string(),
            all: false,
            delay_ms: Some(0),
        };
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let outcome = execute_process(args, &mut ws, &formatter).await.unwrap();

        assert_eq!(outcome.status, JobStatus::Completed);
        let project = ws.project("Jobs").unwrap();
        assert_eq!(project.results.len(), 2);
        assert!(project
            .documents
            .iter()
            .all(|d| d.status == DocumentStatus::Processed));
    }

    #[test]
    fn test_apply_failed_outcome_keeps_results() {
        let mut project = Project::new("P", None, 0);
        project.documents = vec![
            document("ok1", DocumentStatus::Processing),
            document("ok2", DocumentStatus::Processing),
            document("bad", DocumentStatus::Processing),
            document("later", DocumentStatus::Processing),
        ];
        let outcome = JobOutcome {
            status: JobStatus::Failed,
            results: vec![
                ExtractionResult::new(DocumentId::from("ok1"), Vec::new()),
                ExtractionResult::new(DocumentId::from("ok2"), Vec::new()),
            ],
            failed: vec![(DocumentId::from("bad"), "x".to_string())],
            progress: JobProgress::new(4),
        };

        apply_outcome(&mut project, &outcome);

        let statuses: Vec<_> = project.documents.iter().map(|d| d.status).collect();
        assert_eq!(
            statuses,
            vec![
                DocumentStatus::Processed,
                DocumentStatus::Processed,
                DocumentStatus::Failed,
                DocumentStatus::Uploaded
            ]
        );
        assert_eq!(project.results.len(), 2);
    }

    #[tokio::test]
    async fn test_nothing_to_process_returns_early() {
        let dir = tempfile::tempdir().unwrap();
        let mut ws = Workspace::open_at(&dir.path().join("proc.db"), Config::default()).unwrap();
        let project = ws.projects.create("Done", None).unwrap();
        ws.projects
            .add_documents(&project.id, vec![document("d1", DocumentStatus::Processed)])
            .unwrap();
        ws.projects
            .set_schema(
                &project.id,
                vec![Variable::from_new(
                    VariableId::from("v1"),
                    NewVariable::new("Total", VariableType::Number),
                    0,
                )],
            )
            .unwrap();

        let args = ProcessArgs {
            project: "Done".to_string(),
            all: false,
            delay_ms: Some(0),
        };
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let outcome = execute_process(args, &mut ws, &formatter).await.unwrap();

        assert_eq!(outcome.progress.total, 0);
        assert!(outcome.results.is_empty());
        let project = ws.project("Done").unwrap();
        assert_eq!(project.documents[0].status, DocumentStatus::Processed);
    }

    #[tokio::test]
    async fn test_process_requires_schema() {
        let dir = tempfile::tempdir().unwrap();
        let mut ws = Workspace::open_at(&dir.path().join("proc.db"), Config::default()).unwrap();
        ws.projects.create("Empty", None).unwrap();

        let args = ProcessArgs {
            project: "Empty".to_string(),
            all: false,
            delay_ms: None,
        };
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let result = execute_process(args, &mut ws, &formatter).await;
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }
}
