//! Upload command implementation.

use crate::cli::UploadArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::workspace::Workspace;
use docsift_intake::{candidate_from_path, UploadValidator};

/// Execute the upload command.
///
/// Files that fail validation are reported on stderr as one message; the
/// accepted ones are added to the project.
pub async fn execute_upload(
    args: UploadArgs,
    workspace: &mut Workspace,
    formatter: &Formatter,
) -> Result<usize> {
    let project = workspace.project(&args.project)?;

    let candidates = args
        .files
        .iter()
        .map(|path| candidate_from_path(path))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let validator = UploadValidator::new(workspace.config.intake.clone());
    let report = validator.validate(candidates);

    if let Some(message) = report.rejection_message() {
        eprintln!("{}", formatter.warning(&message));
    }

    let accepted = report.accepted.len();
    if accepted > 0 {
        workspace.projects.add_documents(&project.id, report.accepted)?;
    }
    println!(
        "{}",
        formatter.success(&format!("Uploaded {} document(s) to '{}'", accepted, project.name))
    );
    Ok(accepted)
}
