//! Results and flagging command implementations.

use crate::cli::{FlagAllArgs, FlagArgs, ResultsArgs};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::workspace::{find_document, find_variable, Workspace};
use docsift_processor::{bulk_flag, flag, selections_for_variable};

/// Execute the results command.
pub async fn execute_results(
    args: ResultsArgs,
    workspace: &mut Workspace,
    formatter: &Formatter,
) -> Result<()> {
    let project = workspace.project(&args.project)?;
    println!("{}", formatter.format_results(&project, args.flagged)?);
    Ok(())
}

/// Execute the flag command.
pub async fn execute_flag(
    args: FlagArgs,
    workspace: &mut Workspace,
    formatter: &Formatter,
) -> Result<()> {
    let mut project = workspace.project(&args.project)?;
    let document = find_document(&project, &args.document)?.clone();
    let variable = find_variable(&project, &args.variable)?.clone();

    let flagged = !args.unflag;
    if !flag(&mut project.results, &document.id, &variable.id, flagged) {
        return Err(CliError::NotFound(format!(
            "Value of '{}' for '{}'",
            variable.name, document.name
        )));
    }
    workspace.projects.set_results(&project.id, project.results)?;

    let verb = if flagged { "Flagged" } else { "Unflagged" };
    println!(
        "{}",
        formatter.success(&format!("{} '{}' in '{}'", verb, variable.name, document.name))
    );
    Ok(())
}

/// Execute the flag-all command.
pub async fn execute_flag_all(
    args: FlagAllArgs,
    workspace: &mut Workspace,
    formatter: &Formatter,
) -> Result<usize> {
    let mut project = workspace.project(&args.project)?;
    let variable = find_variable(&project, &args.variable)?.clone();

    let selections = selections_for_variable(&project.results, &variable.id);
    let count = bulk_flag(&mut project.results, &selections, !args.unflag);
    workspace.projects.set_results(&project.id, project.results)?;

    let verb = if args.unflag { "Unflagged" } else { "Flagged" };
    println!(
        "{}",
        formatter.success(&format!("{} {} value(s) of '{}'", verb, count, variable.name))
    );
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, OutputFormat};
    use docsift_domain::{
        Document, DocumentId, DocumentStatus, ExtractedValue, ExtractionResult, NewVariable,
        Variable, VariableId, VariableType,
    };

    fn setup() -> (tempfile::TempDir, Workspace) {
        let dir = tempfile::tempdir().unwrap();
        let mut ws = Workspace::open_at(&dir.path().join("res.db"), Config::default()).unwrap();
        let project = ws.projects.create("Review", None).unwrap();

        let documents: Vec<_> = ["d1", "d2"]
            .into_iter()
            .map(|id| Document {
                id: DocumentId::from(id),
                name: format!("{}.pdf", id),
                mime_type: "application/pdf".to_string(),
                size_bytes: 1,
                uploaded_at: 0,
                status: DocumentStatus::Processed,
            })
            .collect();
        let results = documents
            .iter()
            .map(|d| {
                ExtractionResult::new(
                    d.id.clone(),
                    vec![ExtractedValue::new(VariableId::from("v1"), "x")],
                )
            })
            .collect();

        ws.projects.add_documents(&project.id, documents).unwrap();
        ws.projects
            .set_schema(
                &project.id,
                vec![Variable::from_new(
                    VariableId::from("v1"),
                    NewVariable::new("Vendor", VariableType::Text),
                    0,
                )],
            )
            .unwrap();
        ws.projects.set_results(&project.id, results).unwrap();
        (dir, ws)
    }

    #[tokio::test]
    async fn test_flag_by_names() {
        let (_dir, mut ws) = setup();
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let args = FlagArgs {
            project: "Review".to_string(),
            document: "d2.pdf".to_string(),
            variable: "vendor".to_string(),
            unflag: false,
        };
        execute_flag(args, &mut ws, &formatter).await.unwrap();

        let project = ws.project("Review").unwrap();
        assert_eq!(docsift_processor::flagged_count(&project.results), 1);
        assert!(project.results[1].values[0].flagged);
    }

    #[tokio::test]
    async fn test_flag_all_then_unflag() {
        let (_dir, mut ws) = setup();
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let flag_all = FlagAllArgs {
            project: "Review".to_string(),
            variable: "v1".to_string(),
            unflag: false,
        };
        assert_eq!(execute_flag_all(flag_all, &mut ws, &formatter).await.unwrap(), 2);

        let unflag_all = FlagAllArgs {
            project: "Review".to_string(),
            variable: "Vendor".to_string(),
            unflag: true,
        };
        execute_flag_all(unflag_all, &mut ws, &formatter).await.unwrap();
        let project = ws.project("Review").unwrap();
        assert_eq!(docsift_processor::flagged_count(&project.results), 0);
    }

    #[tokio::test]
    async fn test_flag_unknown_document() {
        let (_dir, mut ws) = setup();
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let args = FlagArgs {
            project: "Review".to_string(),
            document: "nope.pdf".to_string(),
            variable: "v1".to_string(),
            unflag: false,
        };
        let result = execute_flag(args, &mut ws, &formatter).await;
        assert!(matches!(result, Err(CliError::NotFound(_))));
    }
}
