//! Export command implementation.

use crate::cli::ExportArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::workspace::Workspace;
use docsift_domain::{ExportConfig, ExportFormat, ExportStructure};
use docsift_export::{export_project, write_export};
use std::path::PathBuf;

/// Execute the export command.
///
/// Returns the written file, or `None` when printing to stdout.
pub async fn execute_export(
    args: ExportArgs,
    workspace: &mut Workspace,
    formatter: &Formatter,
) -> Result<Option<PathBuf>> {
    let project = workspace.project(&args.project)?;
    let structure: ExportStructure = args.structure.into();

    if args.source_text && structure == ExportStructure::Wide {
        return Err(CliError::InvalidInput(
            "--source-text is only available with --structure long".into(),
        ));
    }

    let config = ExportConfig {
        format: ExportFormat::Csv,
        structure,
        include_confidence: args.confidence,
        include_source_text: args.source_text,
    };
    let csv = export_project(&project, &config)?;

    if args.stdout {
        println!("{}", csv);
        return Ok(None);
    }

    let today = chrono::Local::now().date_naive();
    let path = write_export(&args.output, today, &csv)?;
    println!(
        "{}",
        formatter.success(&format!(
            "Exported {} result(s) to {}",
            project.results.len(),
            path.display()
        ))
    );
    Ok(Some(path))
}
