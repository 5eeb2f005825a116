//! Project command implementation.

use crate::cli::{ProjectAction, ProjectArgs};
use crate::error::Result;
use crate::output::Formatter;
use crate::workspace::{find_document, Workspace};

/// Execute the project command.
pub async fn execute_project(
    args: ProjectArgs,
    workspace: &mut Workspace,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ProjectAction::Create { name, description } => {
            let project = workspace.projects.create(&name, description)?;
            println!(
                "{}",
                formatter.success(&format!("Created project '{}' ({})", project.name, project.id))
            );
        }
        ProjectAction::List => {
            let projects = workspace.projects.list()?;
            println!("{}", formatter.format_projects(&projects)?);
        }
        ProjectAction::Show { project } => {
            let project = workspace.project(&project)?;
            println!("{}", formatter.format_project(&project)?);
        }
        ProjectAction::Rename {
            project,
            name,
            description,
        } => {
            let project = workspace.project(&project)?;
            let description = description.or(project.description);
            let renamed = workspace.projects.rename(&project.id, &name, description)?;
            println!(
                "{}",
                formatter.success(&format!("Renamed project to '{}'", renamed.name))
            );
        }
        ProjectAction::RemoveDocument { project, document } => {
            let project = workspace.project(&project)?;
            let document = find_document(&project, &document)?.clone();
            workspace.projects.remove_document(&project.id, &document.id)?;
            println!(
                "{}",
                formatter.success(&format!("Removed document '{}'", document.name))
            );
        }
        ProjectAction::Delete { project } => {
            let project = workspace.project(&project)?;
            workspace.projects.delete(&project.id)?;
            if workspace.draft.project_id() == Some(&project.id) {
                workspace.draft.reset()?;
            }
            println!(
                "{}",
                formatter.success(&format!("Deleted project '{}'", project.name))
            );
        }
    }
    Ok(())
}
