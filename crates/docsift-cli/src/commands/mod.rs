//! Command implementations.

pub mod export;
pub mod process;
pub mod project;
pub mod results;
pub mod schema;
pub mod upload;

pub use self::export::execute_export;
pub use self::process::execute_process;
pub use self::project::execute_project;
pub use self::results::{execute_flag, execute_flag_all, execute_results};
pub use self::schema::execute_schema;
pub use self::upload::execute_upload;

use crate::cli::Command;
use crate::error::Result;
use crate::output::Formatter;
use crate::workspace::Workspace;

/// Run one parsed command against the workspace.
pub async fn execute(
    command: Command,
    workspace: &mut Workspace,
    formatter: &Formatter,
) -> Result<()> {
    match command {
        Command::Project(args) => execute_project(args, workspace, formatter).await?,
        Command::Schema(args) => execute_schema(args, workspace, formatter).await?,
        Command::Upload(args) => {
            execute_upload(args, workspace, formatter).await?;
        }
        Command::Process(args) => {
            execute_process(args, workspace, formatter).await?;
        }
        Command::Results(args) => execute_results(args, workspace, formatter).await?,
        Command::Flag(args) => execute_flag(args, workspace, formatter).await?,
        Command::FlagAll(args) => {
            execute_flag_all(args, workspace, formatter).await?;
        }
        Command::Export(args) => {
            execute_export(args, workspace, formatter).await?;
        }
    }
    Ok(())
}
