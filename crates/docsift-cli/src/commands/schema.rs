//! Schema command implementation.

use crate::cli::{SchemaAction, SchemaArgs};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::workspace::Workspace;
use docsift_domain::{ChatRole, NewVariable, VariablePatch};
use docsift_schema::KeywordAssistant;

/// Execute the schema command.
///
/// Every action first points the draft at the named project. Switching
/// projects discards the previous draft and seeds the new one from the
/// project's approved schema.
pub async fn execute_schema(
    args: SchemaArgs,
    workspace: &mut Workspace,
    formatter: &Formatter,
) -> Result<()> {
    let project = workspace.open_project_draft(&args.project)?;
    let draft = &mut workspace.draft;

    match args.action {
        SchemaAction::Show => {
            println!("{}", formatter.format_variables(draft.variables())?);
            if draft.is_dirty() {
                println!("{}", formatter.info("Draft has unapproved changes"));
            }
        }
        SchemaAction::Add {
            name,
            var_type,
            instructions,
            rules,
        } => {
            let mut variable = NewVariable::new(name.trim(), var_type.into());
            if variable.name.is_empty() {
                return Err(CliError::InvalidInput("Variable name cannot be empty".into()));
            }
            if let Some(instructions) = instructions {
                variable = variable.with_instructions(instructions);
            }
            if !rules.is_empty() {
                variable = variable.with_rules(rules);
            }
            let id = draft.add(variable)?;
            println!("{}", formatter.success(&format!("Added variable {}", id)));
        }
        SchemaAction::Update {
            index,
            name,
            var_type,
            instructions,
            clear_instructions,
            rules,
            clear_rules,
        } => {
            let patch = VariablePatch {
                name,
                var_type: var_type.map(Into::into),
                instructions: if clear_instructions {
                    Some(None)
                } else {
                    instructions.map(Some)
                },
                classification_rules: if clear_rules { Some(None) } else { rules.map(Some) },
            };
            if patch.is_empty() {
                return Err(CliError::InvalidInput("Nothing to update".into()));
            }
            draft.update(index, patch)?;
            println!("{}", formatter.success(&format!("Updated variable {}", index)));
        }
        SchemaAction::Delete { index } => {
            let removed = draft.delete(index)?;
            println!(
                "{}",
                formatter.success(&format!("Deleted variable '{}'", removed.name))
            );
        }
        SchemaAction::Duplicate { index } => {
            let id = draft.duplicate(index)?;
            println!("{}", formatter.success(&format!("Duplicated as {}", id)));
        }
        SchemaAction::Reorder { from, to } => {
            draft.reorder(from, to)?;
            println!(
                "{}",
                formatter.success(&format!("Moved variable {} to {}", from, to))
            );
        }
        SchemaAction::Chat { message } => {
            let text = message.join(" ");
            let index = draft.send_message(&KeywordAssistant::new(), &text)?;
            let reply = &draft.messages()[index];
            println!("{}", formatter.format_reply(index, reply)?);
        }
        SchemaAction::Apply { message } => {
            let index = match message {
                Some(index) => index,
                None => draft
                    .messages()
                    .iter()
                    .rposition(|m| m.role == ChatRole::Assistant)
                    .ok_or_else(|| CliError::InvalidInput("No assistant messages yet".into()))?,
            };
            let added = draft.apply_suggestions(index)?;
            println!(
                "{}",
                formatter.success(&format!("Added {} variable(s)", added.len()))
            );
        }
        SchemaAction::Approve => {
            let approved = draft.approve(&mut workspace.projects)?;
            println!(
                "{}",
                formatter.success(&format!(
                    "Approved {} variable(s) for '{}'",
                    approved.variables.len(),
                    approved.name
                ))
            );
        }
        SchemaAction::Reset => {
            draft.reset()?;
            println!(
                "{}",
                formatter.success(&format!("Discarded the draft for '{}'", project.name))
            );
        }
    }
    Ok(())
}
