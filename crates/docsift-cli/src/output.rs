//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use docsift_domain::{ChatMessage, Document, Project, Variable};
use docsift_processor::{JobOutcome, JobProgress, JobStatus};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// The active output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a project list.
    pub fn format_projects(&self, projects: &[Project]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(projects)?),
            OutputFormat::Quiet => Ok(projects
                .iter()
                .map(|p| p.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if projects.is_empty() {
                    return Ok(self.colorize("No projects found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["ID", "Name", "Variables", "Documents", "Results"]);
                for project in projects {
                    builder.push_record([
                        short_id(project.id.as_str()).to_string(),
                        project.name.clone(),
                        project.variables.len().to_string(),
                        project.documents.len().to_string(),
                        project.results.len().to_string(),
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format one project with its schema and documents.
    pub fn format_project(&self, project: &Project) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(project)?),
            OutputFormat::Quiet => Ok(project.id.to_string()),
            OutputFormat::Table => {
                let mut out = vec![format!(
                    "{} ({})",
                    self.colorize(&project.name, "cyan"),
                    project.id
                )];
                if let Some(description) = &project.description {
                    out.push(description.clone());
                }
                out.push(String::new());
                out.push(self.format_variables(&project.variables)?);
                out.push(String::new());
                out.push(self.format_documents(&project.documents)?);
                Ok(out.join("\n"))
            }
        }
    }

    /// Format a variable list in schema order.
    pub fn format_variables(&self, variables: &[Variable]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(variables)?),
            OutputFormat::Quiet => Ok(variables
                .iter()
                .map(|v| v.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if variables.is_empty() {
                    return Ok(self.colorize("No variables defined.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["#", "Name", "Type", "Instructions", "Categories"]);
                for variable in docsift_domain::sorted_by_order(variables) {
                    builder.push_record([
                        variable.order.to_string(),
                        variable.name.clone(),
                        variable.var_type.to_string(),
                        variable.instructions.clone().unwrap_or_default(),
                        variable
                            .classification_rules
                            .as_ref()
                            .map(|r| r.join(", "))
                            .unwrap_or_default(),
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format a document list.
    pub fn format_documents(&self, documents: &[Document]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(documents)?),
            OutputFormat::Quiet => Ok(documents
                .iter()
                .map(|d| d.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if documents.is_empty() {
                    return Ok(self.colorize("No documents uploaded.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["ID", "Name", "Type", "Size", "Status"]);
                for document in documents {
                    builder.push_record([
                        short_id(document.id.as_str()).to_string(),
                        document.name.clone(),
                        document.mime_type.clone(),
                        document.size_bytes.to_string(),
                        document.status.to_string(),
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format extraction results, one line per value.
    pub fn format_results(&self, project: &Project, flagged_only: bool) -> Result<String> {
        let names = project.document_names();
        let variables = docsift_domain::sorted_by_order(&project.variables);

        match self.format {
            OutputFormat::Json => {
                let results: Vec<_> = project
                    .results
                    .iter()
                    .map(|r| {
                        let mut r = r.clone();
                        r.values.retain(|v| !flagged_only || v.flagged);
                        r
                    })
                    .filter(|r| !flagged_only || !r.values.is_empty())
                    .collect();
                Ok(serde_json::to_string_pretty(&results)?)
            }
            OutputFormat::Quiet => Ok(docsift_processor::flagged_count(&project.results).to_string()),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Document", "Variable", "Value", "Confidence", "Flagged"]);
                let mut rows = 0;

                for result in &project.results {
                    let document = names
                        .get(&result.document_id)
                        .map(String::as_str)
                        .unwrap_or("Unknown");
                    for variable in &variables {
                        let Some(value) = result.value_for(&variable.id) else {
                            continue;
                        };
                        if flagged_only && !value.flagged {
                            continue;
                        }
                        builder.push_record([
                            document.to_string(),
                            variable.name.clone(),
                            value.value.to_string(),
                            value
                                .confidence
                                .map(|c| format!("{}%", c))
                                .unwrap_or_default(),
                            if value.flagged { "⚑".to_string() } else { String::new() },
                        ]);
                        rows += 1;
                    }
                }

                if rows == 0 {
                    let msg = if flagged_only {
                        "No flagged values."
                    } else {
                        "No results yet. Run 'docsift process' first."
                    };
                    return Ok(self.colorize(msg, "yellow"));
                }
                Ok(render(builder))
            }
        }
    }

    /// Format an assistant reply with its suggestions.
    pub fn format_reply(&self, index: usize, message: &ChatMessage) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(message)?),
            OutputFormat::Quiet => Ok(index.to_string()),
            OutputFormat::Table => {
                let mut out = vec![format!("{} {}", self.colorize("assistant:", "magenta"), message.content)];
                for suggestion in &message.suggestions {
                    out.push(format!("  + {} ({})", suggestion.name, suggestion.var_type));
                }
                if !message.suggestions.is_empty() {
                    out.push(self.info(&format!(
                        "Run 'schema <project> apply {}' to add these variables",
                        index
                    )));
                }
                Ok(out.join("\n"))
            }
        }
    }

    /// One progress line.
    pub fn progress(&self, progress: &JobProgress) -> String {
        let current = progress
            .current_document
            .as_deref()
            .map(|d| format!(" - {}", d))
            .unwrap_or_default();
        format!(
            "[{:>3.0}%] {}/{} {}{}",
            progress.percent(),
            progress.processed(),
            progress.total,
            progress.status,
            current
        )
    }

    /// Summary of a finished job.
    pub fn outcome(&self, outcome: &JobOutcome) -> String {
        let summary = format!(
            "{} documents processed, {} failed",
            outcome.results.len(),
            outcome.failed.len()
        );
        match outcome.status {
            JobStatus::Completed if outcome.failed.is_empty() => self.success(&summary),
            JobStatus::Completed => self.warning(&summary),
            JobStatus::Cancelled => self.warning(&format!("Cancelled: {}", summary)),
            _ => self.error(&summary),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}
