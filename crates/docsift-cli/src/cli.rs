//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use docsift_domain::{ExportStructure, VariableType};
use std::path::PathBuf;

/// docsift - Extract structured fields from document collections.
#[derive(Debug, Parser)]
#[command(name = "docsift")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "DOCSIFT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage projects
    Project(ProjectArgs),

    /// Define the extraction schema of a project
    Schema(SchemaArgs),

    /// Add documents to a project
    Upload(UploadArgs),

    /// Extract values from a project's documents (Ctrl+C cancels)
    Process(ProcessArgs),

    /// Show extraction results
    Results(ResultsArgs),

    /// Flag or unflag one extracted value
    Flag(FlagArgs),

    /// Flag or unflag every value of one variable
    FlagAll(FlagAllArgs),

    /// Export results as CSV
    Export(ExportArgs),
}

/// Arguments for project management.
#[derive(Debug, Args)]
pub struct ProjectArgs {
    #[command(subcommand)]
    pub action: ProjectAction,
}

/// Project management actions.
#[derive(Debug, Subcommand)]
pub enum ProjectAction {
    /// Create a project
    Create {
        /// Project name
        name: String,
        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// List projects, newest first
    List,

    /// Show a project's schema and documents
    Show {
        /// Project id or name
        project: String,
    },

    /// Rename a project
    Rename {
        /// Project id or name
        project: String,
        /// New name
        name: String,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Remove a document and its results
    RemoveDocument {
        /// Project id or name
        project: String,
        /// Document id or name
        document: String,
    },

    /// Delete a project
    Delete {
        /// Project id or name
        project: String,
    },
}

/// Arguments for the schema command.
#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// Project id or name
    pub project: String,

    #[command(subcommand)]
    pub action: SchemaAction,
}

/// Schema draft actions. Positions are zero-based.
#[derive(Debug, Subcommand)]
pub enum SchemaAction {
    /// Show the draft variables
    Show,

    /// Append a variable
    Add {
        /// Variable name
        name: String,
        /// Data type
        #[arg(short = 't', long = "type", value_enum, default_value = "text")]
        var_type: VariableTypeArg,
        /// Extraction instructions
        #[arg(short, long)]
        instructions: Option<String>,
        /// Allowed categories (comma separated)
        #[arg(short, long, value_delimiter = ',')]
        rules: Vec<String>,
    },

    /// Change fields of the variable at a position
    Update {
        /// Position
        index: usize,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New data type
        #[arg(short = 't', long = "type", value_enum)]
        var_type: Option<VariableTypeArg>,
        /// New instructions
        #[arg(short, long, conflicts_with = "clear_instructions")]
        instructions: Option<String>,
        /// Remove the instructions
        #[arg(long)]
        clear_instructions: bool,
        /// New categories (comma separated)
        #[arg(short, long, value_delimiter = ',', conflicts_with = "clear_rules")]
        rules: Option<Vec<String>>,
        /// Remove the categories
        #[arg(long)]
        clear_rules: bool,
    },

    /// Delete the variable at a position
    Delete {
        /// Position
        index: usize,
    },

    /// Copy the variable at a position to the end
    Duplicate {
        /// Position
        index: usize,
    },

    /// Move a variable
    Reorder {
        /// Current position
        from: usize,
        /// Target position
        to: usize,
    },

    /// Describe what to extract; the assistant suggests variables
    Chat {
        /// Message text
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// Add the suggestions of an assistant message (default: the latest)
    Apply {
        /// Message position in the transcript
        message: Option<usize>,
    },

    /// Make the draft the project's schema
    Approve,

    /// Discard the draft
    Reset,
}

/// Arguments for the upload command.
#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Project id or name
    pub project: String,

    /// Files to upload
    #[arg(required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,
}

/// Arguments for the process command.
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Project id or name
    pub project: String,

    /// Reprocess documents that already have results
    #[arg(long)]
    pub all: bool,

    /// Override the per-document delay (milliseconds)
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

/// Arguments for the results command.
#[derive(Debug, Args)]
pub struct ResultsArgs {
    /// Project id or name
    pub project: String,

    /// Only show flagged values
    #[arg(long)]
    pub flagged: bool,
}

/// Arguments for the flag command.
#[derive(Debug, Args)]
pub struct FlagArgs {
    /// Project id or name
    pub project: String,

    /// Document id or name
    pub document: String,

    /// Variable id or name
    pub variable: String,

    /// Clear the flag instead of setting it
    #[arg(long)]
    pub unflag: bool,
}

/// Arguments for the flag-all command.
#[derive(Debug, Args)]
pub struct FlagAllArgs {
    /// Project id or name
    pub project: String,

    /// Variable id or name
    #[arg(short, long)]
    pub variable: String,

    /// Clear the flags instead of setting them
    #[arg(long)]
    pub unflag: bool,
}

/// Arguments for the export command.
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Project id or name
    pub project: String,

    /// Table layout
    #[arg(short, long, value_enum, default_value = "wide")]
    pub structure: StructureArg,

    /// Add confidence columns
    #[arg(long)]
    pub confidence: bool,

    /// Add the source text column (long layout only)
    #[arg(long)]
    pub source_text: bool,

    /// Output directory
    #[arg(short, long, default_value = ".", conflicts_with = "stdout")]
    pub output: PathBuf,

    /// Print the CSV instead of writing a file
    #[arg(long)]
    pub stdout: bool,
}

/// Variable type argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum VariableTypeArg {
    /// Free text
    Text,
    /// Numeric value
    Number,
    /// Calendar date
    Date,
    /// One of a fixed set of categories
    Category,
    /// Yes or no
    Boolean,
}

/// Export layout argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum StructureArg {
    /// One row per document
    Wide,
    /// One row per extracted value
    Long,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<VariableTypeArg> for VariableType {
    fn from(arg: VariableTypeArg) -> Self {
        match arg {
            VariableTypeArg::Text => VariableType::Text,
            VariableTypeArg::Number => VariableType::Number,
            VariableTypeArg::Date => VariableType::Date,
            VariableTypeArg::Category => VariableType::Category,
            VariableTypeArg::Boolean => VariableType::Boolean,
        }
    }
}

impl From<StructureArg> for ExportStructure {
    fn from(arg: StructureArg) -> Self {
        match arg {
            StructureArg::Wide => ExportStructure::Wide,
            StructureArg::Long => ExportStructure::Long,
        }
    }
}
