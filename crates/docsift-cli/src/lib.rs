//! docsift CLI library.
//!
//! Argument parsing, configuration, the workspace that opens the project
//! database, command execution and output formatting for the `docsift`
//! binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod workspace;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use workspace::Workspace;
