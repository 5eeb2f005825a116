//! Open stores and resolve user-supplied names.

use crate::config::Config;
use crate::error::{CliError, Result};
use docsift_domain::{Document, Project, Variable};
use docsift_schema::SchemaDraft;
use docsift_store::{ProjectRepository, SqliteStore};
use std::path::Path;
use tracing::debug;

/// Everything a command needs: the project list, the schema draft and settings.
///
/// The draft and the project list share one database file through separate
/// connections.
pub struct Workspace {
    /// Project persistence
    pub projects: ProjectRepository<SqliteStore>,
    /// Schema draft of the active project
    pub draft: SchemaDraft<SqliteStore>,
    /// Loaded configuration
    pub config: Config,
}

impl Workspace {
    /// Open the database named by the configuration.
    pub fn open(config: Config) -> Result<Self> {
        let path = config.database_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::open_at(&path, config)
    }

    /// Open a specific database file.
    pub fn open_at(path: &Path, config: Config) -> Result<Self> {
        debug!("Opening workspace at {}", path.display());
        let projects = ProjectRepository::new(SqliteStore::new(path)?);
        let draft = SchemaDraft::open(SqliteStore::new(path)?)?;
        Ok(Self {
            projects,
            draft,
            config,
        })
    }

    /// Find a project by id or name.
    pub fn project(&self, id_or_name: &str) -> Result<Project> {
        self.projects
            .find(id_or_name)?
            .ok_or_else(|| CliError::NotFound(format!("Project '{}'", id_or_name)))
    }

    /// Find a project and make the draft follow it.
    pub fn open_project_draft(&mut self, id_or_name: &str) -> Result<Project> {
        let project = self.project(id_or_name)?;
        self.draft.open_project(&project)?;
        Ok(project)
    }
}

/// Find a document by id or (case-insensitive) name.
pub fn find_document<'a>(project: &'a Project, id_or_name: &str) -> Result<&'a Document> {
    project
        .documents
        .iter()
        .find(|d| d.id.as_str() == id_or_name)
        .or_else(|| {
            project
                .documents
                .iter()
                .find(|d| d.name.eq_ignore_ascii_case(id_or_name))
        })
        .ok_or_else(|| CliError::NotFound(format!("Document '{}'", id_or_name)))
}

/// Find a schema variable by id or (case-insensitive) name.
pub fn find_variable<'a>(project: &'a Project, id_or_name: &str) -> Result<&'a Variable> {
    project
        .variables
        .iter()
        .find(|v| v.id.as_str() == id_or_name)
        .or_else(|| {
            project
                .variables
                .iter()
                .find(|v| v.name.eq_ignore_ascii_case(id_or_name))
        })
        .ok_or_else(|| CliError::NotFound(format!("Variable '{}'", id_or_name)))
}
