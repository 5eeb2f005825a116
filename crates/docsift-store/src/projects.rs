//! Project list persistence

use crate::{Persisted, StoreError, PROJECTS_KEY};
use docsift_domain::traits::KeyValueStore;
use docsift_domain::{
    unix_timestamp, Document, DocumentId, ExtractionResult, Project, ProjectId, Variable,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Default, Serialize, Deserialize)]
struct ProjectsState {
    projects: Vec<Project>,
}

/// Repository for projects, persisted as a single document
///
/// Every call reads the whole list and writes it back, so two processes
/// sharing a database follow last-writer-wins.
pub struct ProjectRepository<S> {
    store: S,
}

impl<S> ProjectRepository<S>
where
    S: KeyValueStore<Error = StoreError>,
{
    /// Wrap a key-value store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Give back the underlying store
    pub fn into_inner(self) -> S {
        self.store
    }

    fn load(&self) -> Result<Vec<Project>, StoreError> {
        Ok(Persisted::<ProjectsState>::load(&self.store, PROJECTS_KEY)?
            .unwrap_or_default()
            .projects)
    }

    fn persist(&mut self, projects: Vec<Project>) -> Result<(), StoreError> {
        Persisted::save(&mut self.store, PROJECTS_KEY, &ProjectsState { projects })
    }

    /// Create and store an empty project
    pub fn create(
        &mut self,
        name: &str,
        description: Option<String>,
    ) -> Result<Project, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidData("Project name cannot be empty".to_string()));
        }

        let project = Project::new(name, description, unix_timestamp());
        let mut projects = self.load()?;
        projects.push(project.clone());
        self.persist(projects)?;

        debug!("Created project '{}' ({})", project.name, project.id);
        Ok(project)
    }

    /// All projects, newest first
    pub fn list(&self) -> Result<Vec<Project>, StoreError> {
        let mut projects = self.load()?;
        projects.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(projects)
    }

    /// Get a project by id
    pub fn get(&self, id: &ProjectId) -> Result<Option<Project>, StoreError> {
        Ok(self.load()?.into_iter().find(|p| &p.id == id))
    }

    /// Get a project by id, failing with `NotFound` if absent
    pub fn require(&self, id: &ProjectId) -> Result<Project, StoreError> {
        self.get(id)?
            .ok_or_else(|| StoreError::NotFound(format!("project {}", id)))
    }

    /// Find a project by id or by (case-insensitive) name
    pub fn find(&self, id_or_name: &str) -> Result<Option<Project>, StoreError> {
        let projects = self.load()?;
        if let Some(p) = projects.iter().find(|p| p.id.as_str() == id_or_name) {
            return Ok(Some(p.clone()));
        }
        Ok(projects
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(id_or_name)))
    }

    /// Apply `f` to a stored project and persist it, bumping `updated_at`
    pub fn update<F>(&mut self, id: &ProjectId, f: F) -> Result<Project, StoreError>
    where
        F: FnOnce(&mut Project),
    {
        let mut projects = self.load()?;
        let project = projects
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("project {}", id)))?;

        f(project);
        project.updated_at = unix_timestamp();
        let updated = project.clone();

        self.persist(projects)?;
        Ok(updated)
    }

    /// Insert or replace a whole project
    pub fn save(&mut self, project: Project) -> Result<(), StoreError> {
        let mut projects = self.load()?;
        match projects.iter_mut().find(|p| p.id == project.id) {
            Some(existing) => *existing = project,
            None => projects.push(project),
        }
        self.persist(projects)
    }

    /// Change name and description
    pub fn rename(
        &mut self,
        id: &ProjectId,
        name: &str,
        description: Option<String>,
    ) -> Result<Project, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidData("Project name cannot be empty".to_string()));
        }
        self.update(id, |p| {
            p.name = name.to_string();
            p.description = description;
        })
    }

    /// Delete a project; returns whether it existed
    pub fn delete(&mut self, id: &ProjectId) -> Result<bool, StoreError> {
        let mut projects = self.load()?;
        let before = projects.len();
        projects.retain(|p| &p.id != id);
        let removed = projects.len() != before;
        if removed {
            self.persist(projects)?;
            debug!("Deleted project {}", id);
        }
        Ok(removed)
    }

    /// Replace the approved schema
    pub fn set_schema(
        &mut self,
        id: &ProjectId,
        variables: Vec<Variable>,
    ) -> Result<Project, StoreError> {
        self.update(id, |p| p.variables = variables)
    }

    /// Append uploaded documents
    pub fn add_documents(
        &mut self,
        id: &ProjectId,
        documents: Vec<Document>,
    ) -> Result<Project, StoreError> {
        self.update(id, |p| p.documents.extend(documents))
    }

    /// Remove a document and its results; returns whether it existed
    pub fn remove_document(
        &mut self,
        id: &ProjectId,
        document_id: &DocumentId,
    ) -> Result<bool, StoreError> {
        let mut removed = false;
        self.update(id, |p| {
            let before = p.documents.len();
            p.documents.retain(|d| &d.id != document_id);
            removed = p.documents.len() != before;
            p.results.retain(|r| &r.document_id != document_id);
        })?;
        Ok(removed)
    }

    /// Replace the extraction results
    pub fn set_results(
        &mut self,
        id: &ProjectId,
        results: Vec<ExtractionResult>,
    ) -> Result<Project, StoreError> {
        self.update(id, |p| p.results = results)
    }
}
