//! The schema draft: an ordered, persisted list of variables being edited

use crate::error::DraftError;
use docsift_domain::traits::{KeyValueStore, SchemaAssistant};
use docsift_domain::{
    ChatMessage, ChatRole, NewVariable, Project, ProjectId, Variable, VariableId, VariablePatch,
};
use docsift_store::{Persisted, ProjectRepository, StoreError, DRAFT_KEY};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Persisted state of the draft
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftState {
    /// Project the draft belongs to
    #[serde(default)]
    pub project_id: Option<ProjectId>,

    /// Working variables; `order` always equals position
    #[serde(default)]
    pub variables: Vec<Variable>,

    /// Changed since the last approval
    #[serde(default)]
    pub is_dirty: bool,

    /// Schema conversation transcript
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

/// Editable schema for the active project
///
/// The draft owns its working list of variables. Every mutating call writes
/// the full state back to the injected store, and after every mutating call
/// the `order` fields are exactly `0..n-1`, matching position.
///
/// # Examples
///
/// ```
/// use docsift_domain::{NewVariable, VariableType};
/// use docsift_schema::SchemaDraft;
/// use docsift_store::MemoryStore;
///
/// let mut draft = SchemaDraft::open(MemoryStore::new()).unwrap();
/// draft.add(NewVariable::new("Date", VariableType::Date)).unwrap();
/// draft.add(NewVariable::new("Total", VariableType::Number)).unwrap();
/// draft.reorder(1, 0).unwrap();
///
/// assert_eq!(draft.variables()[0].name, "Total");
/// assert_eq!(draft.variables()[0].order, 0);
/// ```
pub struct SchemaDraft<S> {
    store: S,
    state: DraftState,
}

impl<S> SchemaDraft<S>
where
    S: KeyValueStore<Error = StoreError>,
{
    /// Open the draft, rehydrating any persisted state
    pub fn open(store: S) -> Result<Self, DraftError> {
        let state = Persisted::<DraftState>::load(&store, DRAFT_KEY)?.unwrap_or_default();
        let mut draft = Self { store, state };

        // Repair state written by something that did not keep the invariant
        if !draft.is_dense() {
            warn!("Persisted draft had non-dense order values, renumbering");
            draft.renumber();
        }
        Ok(draft)
    }

    /// Give back the underlying store
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Current variables, in order
    pub fn variables(&self) -> &[Variable] {
        &self.state.variables
    }

    /// Project the draft belongs to
    pub fn project_id(&self) -> Option<&ProjectId> {
        self.state.project_id.as_ref()
    }

    /// True when the draft changed since it was loaded or approved
    pub fn is_dirty(&self) -> bool {
        self.state.is_dirty
    }

    /// Conversation transcript
    pub fn messages(&self) -> &[ChatMessage] {
        &self.state.messages
    }

    /// Snapshot of the full state
    pub fn state(&self) -> &DraftState {
        &self.state
    }

    fn persist(&mut self) -> Result<(), DraftError> {
        Persisted::save(&mut self.store, DRAFT_KEY, &self.state)?;
        Ok(())
    }

    fn renumber(&mut self) {
        for (position, variable) in self.state.variables.iter_mut().enumerate() {
            variable.order = position;
        }
    }

    fn is_dense(&self) -> bool {
        self.state
            .variables
            .iter()
            .enumerate()
            .all(|(position, v)| v.order == position)
    }

    fn check_index(&self, index: usize) -> Result<(), DraftError> {
        let len = self.state.variables.len();
        if index >= len {
            return Err(DraftError::IndexOutOfRange { index, len });
        }
        Ok(())
    }

    /// Append a variable with a fresh id and `order = len`
    pub fn add(&mut self, variable: NewVariable) -> Result<VariableId, DraftError> {
        let id = VariableId::new();
        let order = self.state.variables.len();
        debug!("Adding variable '{}' at {}", variable.name, order);

        self.state
            .variables
            .push(Variable::from_new(id.clone(), variable, order));
        self.state.is_dirty = true;
        self.persist()?;
        Ok(id)
    }

    /// Merge `patch` into the variable at `index`
    pub fn update(&mut self, index: usize, patch: VariablePatch) -> Result<(), DraftError> {
        self.check_index(index)?;
        debug!("Updating variable at {}", index);

        self.state.variables[index].apply(patch);
        self.state.is_dirty = true;
        self.persist()
    }

    /// Remove the variable at `index` and renumber the rest
    pub fn delete(&mut self, index: usize) -> Result<Variable, DraftError> {
        self.check_index(index)?;

        let removed = self.state.variables.remove(index);
        debug!("Deleted variable '{}' from {}", removed.name, index);
        self.renumber();
        self.state.is_dirty = true;
        self.persist()?;
        Ok(removed)
    }

    /// Append a copy of the variable at `index` named `<name>_copy`
    pub fn duplicate(&mut self, index: usize) -> Result<VariableId, DraftError> {
        self.check_index(index)?;

        let source = &self.state.variables[index];
        let id = VariableId::new();
        let copy = Variable {
            id: id.clone(),
            name: format!("{}_copy", source.name),
            order: self.state.variables.len(),
            ..source.clone()
        };
        debug!("Duplicated '{}' as '{}'", source.name, copy.name);

        self.state.variables.push(copy);
        self.state.is_dirty = true;
        self.persist()?;
        Ok(id)
    }

    /// Move the variable at `from` to position `to` and renumber
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), DraftError> {
        self.check_index(from)?;
        self.check_index(to)?;

        let moved = self.state.variables.remove(from);
        self.state.variables.insert(to, moved);
        self.renumber();
        self.state.is_dirty = true;
        self.persist()
    }

    /// Replace the whole variable list, renumbering it by position
    pub fn replace_variables(&mut self, variables: Vec<Variable>) -> Result<(), DraftError> {
        self.state.variables = variables;
        self.renumber();
        self.state.is_dirty = true;
        self.persist()
    }

    /// Associate the draft with `project_id`
    ///
    /// A different project resets all state; the same project is a no-op.
    /// Returns whether the state was reset.
    pub fn load_draft(&mut self, project_id: &ProjectId) -> Result<bool, DraftError> {
        if self.state.project_id.as_ref() == Some(project_id) {
            return Ok(false);
        }

        info!("Starting new draft for project {}", project_id);
        self.state = DraftState {
            project_id: Some(project_id.clone()),
            ..Default::default()
        };
        self.persist()?;
        Ok(true)
    }

    /// Associate the draft with a project, seeding it from the approved schema
    ///
    /// Seeding only happens when the draft is reset; an in-progress draft for
    /// the same project is kept.
    pub fn open_project(&mut self, project: &Project) -> Result<(), DraftError> {
        if self.load_draft(&project.id)? && !project.variables.is_empty() {
            let mut variables = project.variables.clone();
            variables.sort_by_key(|v| v.order);
            self.state.variables = variables;
            self.renumber();
            self.persist()?;
        }
        Ok(())
    }

    /// Clear everything, including the project association
    pub fn reset(&mut self) -> Result<(), DraftError> {
        self.state = DraftState::default();
        self.persist()
    }

    /// Send a user message and record the assistant's reply
    ///
    /// Returns the position of the reply in the transcript.
    pub fn send_message<A>(&mut self, assistant: &A, text: &str) -> Result<usize, DraftError>
    where
        A: SchemaAssistant,
        A::Error: std::fmt::Display,
    {
        self.state.messages.push(ChatMessage::user(text));

        let reply = match assistant.respond(text, &self.state.variables) {
            Ok(reply) => reply,
            Err(e) => {
                // Keep the user's message even when the assistant fails
                self.persist()?;
                return Err(DraftError::Assistant(e.to_string()));
            }
        };

        debug!("Assistant suggested {} variables", reply.suggestions.len());
        self.state.messages.push(ChatMessage::assistant(reply));
        self.persist()?;
        Ok(self.state.messages.len() - 1)
    }

    /// Add every suggestion of an assistant message not already in the draft
    ///
    /// Names are compared case-insensitively. Returns the ids of the added
    /// variables.
    pub fn apply_suggestions(&mut self, message_index: usize) -> Result<Vec<VariableId>, DraftError> {
        let suggestions = match self.state.messages.get(message_index) {
            Some(m) if m.role == ChatRole::Assistant => m.suggestions.clone(),
            _ => return Err(DraftError::MessageNotFound(message_index)),
        };

        let mut added = Vec::new();
        for suggestion in suggestions {
            let exists = self
                .state
                .variables
                .iter()
                .any(|v| v.name.eq_ignore_ascii_case(&suggestion.name));
            if exists {
                continue;
            }
            let id = VariableId::new();
            let order = self.state.variables.len();
            self.state
                .variables
                .push(Variable::from_new(id.clone(), suggestion, order));
            added.push(id);
        }

        if !added.is_empty() {
            self.state.is_dirty = true;
            self.persist()?;
        }
        Ok(added)
    }

    /// Hand the draft variables over to the associated project's schema
    pub fn approve<R>(&mut self, projects: &mut ProjectRepository<R>) -> Result<Project, DraftError>
    where
        R: KeyValueStore<Error = StoreError>,
    {
        let project_id = self.state.project_id.clone().ok_or(DraftError::NoProject)?;
        if self.state.variables.is_empty() {
            return Err(DraftError::EmptySchema);
        }

        let project = projects.set_schema(&project_id, self.state.variables.clone())?;
        info!(
            "Approved schema with {} variables for project {}",
            self.state.variables.len(),
            project_id
        );

        self.state.is_dirty = false;
        self.persist()?;
        Ok(project)
    }
}
