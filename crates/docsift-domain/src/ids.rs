//! Identifiers for projects, documents and variables

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a schema variable
///
/// Freshly created variables get a random UUIDv4. Imported data may carry
/// arbitrary non-empty ids (e.g. `"v1"`), which are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableId(String);

impl VariableId {
    /// Generate a new random VariableId
    ///
    /// # Examples
    ///
    /// ```
    /// use docsift_domain::VariableId;
    ///
    /// let a = VariableId::new();
    /// let b = VariableId::new();
    /// assert_ne!(a, b);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Wrap an existing id string
    pub fn from_string(s: &str) -> Result<Self, String> {
        if s.trim().is_empty() {
            return Err("Variable id cannot be empty".to_string());
        }
        Ok(Self(s.to_string()))
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for VariableId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VariableId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier for an uploaded document
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Generate a new random DocumentId
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Wrap an existing id string
    pub fn from_string(s: &str) -> Result<Self, String> {
        if s.trim().is_empty() {
            return Err("Document id cannot be empty".to_string());
        }
        Ok(Self(s.to_string()))
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier for a project, based on UUIDv7
///
/// UUIDv7 keeps project ids chronologically sortable, so listing projects
/// newest-first is a plain sort on the id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Generate a new UUIDv7-based ProjectId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    /// Wrap an existing id string
    ///
    /// # Examples
    ///
    /// ```
    /// use docsift_domain::ProjectId;
    ///
    /// let id = ProjectId::from_string("p1").unwrap();
    /// assert_eq!(id.as_str(), "p1");
    /// assert!(ProjectId::from_string("").is_err());
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        if s.trim().is_empty() {
            return Err("Project id cannot be empty".to_string());
        }
        Ok(Self(s.to_string()))
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
