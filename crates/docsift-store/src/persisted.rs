//! Versioned persisted documents
//!
//! Every document is stored as `{ "version": 1, "state": { ... } }`. There are
//! no migrations: a document written by another version is ignored and the
//! caller starts from empty state.

use crate::StoreError;
use docsift_domain::traits::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Current persisted state version
pub const STATE_VERSION: u32 = 1;

/// Key of the project list document
pub const PROJECTS_KEY: &str = "docsift-projects";

/// Key of the schema draft document
pub const DRAFT_KEY: &str = "docsift-schema-draft";

/// Envelope around a persisted state value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persisted<T> {
    /// Format version of `state`
    pub version: u32,
    /// The persisted state
    pub state: T,
}

#[derive(Serialize)]
struct PersistedRef<'a, T> {
    version: u32,
    state: &'a T,
}

#[derive(Deserialize)]
struct VersionProbe {
    version: Option<u32>,
}

impl<T> Persisted<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Wrap a state value at the current version
    pub fn new(state: T) -> Self {
        Self {
            version: STATE_VERSION,
            state,
        }
    }

    /// Load the state stored under `key`
    ///
    /// Returns `Ok(None)` when the key is absent or was written with a
    /// different version.
    pub fn load<S>(store: &S, key: &str) -> Result<Option<T>, StoreError>
    where
        S: KeyValueStore<Error = StoreError>,
    {
        let Some(raw) = store.get(key)? else {
            return Ok(None);
        };

        let probe: VersionProbe = serde_json::from_str(&raw)?;
        match probe.version {
            Some(STATE_VERSION) => {}
            Some(other) => {
                warn!(
                    "Ignoring persisted '{}' at version {} (expected {})",
                    key, other, STATE_VERSION
                );
                return Ok(None);
            }
            None => {
                return Err(StoreError::InvalidData(format!(
                    "Persisted '{}' has no version field",
                    key
                )));
            }
        }

        let persisted: Persisted<T> = serde_json::from_str(&raw)?;
        Ok(Some(persisted.state))
    }

    /// Store `state` under `key` at the current version
    pub fn save<S>(store: &mut S, key: &str, state: &T) -> Result<(), StoreError>
    where
        S: KeyValueStore<Error = StoreError>,
    {
        let raw = serde_json::to_string(&PersistedRef {
            version: STATE_VERSION,
            state,
        })?;
        store.set(key, &raw)
    }
}
