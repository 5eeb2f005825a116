//! Integration tests for docsift-store
//!
//! These tests exercise the SQLite backend through the project repository.

use docsift_domain::traits::KeyValueStore;
use docsift_domain::{NewVariable, Variable, VariableId, VariableType};
use docsift_store::{Persisted, ProjectRepository, SqliteStore, DRAFT_KEY, PROJECTS_KEY};
use tempfile::tempdir;

#[test]
fn test_store_initialization() {
    let store = SqliteStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
}

#[test]
fn test_projects_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("docsift.db");

    let project_id = {
        let mut repo = ProjectRepository::new(SqliteStore::new(&path).unwrap());
        let project = repo.create("Invoices", None).unwrap();
        let schema = vec![Variable::from_new(
            VariableId::from("v1"),
            NewVariable::new("Total", VariableType::Number),
            0,
        )];
        repo.set_schema(&project.id, schema).unwrap();
        project.id
    };

    let repo = ProjectRepository::new(SqliteStore::new(&path).unwrap());
    let project = repo.require(&project_id).unwrap();
    assert_eq!(project.name, "Invoices");
    assert_eq!(project.variables.len(), 1);
    assert_eq!(project.variables[0].name, "Total");
}

#[test]
fn test_persisted_document_is_versioned() {
    let mut repo = ProjectRepository::new(SqliteStore::new(":memory:").unwrap());
    repo.create("Versioned", None).unwrap();

    let store = repo.into_inner();
    let raw = store.get(PROJECTS_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(json["version"], 1);
    assert_eq!(json["state"]["projects"][0]["name"], "Versioned");
}

#[test]
fn test_documents_are_independent() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    Persisted::save(&mut store, DRAFT_KEY, &vec!["draft".to_string()]).unwrap();

    let mut repo = ProjectRepository::new(store);
    repo.create("Independent", None).unwrap();

    let store = repo.into_inner();
    let draft: Option<Vec<String>> = Persisted::load(&store, DRAFT_KEY).unwrap();
    assert_eq!(draft, Some(vec!["draft".to_string()]));
    assert_eq!(store.keys().unwrap().len(), 2);
}

#[test]
fn test_last_writer_wins() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shared.db");

    let mut first = ProjectRepository::new(SqliteStore::new(&path).unwrap());
    let mut second = ProjectRepository::new(SqliteStore::new(&path).unwrap());

    let project = first.create("Shared", None).unwrap();
    second.rename(&project.id, "Renamed", None).unwrap();

    assert_eq!(first.require(&project.id).unwrap().name, "Renamed");
}

#[test]
fn test_list_newest_first() {
    let mut repo = ProjectRepository::new(SqliteStore::new(":memory:").unwrap());
    let older = repo.create("Older", None).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(2));
    let newer = repo.create("Newer", None).unwrap();

    let listed = repo.list().unwrap();
    assert_eq!(listed[0].id, newer.id);
    assert_eq!(listed[1].id, older.id);
}
