//! End-to-end tests driving the parsed command line against a temporary
//! workspace: create a project, define and approve a schema, upload, process,
//! flag and export.

use clap::Parser;
use docsift_cli::commands;
use docsift_cli::config::OutputFormat;
use docsift_cli::{Cli, CliError, Config, Formatter, Workspace};
use std::fs;
use std::path::Path;

async fn run(workspace: &mut Workspace, args: &[&str]) -> Result<(), CliError> {
    let cli = Cli::try_parse_from(std::iter::once("docsift").chain(args.iter().copied()))
        .map_err(|e| CliError::InvalidInput(e.to_string()))?;
    let formatter = Formatter::new(OutputFormat::Quiet, false);
    commands::execute(cli.command, workspace, &formatter).await
}

fn workspace(dir: &Path) -> Workspace {
    Workspace::open_at(&dir.join("docsift.db"), Config::default()).unwrap()
}

#[tokio::test]
async fn test_full_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let mut ws = workspace(dir.path());

    run(&mut ws, &["project", "create", "Invoices", "-d", "Q3 batch"])
        .await
        .unwrap();
    run(&mut ws, &["schema", "Invoices", "add", "Vendor"])
        .await
        .unwrap();
    run(
        &mut ws,
        &["schema", "Invoices", "add", "Kind", "--type", "category", "--rules", "Invoice,Receipt"],
    )
    .await
    .unwrap();
    run(&mut ws, &["schema", "Invoices", "approve"]).await.unwrap();

    let a = dir.path().join("a.pdf");
    let b = dir.path().join("b.txt");
    fs::write(&a, "%PDF-1.4").unwrap();
    fs::write(&b, "total 12").unwrap();
    run(
        &mut ws,
        &["upload", "Invoices", a.to_str().unwrap(), b.to_str().unwrap()],
    )
    .await
    .unwrap();

    run(&mut ws, &["process", "Invoices", "--delay-ms", "0"])
        .await
        .unwrap();
    run(&mut ws, &["flag", "Invoices", "b.txt", "kind"])
        .await
        .unwrap();
    run(&mut ws, &["results", "Invoices", "--flagged"])
        .await
        .unwrap();

    let project = ws.project("Invoices").unwrap();
    assert_eq!(project.results.len(), 2);
    assert_eq!(docsift_processor::flagged_count(&project.results), 1);

    let out = dir.path().join("out");
    run(
        &mut ws,
        &["export", "Invoices", "--confidence", "-o", out.to_str().unwrap()],
    )
    .await
    .unwrap();

    let file = fs::read_dir(&out).unwrap().next().unwrap().unwrap().path();
    let csv = fs::read_to_string(file).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "\"Document\",\"Vendor\",\"Kind\",\"Vendor (Confidence)\",\"Kind (Confidence)\""
    );
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("\"a.pdf\","));
    assert!(lines[1].contains("\"Invoice\""));
}

#[tokio::test]
async fn test_reprocess_after_schema_change() {
    let dir = tempfile::tempdir().unwrap();
    let mut ws = workspace(dir.path());

    run(&mut ws, &["project", "create", "Notes"]).await.unwrap();
    run(&mut ws, &["schema", "Notes", "chat", "Title: text"])
        .await
        .unwrap();
    run(&mut ws, &["schema", "Notes", "apply"]).await.unwrap();
    run(&mut ws, &["schema", "Notes", "approve"]).await.unwrap();

    let note = dir.path().join("note.txt");
    fs::write(&note, "hello").unwrap();
    run(&mut ws, &["upload", "Notes", note.to_str().unwrap()])
        .await
        .unwrap();
    run(&mut ws, &["process", "Notes", "--delay-ms", "0"])
        .await
        .unwrap();

    run(&mut ws, &["schema", "Notes", "add", "Pages", "-t", "number"])
        .await
        .unwrap();
    run(&mut ws, &["schema", "Notes", "approve"]).await.unwrap();
    run(&mut ws, &["process", "Notes", "--all", "--delay-ms", "0"])
        .await
        .unwrap();

    let project = ws.project("Notes").unwrap();
    assert_eq!(project.results.len(), 1);
    assert_eq!(project.results[0].values.len(), 2);
}

#[tokio::test]
async fn test_unknown_project() {
    let dir = tempfile::tempdir().unwrap();
    let mut ws = workspace(dir.path());

    let result = run(&mut ws, &["results", "Missing"]).await;
    assert!(matches!(result, Err(CliError::NotFound(_))));
}
