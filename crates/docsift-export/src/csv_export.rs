//! Wide and long CSV generation

use crate::error::ExportError;
use docsift_domain::{
    sorted_by_order, DocumentId, ExportConfig, ExportStructure, ExtractionResult, Project, Variable,
};
use std::collections::HashMap;
use tracing::debug;

/// Name used when a document id has no entry in the name map
pub const UNKNOWN_DOCUMENT: &str = "Unknown";

/// Build the CSV text for a set of extraction results
///
/// Columns follow the order of `variables` as given; callers that hold an
/// unsorted list should pass it through [`sorted_by_order`] first. Every cell
/// is double-quoted with embedded quotes doubled, rows are joined by `\n` and
/// there is no trailing newline. The output depends on nothing but the inputs.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use docsift_domain::*;
/// use docsift_export::generate_csv;
///
/// let variables = vec![Variable::from_new(
///     VariableId::from("v1"),
///     NewVariable::new("Date", VariableType::Date),
///     0,
/// )];
/// let results = vec![ExtractionResult::new(
///     DocumentId::from("d1"),
///     vec![ExtractedValue::new(VariableId::from("v1"), "2024-01-01").with_confidence(90.0)],
/// )];
/// let names = HashMap::from([(DocumentId::from("d1"), "doc.pdf".to_string())]);
///
/// let csv = generate_csv(&results, &variables, &names, &ExportConfig::wide().with_confidence(true)).unwrap();
/// assert_eq!(csv, "\"Document\",\"Date\",\"Date (Confidence)\"\n\"doc.pdf\",\"2024-01-01\",\"90\"");
/// ```
pub fn generate_csv(
    results: &[ExtractionResult],
    variables: &[Variable],
    document_names: &HashMap<DocumentId, String>,
    config: &ExportConfig,
) -> Result<String, ExportError> {
    let rows = match config.structure {
        ExportStructure::Wide => wide_rows(results, variables, document_names, config),
        ExportStructure::Long => long_rows(results, variables, document_names, config),
    };
    debug!(
        "Generated {} {} export rows for {} results",
        rows.len(),
        config.structure,
        results.len()
    );
    write_rows(&rows)
}

/// Export a project's results using its approved schema and document names
pub fn export_project(project: &Project, config: &ExportConfig) -> Result<String, ExportError> {
    let variables = sorted_by_order(&project.variables);
    generate_csv(&project.results, &variables, &project.document_names(), config)
}

fn document_name<'a>(names: &'a HashMap<DocumentId, String>, id: &DocumentId) -> &'a str {
    names.get(id).map(String::as_str).unwrap_or(UNKNOWN_DOCUMENT)
}

fn format_confidence(confidence: Option<f64>) -> String {
    confidence.map(|c| c.to_string()).unwrap_or_default()
}

fn wide_rows(
    results: &[ExtractionResult],
    variables: &[Variable],
    document_names: &HashMap<DocumentId, String>,
    config: &ExportConfig,
) -> Vec<Vec<String>> {
    let mut header = vec!["Document".to_string()];
    header.extend(variables.iter().map(|v| v.name.clone()));
    if config.include_confidence {
        header.extend(variables.iter().map(|v| format!("{} (Confidence)", v.name)));
    }

    let mut rows = Vec::with_capacity(results.len() + 1);
    rows.push(header);

    for result in results {
        let mut row = vec![document_name(document_names, &result.document_id).to_string()];
        row.extend(variables.iter().map(|v| {
            result
                .value_for(&v.id)
                .map(|ev| ev.value.to_string())
                .unwrap_or_default()
        }));
        if config.include_confidence {
            row.extend(
                variables
                    .iter()
                    .map(|v| format_confidence(result.value_for(&v.id).and_then(|ev| ev.confidence))),
            );
        }
        rows.push(row);
    }
    rows
}

fn long_rows(
    results: &[ExtractionResult],
    variables: &[Variable],
    document_names: &HashMap<DocumentId, String>,
    config: &ExportConfig,
) -> Vec<Vec<String>> {
    let mut header = vec![
        "Document".to_string(),
        "Variable".to_string(),
        "Value".to_string(),
    ];
    if config.include_confidence {
        header.push("Confidence".to_string());
    }
    if config.include_source_text {
        header.push("Source Text".to_string());
    }

    let by_id: HashMap<_, _> = variables.iter().map(|v| (&v.id, v)).collect();
    let mut rows = vec![header];

    for result in results {
        let document = document_name(document_names, &result.document_id);
        for value in &result.values {
            // Values pointing at variables outside the schema are dropped
            let Some(variable) = by_id.get(&value.variable_id) else {
                continue;
            };

            let mut row = vec![
                document.to_string(),
                variable.name.clone(),
                value.value.to_string(),
            ];
            if config.include_confidence {
                row.push(format_confidence(value.confidence));
            }
            if config.include_source_text {
                row.push(value.source_text.clone().unwrap_or_default());
            }
            rows.push(row);
        }
    }
    rows
}

/// Serialize rows with every cell quoted, joined by `\n`, no trailing newline
pub fn write_rows(rows: &[Vec<String>]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(Vec::new());

    for row in rows {
        writer.write_record(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    let mut text = String::from_utf8(bytes)?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// Parse quoted CSV text into rows of cells
pub fn parse_csv(text: &str) -> Result<Vec<Vec<String>>, ExportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}
