//! docsift Export
//!
//! Turns extraction results into CSV text.
//!
//! Two layouts are supported:
//! - **wide**: one row per document, one column per variable
//! - **long**: one row per (document, variable) value
//!
//! Generation is pure; [`write_export`] is the only function that touches
//! the filesystem.

#![warn(missing_docs)]

mod csv_export;
mod error;

pub use csv_export::{export_project, generate_csv, parse_csv, write_rows, UNKNOWN_DOCUMENT};
pub use error::ExportError;

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::info;

/// MIME type to use when the export is offered as a download
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8";

/// File name for an export produced on `date`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("extraction_results_{}.csv", date.format("%Y-%m-%d"))
}

/// Write CSV text into `dir` under the dated export file name
pub fn write_export(dir: &Path, date: NaiveDate, csv: &str) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(date));
    std::fs::write(&path, csv)?;
    info!("Wrote export to {}", path.display());
    Ok(path)
}
