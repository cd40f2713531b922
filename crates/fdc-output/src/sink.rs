//! Export dispatch: one file per requested format next to a base path.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, warn};

use fdc_model::{ConsolidatedTable, ExportFormat};

use crate::error::{ExportError, Result};

/// A file written by the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub format: ExportFormat,
    pub path: PathBuf,
}

/// `base_path` with the format's extension appended (`exported_foods.csv`).
pub fn output_path(base_path: &Path, format: ExportFormat) -> PathBuf {
    let mut path = OsString::from(base_path.as_os_str());
    path.push(".");
    path.push(format.extension());
    PathBuf::from(path)
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| ExportError::io(parent, e))?;
    }
    Ok(())
}

/// Requested formats in first-seen order with repeats removed; CSV when empty.
pub fn resolve_formats(formats: &[ExportFormat]) -> Vec<ExportFormat> {
    let mut resolved = Vec::with_capacity(formats.len().max(1));
    for format in formats {
        if !resolved.contains(format) {
            resolved.push(*format);
        }
    }
    if resolved.is_empty() {
        resolved.push(ExportFormat::Csv);
    }
    resolved
}

fn write_format(table: &ConsolidatedTable, format: ExportFormat, path: &Path) -> Result<()> {
    match format {
        ExportFormat::Csv => crate::csv::write_csv(table, path),
        ExportFormat::Json => crate::json::write_json(table, path),
        ExportFormat::Spreadsheet => crate::spreadsheet::write_spreadsheet(table, path),
        ExportFormat::RelationalDump => crate::sqlite::write_sqlite(table, path),
        ExportFormat::BinarySerialized => crate::parquet::write_parquet(table, path),
    }
}

/// Removes whatever a failed writer left at `path`.
fn discard_partial(path: &Path) {
    if path.exists()
        && let Err(error) = fs::remove_file(path)
    {
        warn!(path = %path.display(), %error, "could not remove partial export");
    }
}

/// Writes `table` once per format at `base_path` + extension.
///
/// Formats are written in order. When one fails, its partial file is removed
/// and the error returned; files completed before it are kept.
pub fn export_table(
    table: &ConsolidatedTable,
    base_path: &Path,
    formats: &[ExportFormat],
) -> Result<Vec<ExportedFile>> {
    ensure_parent_dir(base_path)?;

    let mut written = Vec::new();
    for format in resolve_formats(formats) {
        let start = Instant::now();
        let path = output_path(base_path, format);
        if let Err(error) = write_format(table, format, &path) {
            discard_partial(&path);
            return Err(error);
        }
        info!(
            format = %format,
            path = %path.display(),
            rows = table.len(),
            columns = table.column_count(),
            duration_ms = start.elapsed().as_millis(),
            "export written"
        );
        written.push(ExportedFile { format, path });
    }
    Ok(written)
}

/// Like [`export_table`], with formats given by name.
///
/// Every name is parsed before anything is written.
pub fn export_named<S: AsRef<str>>(
    table: &ConsolidatedTable,
    base_path: &Path,
    names: &[S],
) -> Result<Vec<ExportedFile>> {
    let formats = names
        .iter()
        .map(|name| name.as_ref().parse::<ExportFormat>())
        .collect::<std::result::Result<Vec<_>, _>>()?;
    export_table(table, base_path, &formats)
}
