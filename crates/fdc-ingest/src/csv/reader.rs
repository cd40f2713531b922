//! Delimited source reading into a keyed, projected in-memory table.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

use super::header::{CsvHeaders, normalize_cell, resolve_projection};

/// Describes which part of a source to load.
#[derive(Debug, Clone)]
pub struct TableSpec {
    /// Column that identifies a row. Always loaded, always first.
    pub primary_key: String,
    /// Columns that must exist. `None` loads every column.
    pub columns: Option<Vec<String>>,
    /// Columns loaded only when the source has them.
    pub optional_columns: Vec<String>,
    /// Field delimiter.
    pub delimiter: u8,
}

impl TableSpec {
    pub fn new(primary_key: impl Into<String>) -> Self {
        Self {
            primary_key: primary_key.into(),
            columns: None,
            optional_columns: Vec::new(),
            delimiter: b',',
        }
    }

    #[must_use]
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_optional_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.optional_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// One data row with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub line: u64,
    pub cells: Vec<String>,
}

/// Raw text table with the primary key in column 0.
#[derive(Debug, Clone)]
pub struct Table {
    path: PathBuf,
    columns: Vec<String>,
    rows: Vec<TableRow>,
}

impl Table {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn primary_key(&self) -> &str {
        &self.columns[0]
    }

    /// Projected column names, primary key first.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Cell text for a row, empty when the row is short.
    pub fn cell<'a>(&self, row: &'a TableRow, column: usize) -> &'a str {
        row.cells.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn open_source(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::SourceNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

fn csv_error(path: &Path, error: csv::Error) -> IngestError {
    let message = error.to_string();
    match error.into_kind() {
        csv::ErrorKind::Io(source) => IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        },
        _ => IngestError::CsvParse {
            path: path.to_path_buf(),
            message,
        },
    }
}

/// Loads `source` keyed by `primary_key`, optionally projected to `columns`.
///
/// When `columns` is given and does not name the key, the key is added.
pub fn load_table(source: &Path, primary_key: &str, columns: Option<&[&str]>) -> Result<Table> {
    let mut spec = TableSpec::new(primary_key);
    if let Some(columns) = columns {
        spec = spec.with_columns(columns.iter().copied());
    }
    read_table(source, &spec)
}

/// Reads a delimited source according to `spec`.
pub fn read_table(path: &Path, spec: &TableSpec) -> Result<Table> {
    let start = Instant::now();
    let file = open_source(path)?;
    let mut reader = ReaderBuilder::new()
        .delimiter(spec.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers = CsvHeaders::new(reader.headers().map_err(|e| csv_error(path, e))?.iter());
    if headers.is_empty() {
        return Err(IngestError::EmptySource {
            path: path.to_path_buf(),
        });
    }

    let projection = resolve_projection(
        &headers,
        &spec.primary_key,
        spec.columns.as_deref(),
        &spec.optional_columns,
        path,
    )?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(path, e))?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let line = record.position().map_or(0, csv::Position::line);
        let cells = projection
            .iter()
            .map(|(_, idx)| record.get(*idx).map(normalize_cell).unwrap_or_default())
            .collect();
        rows.push(TableRow { line, cells });
    }

    tracing::debug!(
        path = %path.display(),
        rows = rows.len(),
        columns = projection.len(),
        duration_ms = start.elapsed().as_millis(),
        "loaded source table"
    );

    Ok(Table {
        path: path.to_path_buf(),
        columns: projection.into_iter().map(|(name, _)| name).collect(),
        rows,
    })
}
