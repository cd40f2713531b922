//! Error types for source table ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a source table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Source file does not exist.
    #[error("source not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// Source exists but could not be read.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// The delimited reader rejected the content.
    #[error("failed to parse {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// The source has no header row.
    #[error("source is empty: {path}")]
    EmptySource { path: PathBuf },

    // === Schema Errors ===
    /// A key or requested column is absent from the header.
    #[error("schema error: column '{column}' not found in {path}")]
    Schema { column: String, path: PathBuf },

    /// A cell could not be parsed as the type its column requires.
    #[error("invalid {column} value '{value}' at {path}:{line}")]
    InvalidValue {
        column: String,
        value: String,
        line: u64,
        path: PathBuf,
    },

    /// A primary key occurs on more than one row.
    #[error("duplicate {column} '{key}' at {path}:{line}")]
    DuplicateKey {
        column: String,
        key: String,
        line: u64,
        path: PathBuf,
    },
}

impl IngestError {
    /// True for errors caused by a missing or unreadable source.
    pub fn is_source_error(&self) -> bool {
        matches!(
            self,
            IngestError::SourceNotFound { .. } | IngestError::FileRead { .. }
        )
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
